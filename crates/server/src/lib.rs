pub mod routes;
pub mod startup;
pub mod state;
pub mod auth;
pub mod errors;
pub mod page;

pub use startup::run;
