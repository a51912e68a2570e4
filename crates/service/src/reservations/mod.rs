//! Reservation persistence seam.

pub mod repository;

pub use repository::ReservationRepository;
