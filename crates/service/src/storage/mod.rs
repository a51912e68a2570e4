//! Storage abstractions for service layer
//!
//! File-backed persistence for the single reservation document.

pub mod json_file_store;
