//! Domain models exchanged with the clinic backend.

pub mod appointment;
pub mod auth;
pub mod dentist;
pub mod patient;
pub mod publication;
pub mod service;
pub mod types;
