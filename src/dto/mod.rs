//! DTOs that bridge services with templates.

pub mod booking;
pub mod profiles;
