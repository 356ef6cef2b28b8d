//! HTTP handlers, one module per resource. Each validates input, calls its service and wraps the result.

pub mod cuisines;
pub mod images;
pub mod payments;
pub mod preferences;
pub mod reservations;
pub mod restaurants;
pub mod reviews;
pub mod staff;
pub mod tables;
pub mod upload;
pub mod users;
