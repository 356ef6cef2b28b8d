//! Data access: one service per entity, each call borrowing one pooled connection.

pub mod cuisines;
pub mod images;
pub mod password;
pub mod payments;
pub mod preferences;
pub mod reservations;
pub mod restaurants;
pub mod reviews;
pub mod staff;
pub mod tables;
pub mod users;
pub mod validation;

pub use cuisines::CuisineService;
pub use images::ImageService;
pub use payments::PaymentService;
pub use preferences::PreferenceService;
pub use reservations::ReservationService;
pub use restaurants::{RestaurantFilter, RestaurantService};
pub use reviews::ReviewService;
pub use staff::StaffService;
pub use tables::TableService;
pub use users::UserService;
