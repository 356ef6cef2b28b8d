//! Row types, request bodies, and validated inputs for each entity.

pub mod cuisine;
pub mod payment;
pub mod preference;
pub mod reservation;
pub mod restaurant;
pub mod review;
pub mod status;
pub mod table;
pub mod user;

pub use cuisine::*;
pub use payment::*;
pub use preference::*;
pub use reservation::*;
pub use restaurant::*;
pub use review::*;
pub use status::*;
pub use table::*;
pub use user::*;
