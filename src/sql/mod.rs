pub mod builder;
pub mod params;

pub use builder::{QueryBuf, UpdateBuilder};
pub use params::PgBindValue;
