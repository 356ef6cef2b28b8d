pub mod json;
pub mod session;

pub use json::{ApiJson, ApiPath, ApiQuery};
pub use session::SessionContext;
