//! Restaurant reservation REST backend: users, restaurants, tables, reservations, payments, reviews, cuisines and preferences over Postgres.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use extractors::SessionContext;
pub use response::{ApiResponse, Envelope};
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, run_migrations};
