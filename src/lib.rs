//! Hardware inventory API: CRUD routes over MySQL stored procedures, with one scoped
//! database session per call.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod session;
pub mod sql;
pub mod state;

pub use config::{DatabaseSettings, Settings};
pub use error::{AppError, ConfigError, SessionError};
pub use routes::{build_router, common_routes, hardware_routes};
pub use schemas::SchemaRegistry;
pub use service::HardwareService;
pub use session::{MySqlSessionSource, SessionManager, SessionSource, Timeouts};
pub use state::AppState;
