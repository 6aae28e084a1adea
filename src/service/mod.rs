//! Hardware operations over stored procedures, plus request validation.

mod hardware;
pub mod procedures;
mod validation;
pub use hardware::HardwareService;
pub use validation::{FieldKind, RequestValidator, ValidationRule};
