//! Positional stored-procedure calls: descriptors, bind values, row decoding.

pub mod params;
mod procedure;
mod row;
pub use params::*;
pub use procedure::*;
pub use row::row_to_json;
pub(crate) use procedure::out_param_rows;
