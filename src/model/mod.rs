pub mod config;
pub mod field;
pub mod guest;
pub mod table;

pub use config::*;
pub use field::{Column, FieldError, FieldKind, LEGACY_ACCOMMODATION};
pub use guest::*;
pub use table::*;
