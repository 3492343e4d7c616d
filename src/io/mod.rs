pub mod config_io;
pub mod lock;
pub mod migrate;
pub mod recovery;
pub mod store;

pub use store::{Store, StoreError, export_csv};
