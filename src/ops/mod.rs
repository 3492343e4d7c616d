pub mod aggregate;
pub mod guest_ops;
pub mod session;

pub use session::Session;
