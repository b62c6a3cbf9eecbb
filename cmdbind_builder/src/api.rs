mod capture;
mod core;
mod handler;
mod signature;

pub use self::core::*;
pub use capture::Argument;
pub(crate) use capture::extract;
pub use handler::*;
pub use signature::*;
