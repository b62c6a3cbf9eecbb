mod arguments;
mod base;
mod convert;
mod error;
mod middleware;
mod printer;

pub use arguments::*;
pub use base::*;
pub use convert::*;
pub use error::*;
pub use middleware::DispatchError;
pub(crate) use middleware::split_command;
pub use printer::ErrorContext;
pub(crate) use printer::Printer;
