use std::fmt::Display;
use std::io::{self, Write};
use thiserror::Error;

use crate::api::Signature;
use crate::model::TypeTag;
use crate::parser::Arguments;

/// A failure raised while a handler runs.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler asked for an argument which was not provided.
    #[error("Missing argument '{0}'.")]
    MissingArgument(String),

    /// The handler asked for an argument as a type it does not convert to.
    #[error("Argument '{name}' is not a valid {expected}.")]
    InvalidArgument {
        /// The argument name.
        name: String,
        /// The type the handler asked for.
        expected: TypeTag,
    },

    /// The handler itself reported a failure.
    #[error("{0}")]
    Failed(String),

    /// Writing to a sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HandlerError {
    /// Report a handler failure by its message.
    pub fn failed(error: impl Display) -> Self {
        HandlerError::Failed(error.to_string())
    }
}

/// The output and error streams injected into a handler for the duration of one evaluation.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::Sinks;
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut error: Vec<u8> = Vec::new();
/// let mut sinks = Sinks::new(&mut output, &mut error);
/// sinks.emit(4).unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), "4\n");
/// ```
pub struct Sinks<'s> {
    output: &'s mut dyn Write,
    error: &'s mut dyn Write,
}

impl<'s> Sinks<'s> {
    /// Wrap the output and error streams.
    pub fn new(output: &'s mut dyn Write, error: &'s mut dyn Write) -> Self {
        Self { output, error }
    }

    /// The output stream.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// The error stream.
    pub fn error(&mut self) -> &mut dyn Write {
        &mut *self.error
    }

    /// Both streams at once, as (output, error).
    pub fn split(&mut self) -> (&mut dyn Write, &mut dyn Write) {
        (&mut *self.output, &mut *self.error)
    }

    /// Write the formatted value and a newline to the output stream.
    pub fn emit(&mut self, value: impl Display) -> Result<(), io::Error> {
        writeln!(self.output, "{value}")
    }
}

/// Behaviour of a command which declares its own signature.
///
/// Typically implemented via `#[command]`, but may be implemented by hand.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::prelude::*;
/// use cmdbind::{Arguments, HandlerError, Parameter, Registry, Signature, Sinks, TypeTag, Width};
///
/// struct Plus;
///
/// impl Handler for Plus {
///     const NAME: &'static str = "plus";
///
///     fn signature() -> Signature {
///         Signature::new()
///             .parameter(Parameter::required("a", TypeTag::Integer(Width::W32)))
///             .parameter(Parameter::required("b", TypeTag::Integer(Width::W32)))
///     }
///
///     fn invoke(arguments: &Arguments, sinks: &mut Sinks<'_>) -> Result<(), HandlerError> {
///         let a: i32 = arguments.required("a")?;
///         let b: i32 = arguments.required("b")?;
///         sinks.emit(a + b)?;
///         Ok(())
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.install::<Plus>().unwrap();
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut error: Vec<u8> = Vec::new();
/// registry
///     .evaluate("plus 2 2", &mut Sinks::new(&mut output, &mut error))
///     .unwrap();
/// assert_eq!(String::from_utf8(output).unwrap(), "4\n");
/// ```
pub trait Handler {
    /// The default command name.
    const NAME: &'static str;

    /// The handler's parameters, from which the schema is derived.
    fn signature() -> Signature;

    /// Run the handler against the parsed arguments.
    fn invoke(arguments: &Arguments, sinks: &mut Sinks<'_>) -> Result<(), HandlerError>;
}
