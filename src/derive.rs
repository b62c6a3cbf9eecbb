//! Derive Api for `cmdbind` handlers.
//!
//! ### Getting Started
//! Instrument a plain function with `#[command]`.
//! This generates a unit struct `<FunctionName>Command` implementing [`Handler`](../trait.Handler.html), which may be installed via [`Registry::install`](../struct.Registry.html#method.install).
//! The schema of the command is derived from the function's own parameter list.
//!
//! ```
//! use cmdbind::derive::*;
//! use cmdbind::{Registry, Sinks};
//!
//! #[command]
//! fn plus(a: i32, b: i32, #[arg(default = 0)] c: i32, invert: bool) -> i32 {
//!     let sum = a + b + c;
//!     if invert { -sum } else { sum }
//! }
//!
//! let mut registry = Registry::new();
//! registry.install::<PlusCommand>().unwrap();
//! assert_eq!(registry.usage("plus").unwrap(), "usage: plus A B [-c C] [--invert]");
//!
//! let mut output: Vec<u8> = Vec::new();
//! let mut error: Vec<u8> = Vec::new();
//! registry
//!     .evaluate("plus 1 2 -c 3 --invert", &mut Sinks::new(&mut output, &mut error))
//!     .unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "-6\n");
//! ```
//!
//! ### Parameter Configuration
//! The implicit inference uses the following rules:
//! ```console
//! Type            | Parameter
//! ---------------------------------------------------
//! &mut dyn Write  | Parameter::output() / Parameter::error()
//! bool            | Parameter::defaulted(.., TypeTag::Bool)   (flag)
//! Option<T>       | Parameter::nullable(..)                   (switch)
//! T               | Parameter::required(..)                   (positional)
//! ```
//!
//! The sink parameters must lead the parameter list: the first is the output sink, and the (optional) second is the error sink.
//!
//! The explicit parameter attributes are:
//! * `#[arg(default = EXPR)]` to use `Parameter::defaulted(..)`, taking `EXPR` when the argument is absent.
//! * `#[arg(positional)]` to use `Parameter::required(..)`; this is only meaningful for `bool`.
//!
//! The command attribute takes `#[command(name = "..")]` to register under a name other than the function's.
//!
//! ### Return Values
//! ```console
//! Type               | Effect
//! ----------------------------------------------------------------
//! ()                 | nothing
//! T: Display         | written to the output sink
//! Option<T>          | written to the output sink when `Some`
//! Result<(), E>      | `Err` fails the handler
//! Result<T, E>       | `Ok` written to the output sink; `Err` fails the handler
//! ```
pub use cmdbind_derive::command;
