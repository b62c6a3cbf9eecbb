//! `cmdbind` is a typed command line evaluator for Rust.
//!
//! Given a single line of text (as typed at a REPL, or passed as program arguments), `cmdbind` parses it against the argument schema of a named command, and dispatches the typed arguments to that command's handler.
//! The schema may be declared by hand, or derived from the handler's own function signature via [`#[command]`](./derive/index.html).
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/calculator.rs")]
//! ```
//!
//! This generates the following REPL:
//! ```console
//! help
//! usage: div A B
//! usage: greet NAME [--title TITLE]
//! usage: plus A B [-c C] [--invert]
//! plus 1 2
//! 3
//! plus 1 2 -c 3 --invert
//! -6
//! greet Ada --title Countess
//! Hello, Countess Ada!
//! div 1 0
//! Handler 'div' failed: cannot divide by zero
//! plus 1 x
//! Parse error: 'x' cannot convert to i64 for argument 'b'.
//! plus 1 x
//!        ^
//! ```
//!
//! # Pipeline
//! The text following the command name passes through four stages.
//! Each stage reports *every* error it finds, but the first stage to fail halts the parse.
//! 1. *Lex*: split the text on whitespace, keeping `"quoted text"` together.
//! An unterminated quote is kept as-is, unless [`Config::strict_quotes`] is set.
//! 2. *Classify*: group the tokens into names (`--name`, `-n`) and their values.
//! Any unquoted token starting with `-` is a name, so `-5` names the argument `5`; quote it (`"-5"`) to pass a negative number.
//! 3. *Assign*: name the unnamed values, in the schema's declaration order of positional arguments.
//! Missing required arguments, extra arguments, and duplicates are reported here.
//! 4. *Convert*: convert each raw value into the declared type of its argument.
//!
//! The errors carry byte offsets into the evaluated line, which [`DispatchError::error_context`] renders as a caret under the text.
//!
//! # Schema
//! A [`Schema`] is an ordered list of [`ArgSpec`]s, each of which takes one of three kinds:
//! ```console
//! Kind        | Syntax          | Absent
//! --------------------------------------------------
//! Positional  | VALUE           | Missing required argument.
//! Flag        | [--name]        | false
//! Switch      | [--name VALUE]  | None (or the default)
//! ```
//!
//! Any argument may also be supplied by name; the positional arguments are simply also assignable by position.
//! A command registered without a schema accepts any arguments: unnamed values are named `"0"`, `"1"`, .., and all values are kept as text.
//!
//! # Handlers
//! A handler receives the typed [`Arguments`], as well as the output and error [`Sinks`].
//! Handlers may be registered as closures via [`Registry::register`], or as [`Handler`] implementations via [`Registry::install`].
//!
//! # Features
//! * `tracing_debug`: Emit `debug!` traces of each pipeline stage.
pub mod derive;
pub use cmdbind_builder::*;
