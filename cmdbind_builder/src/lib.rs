//! Builder module for `cmdbind`.
//! See [documentation root](https://docs.rs/cmdbind/latest/cmdbind/index.html) for full details.
//!
//! A command line passes through four stages, each of which may halt the parse with every error it found:
//! 1. [`lex`]: split the text into tokens.
//! 2. [`classify`]: group the tokens into (name, value) pairs.
//! 3. [`assign`]: name the unnamed (positional) pairs.
//! 4. [`convert`]: convert each raw value into its declared type.
//!
//! The [`Registry`] ties this pipeline to a set of named commands.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;
mod schema;

pub use api::*;
pub use matcher::*;
pub use model::*;
pub use parser::*;
pub use schema::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
