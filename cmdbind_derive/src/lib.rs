extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveCommand;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Bind a plain function as a command handler.
///
/// Generates a unit struct `<FunctionName>Command` which implements `cmdbind::Handler`, leaving the function itself untouched.
/// The command name defaults to the function name, and may be overridden with `#[command(name = "..")]`.
///
/// Parameters map onto the command line as follows:
/// * `&mut dyn Write`: a sink, output then error; these must lead the parameter list.
/// * `bool`: a flag (`--name`), which is `false` when absent.
/// * `Option<T>`: a switch (`--name VALUE`), which is `None` when absent.
/// * `#[arg(default = ..)] T`: a switch, which takes the default when absent.
/// * `T` (or `#[arg(positional)] bool`): a positional argument.
///
/// A `T: Display` return value is written to the output sink (`Option<T>` only when `Some`).
/// An `Err(E: Display)` return fails the handler.
#[proc_macro_attribute]
pub fn command(attribute: TokenStream, item: TokenStream) -> TokenStream {
    let function = syn::parse_macro_input!(item as syn::ItemFn);

    match DeriveCommand::try_from((TokenStream2::from(attribute), function)) {
        Ok(command) => TokenStream2::from(command).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
