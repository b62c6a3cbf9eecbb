use std::io;
use thiserror::Error;

use crate::api::HandlerError;
use crate::parser::error::ParseFailure;
use crate::parser::printer::ErrorContext;

/// A failure to evaluate a command line.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The line holds no command name.
    #[error("Dispatch error: empty command line.")]
    EmptyLine,

    /// The command name is not registered.
    #[error("Dispatch error: unknown command '{name}'.")]
    UnknownCommand {
        /// The command name as written.
        name: String,
        /// The byte offset of the command name.
        offset: usize,
    },

    /// The arguments do not parse against the command's schema.
    #[error("{failure}")]
    Parse {
        /// The command name.
        command: String,
        /// Every error of the failing parse stage.
        #[source]
        failure: ParseFailure,
    },

    /// The handler ran, and failed.
    #[error("Handler '{command}' failed: {source}")]
    HandlerInvocationFailed {
        /// The command name.
        command: String,
        /// Why the handler failed.
        source: HandlerError,
    },

    /// Writing the handler's result to the output sink failed.
    #[error(transparent)]
    Output(#[from] io::Error),
}

impl DispatchError {
    /// The byte offset into the evaluated line, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DispatchError::UnknownCommand { offset, .. } => Some(*offset),
            DispatchError::Parse { failure, .. } => failure.offset(),
            _ => None,
        }
    }

    /// Point at the error within the evaluated line, if the location is known.
    ///
    /// ### Example
    /// ```
    /// # use cmdbind_builder as cmdbind;
    /// use cmdbind::{Registry, Sinks};
    ///
    /// let registry = Registry::new();
    /// let mut output: Vec<u8> = Vec::new();
    /// let mut error: Vec<u8> = Vec::new();
    /// let line = "  nope 1";
    /// let failure = registry
    ///     .evaluate(line, &mut Sinks::new(&mut output, &mut error))
    ///     .unwrap_err();
    ///
    /// assert_eq!(failure.error_context(line).unwrap().to_string(), "  nope 1\n  ^");
    /// ```
    pub fn error_context(&self, line: &str) -> Option<ErrorContext> {
        self.offset().map(|offset| ErrorContext::new(line, offset))
    }
}

/// Split the line into the command name (with its byte offset) and the remainder.
///
/// The remainder starts right after the command name, so its offsets are rebased by the returned base.
pub(crate) fn split_command(line: &str) -> Option<(&str, usize, &str, usize)> {
    let trimmed = line.trim_start();

    if trimmed.is_empty() {
        return None;
    }

    let offset = line.len() - trimmed.len();
    let end = trimmed
        .find(char::is_whitespace)
        .unwrap_or(trimmed.len());
    let base = offset + end;

    Some((&trimmed[..end], offset, &line[base..], base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::AssignError;
    use crate::model::TypeTag;
    use crate::parser::error::Stage;
    use crate::schema::ArgSpec;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("plus", Some(("plus", 0, "", 4)))]
    #[case("plus 2 2", Some(("plus", 0, " 2 2", 4)))]
    #[case("  plus\t2", Some(("plus", 2, "\t2", 6)))]
    fn split(#[case] line: &str, #[case] expected: Option<(&str, usize, &str, usize)>) {
        assert_eq!(split_command(line), expected);
    }

    #[test]
    fn dispatch_error_offset() {
        // Setup
        let unknown = DispatchError::UnknownCommand {
            name: "x".to_string(),
            offset: 3,
        };
        let parse = DispatchError::Parse {
            command: "f".to_string(),
            failure: ParseFailure::new(
                Stage::Assign,
                vec![AssignError::MissingRequired {
                    arg: ArgSpec::positional("a", TypeTag::Text),
                }
                .into()],
            ),
        };

        // Execute & verify
        assert_eq!(unknown.offset(), Some(3));
        assert_eq!(parse.offset(), None);
        assert_eq!(DispatchError::EmptyLine.offset(), None);
        assert_eq!(
            parse.to_string(),
            "Parse error: Missing required argument 'a'."
        );
    }

    #[test]
    fn dispatch_error_display() {
        // Setup
        let error = DispatchError::HandlerInvocationFailed {
            command: "div".to_string(),
            source: HandlerError::failed("division by zero"),
        };

        // Execute & verify
        assert_eq!(error.to_string(), "Handler 'div' failed: division by zero");
        assert_eq!(
            DispatchError::UnknownCommand {
                name: "x".to_string(),
                offset: 0
            }
            .to_string(),
            "Dispatch error: unknown command 'x'."
        );
    }
}
