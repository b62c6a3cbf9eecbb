use thiserror::Error;

use crate::matcher::{AssignError, ClassifyError, LexError};
use crate::parser::convert::ConvertError;
use crate::schema::ArgSpec;

/// The stages of the parse pipeline, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Splitting the text into tokens.
    Lex,
    /// Grouping tokens into (name, value) pairs.
    Classify,
    /// Naming the unnamed pairs.
    Assign,
    /// Converting the values to their declared types.
    Convert,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lex => write!(f, "lex"),
            Stage::Classify => write!(f, "classify"),
            Stage::Assign => write!(f, "assign"),
            Stage::Convert => write!(f, "convert"),
        }
    }
}

/// Exactly one failure, from one stage of the parse pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// See [`LexError`].
    #[error(transparent)]
    Lex(#[from] LexError),
    /// See [`ClassifyError`].
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    /// See [`AssignError`].
    #[error(transparent)]
    Assign(#[from] AssignError),
    /// See [`ConvertError`].
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl ParseError {
    /// The stage which produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            ParseError::Lex(_) => Stage::Lex,
            ParseError::Classify(_) => Stage::Classify,
            ParseError::Assign(_) => Stage::Assign,
            ParseError::Convert(_) => Stage::Convert,
        }
    }

    /// The declared argument involved, if any.
    pub fn arg(&self) -> Option<&ArgSpec> {
        match self {
            ParseError::Assign(AssignError::MissingRequired { arg })
            | ParseError::Convert(ConvertError::TypeMismatch { arg, .. })
            | ParseError::Convert(ConvertError::MissingValue { arg, .. }) => Some(arg),
            _ => None,
        }
    }

    /// The argument name as written (or synthesized), if any.
    pub fn raw_name(&self) -> Option<&str> {
        match self {
            ParseError::Assign(AssignError::UnexpectedArgument { name, .. })
            | ParseError::Assign(AssignError::Duplicate { name, .. }) => Some(name),
            _ => self.arg().map(ArgSpec::name),
        }
    }

    /// The raw value involved, if any.
    pub fn raw_value(&self) -> Option<&str> {
        match self {
            ParseError::Lex(LexError::UnterminatedQuote { token, .. }) => Some(token),
            ParseError::Assign(AssignError::UnexpectedArgument { value, .. }) => value.as_deref(),
            ParseError::Convert(ConvertError::TypeMismatch { raw, .. }) => Some(raw),
            _ => None,
        }
    }

    /// The byte offset into the parsed text, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Lex(LexError::UnterminatedQuote { offset, .. })
            | ParseError::Assign(AssignError::UnexpectedArgument { offset, .. })
            | ParseError::Assign(AssignError::Duplicate { offset, .. })
            | ParseError::Convert(ConvertError::TypeMismatch { offset, .. })
            | ParseError::Convert(ConvertError::MissingValue { offset, .. }) => Some(*offset),
            _ => None,
        }
    }

    fn offset_mut(&mut self) -> Option<&mut usize> {
        match self {
            ParseError::Lex(LexError::UnterminatedQuote { offset, .. })
            | ParseError::Assign(AssignError::UnexpectedArgument { offset, .. })
            | ParseError::Assign(AssignError::Duplicate { offset, .. })
            | ParseError::Convert(ConvertError::TypeMismatch { offset, .. })
            | ParseError::Convert(ConvertError::MissingValue { offset, .. }) => Some(offset),
            _ => None,
        }
    }
}

/// Every error produced by the first failing stage of the parse pipeline.
///
/// Later stages never run once a stage fails, so all the errors share the same [`Stage`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Parse error: {}", join(.errors))]
pub struct ParseFailure {
    stage: Stage,
    errors: Vec<ParseError>,
}

fn join(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ParseFailure {
    pub(crate) fn new(stage: Stage, errors: Vec<ParseError>) -> Self {
        debug_assert!(!errors.is_empty());
        debug_assert!(errors.iter().all(|e| e.stage() == stage));
        Self { stage, errors }
    }

    /// The stage which failed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The errors of the failing stage (never empty).
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The smallest known offset amongst the errors.
    pub fn offset(&self) -> Option<usize> {
        self.errors.iter().filter_map(ParseError::offset).min()
    }

    /// Shift every offset, when the parsed text was a suffix of a longer line.
    pub(crate) fn rebase(mut self, base: usize) -> Self {
        for error in &mut self.errors {
            if let Some(offset) = error.offset_mut() {
                *offset += base;
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeTag, Width};

    fn failure() -> ParseFailure {
        ParseFailure::new(
            Stage::Assign,
            vec![
                AssignError::UnexpectedArgument {
                    name: "0".to_string(),
                    value: Some("x".to_string()),
                    offset: 6,
                }
                .into(),
                AssignError::MissingRequired {
                    arg: ArgSpec::positional("b", TypeTag::Integer(Width::W32)),
                }
                .into(),
            ],
        )
    }

    #[test]
    fn parse_failure_display() {
        assert_eq!(
            failure().to_string(),
            "Parse error: Unexpected argument '0'. Missing required argument 'b'."
        );
    }

    #[test]
    fn parse_failure_rebase() {
        // Execute
        let failure = failure().rebase(5);

        // Verify
        assert_eq!(failure.stage(), Stage::Assign);
        assert_eq!(failure.offset(), Some(11));
        assert_eq!(failure.errors()[1].offset(), None);
    }

    #[test]
    fn parse_error_accessors() {
        // Setup
        let failure = failure();
        let [unexpected, missing] = failure.errors() else {
            panic!("expected two errors");
        };

        // Verify
        assert_eq!(unexpected.stage(), Stage::Assign);
        assert_eq!(unexpected.raw_name(), Some("0"));
        assert_eq!(unexpected.raw_value(), Some("x"));
        assert_eq!(unexpected.arg(), None);
        assert_eq!(missing.raw_name(), Some("b"));
        assert_eq!(missing.raw_value(), None);
        assert_eq!(
            missing.arg(),
            Some(&ArgSpec::positional("b", TypeTag::Integer(Width::W32)))
        );
    }

    #[test]
    fn parse_error_convert_accessors() {
        // Setup
        let error: ParseError = ConvertError::TypeMismatch {
            arg: ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
            raw: "abc".to_string(),
            offset: 3,
        }
        .into();

        // Verify
        assert_eq!(error.stage(), Stage::Convert);
        assert_eq!(error.raw_name(), Some("a"));
        assert_eq!(error.raw_value(), Some("abc"));
        assert_eq!(error.offset(), Some(3));
    }
}
