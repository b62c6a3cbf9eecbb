use thiserror::Error;

use crate::constant::QUOTE;
use crate::matcher::model::{Quoting, Token};
use crate::parser::Config;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A problem with the shape of the command text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A `"` which is never closed (only reported under [`Config::strict_quotes`]).
    #[error("Unterminated quote in '{token}'.")]
    UnterminatedQuote {
        /// The token, including its opening quote.
        token: String,
        /// The byte offset of the opening quote.
        offset: usize,
    },
}

/// Split the command text into tokens.
///
/// Tokens are separated by runs of whitespace.
/// A `"`-delimited run is a single token (including any whitespace inside it), with the quotes stripped.
/// There are no escape sequences; a `"` cannot appear inside a quoted token.
/// An opening `"` without a matching close is tolerated: the token is taken up to the next whitespace, verbatim.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::lex;
///
/// let tokens: Vec<&str> = lex(r#"a "b c" d"#).iter().map(|t| t.value()).collect();
/// assert_eq!(tokens, vec!["a", "b c", "d"]);
/// ```
pub fn lex(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::default();
    let mut position = 0;

    while position < text.len() {
        let remainder = text[position..].trim_start();

        if remainder.is_empty() {
            break;
        }

        let start = text.len() - remainder.len();

        if let Some(quoted) = remainder.strip_prefix(QUOTE) {
            if let Some(end) = quoted.find(QUOTE) {
                let offset = start + QUOTE.len_utf8();
                tokens.push(Token::new(&quoted[..end], offset, Quoting::Closed));
                position = offset + end + QUOTE.len_utf8();
                continue;
            }
        }

        let end = remainder
            .find(char::is_whitespace)
            .unwrap_or(remainder.len());
        let quoting = if remainder.starts_with(QUOTE) {
            Quoting::Unterminated
        } else {
            Quoting::Bare
        };
        tokens.push(Token::new(&remainder[..end], start, quoting));
        position = start + end;
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Lexed {} tokens from '{text}'.", tokens.len());
    }

    tokens
}

/// Detect the lexing errors in the tokens.
pub fn check_lex(tokens: &[Token<'_>], config: &Config) -> Vec<LexError> {
    if !config.is_strict_quotes() {
        return Vec::default();
    }

    tokens
        .iter()
        .filter(|token| token.quoting() == Quoting::Unterminated)
        .map(|token| LexError::UnterminatedQuote {
            token: token.value().to_string(),
            offset: token.offset(),
        })
        .collect()
}
