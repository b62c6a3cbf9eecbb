use std::collections::HashSet;

use thiserror::Error;

use crate::constant::{LONG_PREFIX, SHORT_PREFIX};
use crate::matcher::model::{Quoting, RawPair, Token};
use crate::model::is_boolean_literal;

/// A problem with the arrangement of tokens.
///
/// Classification accepts every token stream, so this has no inhabitants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {}

/// Group the tokens into (name, value) pairs.
///
/// * An unquoted token starting with `-` (or `--`) is a *name token*; its name is the token without the dashes.
///   A quoted token is always a value, so `"-5"` passes a negative number.
/// * A name token in `flag_names` forms a pair by itself, unless the next token is a boolean literal, which then becomes its value.
/// * Any other name token takes the next token as its value, if there is one and it isn't itself a name token.
/// * Every other token is a positional value with no name.
///
/// Name tokens always start a new pair, so a value is never absorbed by a neighbouring pair.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{classify, lex};
/// use std::collections::HashSet;
///
/// let tokens = lex("--f --g v");
/// let pairs = classify(&tokens, &HashSet::from(["f".to_string()]));
/// let simple: Vec<(Option<&str>, Option<&str>)> = pairs
///     .iter()
///     .map(|p| (p.name(), p.value().map(|t| t.value())))
///     .collect();
/// assert_eq!(simple, vec![(Some("f"), None), (Some("g"), Some("v"))]);
/// ```
pub fn classify<'t>(tokens: &[Token<'t>], flag_names: &HashSet<String>) -> Vec<RawPair<'t>> {
    let mut pairs = Vec::default();
    let mut token_iter = tokens.iter().peekable();

    while let Some(token) = token_iter.next() {
        match name_of(token) {
            Some(name) if flag_names.contains(name) => {
                // An explicit boolean literal always binds to the flag (`--verbose true`).
                let value = token_iter
                    .next_if(|next| is_boolean_literal(next.value()))
                    .copied();
                pairs.push(RawPair::named(name, value, token.offset()));
            }
            Some(name) => {
                let value = token_iter
                    .next_if(|next| name_of(next).is_none())
                    .copied();
                pairs.push(RawPair::named(name, value, token.offset()));
            }
            None => {
                pairs.push(RawPair::unnamed(*token));
            }
        }
    }

    pairs
}

/// Detect the classification errors in the pairs.
pub fn check_classify(_pairs: &[RawPair<'_>]) -> Vec<ClassifyError> {
    Vec::default()
}

fn name_of<'t>(token: &Token<'t>) -> Option<&'t str> {
    if token.quoting() == Quoting::Closed {
        return None;
    }

    let value = token.value();
    value
        .strip_prefix(LONG_PREFIX)
        .or_else(|| value.strip_prefix(SHORT_PREFIX))
}
