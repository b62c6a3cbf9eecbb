/// How a token was delimited in the command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// A run of non-whitespace characters.
    Bare,
    /// A `"`-delimited run; the quotes are stripped.
    Closed,
    /// A run starting with `"` that has no closing `"`; kept verbatim.
    Unterminated,
}

/// A slice of the command text, produced by [`lex`](crate::lex).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    value: &'t str,
    offset: usize,
    quoting: Quoting,
}

impl<'t> Token<'t> {
    pub(crate) fn new(value: &'t str, offset: usize, quoting: Quoting) -> Self {
        Self {
            value,
            offset,
            quoting,
        }
    }

    /// The token text, without any surrounding quotes.
    pub fn value(&self) -> &'t str {
        self.value
    }

    /// The byte offset of the token value in the command text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// How the token was delimited.
    pub fn quoting(&self) -> Quoting {
        self.quoting
    }
}

/// An (optional name, optional value) pair, produced by [`classify`](crate::classify).
///
/// `name = None` is a yet-unnamed positional value.
/// `value = None` is a flag or switch referenced without a following value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair<'t> {
    name: Option<String>,
    value: Option<Token<'t>>,
    offset: usize,
}

impl<'t> RawPair<'t> {
    pub(crate) fn named(name: impl Into<String>, value: Option<Token<'t>>, offset: usize) -> Self {
        Self {
            name: Some(name.into()),
            value,
            offset,
        }
    }

    pub(crate) fn unnamed(value: Token<'t>) -> Self {
        Self {
            name: None,
            offset: value.offset(),
            value: Some(value),
        }
    }

    /// The name, when the pair was introduced by a `-`/`--` token.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The value token, if any.
    pub fn value(&self) -> Option<&Token<'t>> {
        self.value.as_ref()
    }

    /// The byte offset of the first token in the pair.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// A [`RawPair`] which has been given a name, produced by [`assign`](crate::assign).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedPair<'t> {
    name: String,
    value: Option<Token<'t>>,
    offset: usize,
    positional: bool,
}

impl<'t> AssignedPair<'t> {
    pub(crate) fn named(pair: RawPair<'t>, name: String, positional: bool) -> Self {
        let RawPair { value, offset, .. } = pair;
        Self {
            name,
            value,
            offset,
            positional,
        }
    }

    /// The name of the pair.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value token, if any.
    pub fn value(&self) -> Option<&Token<'t>> {
        self.value.as_ref()
    }

    /// The byte offset of the first token in the pair.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the name was assigned by position (rather than written on the command line).
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub(crate) fn into_parts(self) -> (String, Option<Token<'t>>, usize, bool) {
        (self.name, self.value, self.offset, self.positional)
    }
}
