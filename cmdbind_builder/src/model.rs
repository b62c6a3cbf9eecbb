use std::str::FromStr;

use thiserror::Error;

/// The storage width of a numeric [`TypeTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
    /// Pointer sized (`isize`/`usize`).
    Size,
}

/// The declared type of an argument.
///
/// Each tag knows how to convert a raw token into a [`Value`] (see [`TypeTag::convert`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `true` or `false`, matched case-insensitively.
    Bool,
    /// A signed integer of the given width.
    Integer(Width),
    /// An unsigned integer of the given width.
    Unsigned(Width),
    /// A floating point number (`W32` or `W64`).
    Float(Width),
    /// A single character.
    Char,
    /// Any text, taken verbatim.
    Text,
    /// One of a fixed set of words, matched case-insensitively.
    Choice(Vec<String>),
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Integer(width) => write!(f, "i{}", width_suffix(width)),
            TypeTag::Unsigned(width) => write!(f, "u{}", width_suffix(width)),
            TypeTag::Float(Width::W32) => write!(f, "f32"),
            TypeTag::Float(_) => write!(f, "f64"),
            TypeTag::Char => write!(f, "char"),
            TypeTag::Text => write!(f, "string"),
            TypeTag::Choice(choices) => write!(f, "{{{}}}", choices.join(", ")),
        }
    }
}

fn width_suffix(width: &Width) -> &'static str {
    match width {
        Width::W8 => "8",
        Width::W16 => "16",
        Width::W32 => "32",
        Width::W64 => "64",
        Width::Size => "size",
    }
}

/// A raw token that could not be converted into its declared type.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_tag}.")]
pub struct InvalidConversion {
    /// The offending raw token.
    pub token: String,
    /// The type the token was meant to convert into.
    pub type_tag: TypeTag,
}

impl TypeTag {
    /// Convert a raw token into a value of this type.
    ///
    /// ### Example
    /// ```
    /// # use cmdbind_builder as cmdbind;
    /// use cmdbind::{TypeTag, Value, Width};
    ///
    /// assert_eq!(TypeTag::Integer(Width::W32).convert("-7").unwrap(), Value::Integer(-7));
    /// assert_eq!(TypeTag::Bool.convert("TRUE").unwrap(), Value::Bool(true));
    /// assert!(TypeTag::Unsigned(Width::W8).convert("256").is_err());
    /// ```
    pub fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        let value = match self {
            TypeTag::Bool => parse_bool(token).map(Value::Bool),
            TypeTag::Integer(width) => match width {
                Width::W8 => parse_as::<i8>(token).map(i64::from),
                Width::W16 => parse_as::<i16>(token).map(i64::from),
                Width::W32 => parse_as::<i32>(token).map(i64::from),
                Width::W64 => parse_as::<i64>(token),
                Width::Size => parse_as::<isize>(token).and_then(|v| i64::try_from(v).ok()),
            }
            .map(Value::Integer),
            TypeTag::Unsigned(width) => match width {
                Width::W8 => parse_as::<u8>(token).map(u64::from),
                Width::W16 => parse_as::<u16>(token).map(u64::from),
                Width::W32 => parse_as::<u32>(token).map(u64::from),
                Width::W64 => parse_as::<u64>(token),
                Width::Size => parse_as::<usize>(token).and_then(|v| u64::try_from(v).ok()),
            }
            .map(Value::Unsigned),
            TypeTag::Float(Width::W32) => parse_as::<f32>(token).map(|v| Value::Float(v.into())),
            TypeTag::Float(_) => parse_as::<f64>(token).map(Value::Float),
            TypeTag::Char => parse_as::<char>(token).map(Value::Char),
            TypeTag::Text => Some(Value::Text(token.to_string())),
            TypeTag::Choice(choices) => choices
                .iter()
                .find(|choice| choice.eq_ignore_ascii_case(token))
                .map(|choice| Value::Text(choice.clone())),
        };

        value.ok_or_else(|| InvalidConversion {
            token: token.to_string(),
            type_tag: self.clone(),
        })
    }
}

/// Whether the token is a boolean literal (`true`/`false`, in any case).
pub(crate) fn is_boolean_literal(token: &str) -> bool {
    parse_bool(token).is_some()
}

fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_as<T: FromStr>(token: &str) -> Option<T> {
    T::from_str(token).ok()
}

/// A converted argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// Any signed integer, widened to 64 bits.
    Integer(i64),
    /// Any unsigned integer, widened to 64 bits.
    Unsigned(u64),
    /// Any float, widened to 64 bits.
    Float(f64),
    /// A single character.
    Char(char),
    /// Text, including the canonical spelling of a choice.
    Text(String),
}

impl Value {
    /// Check whether this value is a valid inhabitant of the type.
    pub fn conforms(&self, type_tag: &TypeTag) -> bool {
        match (self, type_tag) {
            (Value::Bool(_), TypeTag::Bool) => true,
            (Value::Integer(v), TypeTag::Integer(width)) => match width {
                Width::W8 => i8::try_from(*v).is_ok(),
                Width::W16 => i16::try_from(*v).is_ok(),
                Width::W32 => i32::try_from(*v).is_ok(),
                Width::W64 => true,
                Width::Size => isize::try_from(*v).is_ok(),
            },
            (Value::Unsigned(v), TypeTag::Unsigned(width)) => match width {
                Width::W8 => u8::try_from(*v).is_ok(),
                Width::W16 => u16::try_from(*v).is_ok(),
                Width::W32 => u32::try_from(*v).is_ok(),
                Width::W64 => true,
                Width::Size => usize::try_from(*v).is_ok(),
            },
            (Value::Float(_), TypeTag::Float(_)) => true,
            (Value::Char(_), TypeTag::Char) => true,
            (Value::Text(_), TypeTag::Text) => true,
            (Value::Text(t), TypeTag::Choice(choices)) => choices.contains(t),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Unsigned(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
        }
    }
}
