use thiserror::Error;

use crate::matcher::{AssignedPair, Token};
use crate::model::{TypeTag, Value};
use crate::schema::{ArgSpec, Schema};

/// A problem with the values of the arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The raw value does not convert to (or conform to) the declared type.
    #[error("'{raw}' cannot convert to {} for argument '{}'.", .arg.type_tag(), .arg.name())]
    TypeMismatch {
        /// The argument the value was meant for.
        arg: ArgSpec,
        /// The offending raw value.
        raw: String,
        /// The byte offset of the raw value.
        offset: usize,
    },

    /// A positional or switch argument which was named without a following value.
    #[error("No value provided for argument '{}'.", .arg.name())]
    MissingValue {
        /// The argument missing its value.
        arg: ArgSpec,
        /// The byte offset of the argument.
        offset: usize,
    },
}

/// A named pair after type conversion, produced by [`convert`].
///
/// `value = None` means the conversion did not succeed; [`check_convert`] reports why.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue<'t> {
    name: String,
    raw: Option<Token<'t>>,
    value: Option<Value>,
    offset: usize,
    positional: bool,
}

impl<'t> TypedValue<'t> {
    /// The argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw value token, if any.
    pub fn raw(&self) -> Option<&Token<'t>> {
        self.raw.as_ref()
    }

    /// The converted value, if conversion succeeded.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The byte offset of the argument.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the name was assigned by position.
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub(crate) fn into_named_value(self) -> (String, Option<Value>, bool) {
        (self.name, self.value, self.positional)
    }
}

/// Convert every pair's raw value into the schema's declared type.
///
/// * Names the schema does not declare are taken as optional text.
/// * A flag (optional boolean) written with no value becomes `true`, as does an undeclared name written with no value.
/// * Otherwise the raw value is converted via [`TypeTag::convert`].
pub fn convert<'t>(pairs: Vec<AssignedPair<'t>>, schema: &Schema) -> Vec<TypedValue<'t>> {
    pairs
        .into_iter()
        .map(|pair| {
            let (name, raw, offset, positional) = pair.into_parts();
            let spec = schema.get(&name);
            let value = match (&raw, spec) {
                (None, Some(spec)) if spec.is_optional() && spec.type_tag() == &TypeTag::Bool => {
                    Some(Value::Bool(true))
                }
                (None, None) => Some(Value::Bool(true)),
                (None, Some(_)) => None,
                (Some(token), Some(spec)) => spec.type_tag().convert(token.value()).ok(),
                (Some(token), None) => TypeTag::Text.convert(token.value()).ok(),
            };

            TypedValue {
                name,
                raw,
                value,
                offset,
                positional,
            }
        })
        .collect()
}

/// Detect the conversion errors in the values.
pub fn check_convert(values: &[TypedValue<'_>], schema: &Schema) -> Vec<ConvertError> {
    let mut errors = Vec::default();

    for typed in values {
        let spec = match schema.get(typed.name()) {
            Some(spec) => spec.clone(),
            // Undeclared names are optional text, which always converts.
            None => ArgSpec::switch(typed.name(), TypeTag::Text),
        };

        match (typed.value(), typed.raw()) {
            (Some(value), raw) => {
                if schema.contains(typed.name()) && !value.conforms(spec.type_tag()) {
                    errors.push(ConvertError::TypeMismatch {
                        raw: raw
                            .map(|token| token.value().to_string())
                            .unwrap_or_else(|| value.to_string()),
                        offset: raw.map(Token::offset).unwrap_or(typed.offset()),
                        arg: spec,
                    });
                }
            }
            (None, Some(raw)) => {
                errors.push(ConvertError::TypeMismatch {
                    arg: spec,
                    raw: raw.value().to_string(),
                    offset: raw.offset(),
                });
            }
            (None, None) => {
                errors.push(ConvertError::MissingValue {
                    arg: spec,
                    offset: typed.offset(),
                });
            }
        }
    }

    errors
}
