use std::collections::HashMap;

use crate::api::{extract, Argument, HandlerError};
use crate::model::Value;
use crate::parser::convert::TypedValue;

/// The typed, named arguments of one parsed command line.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{parse, ArgSpec, Schema, TypeTag, Width};
///
/// let schema = Schema::new([
///     ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
///     ArgSpec::flag("invert"),
///     ArgSpec::switch("c", TypeTag::Integer(Width::W32)),
/// ])
/// .unwrap();
/// let arguments = parse("2 --invert", &schema).unwrap();
///
/// assert_eq!(arguments.required::<i32>("a").unwrap(), 2);
/// assert_eq!(arguments.flag("invert").unwrap(), true);
/// assert_eq!(arguments.optional::<i32>("c").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<String, Value>,
    positional: Vec<String>,
}

impl Arguments {
    pub(crate) fn from_typed(values: Vec<TypedValue<'_>>) -> Self {
        let mut arguments = Self::default();

        for typed in values {
            let (name, value, positional) = typed.into_named_value();

            if let Some(value) = value {
                if positional {
                    arguments.positional.push(name.clone());
                }

                arguments.values.insert(name, value);
            }
        }

        arguments
    }

    /// Get the value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether the argument was provided.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of arguments provided.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments were provided.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the (name, value) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Get the argument as `T`, failing when it is absent.
    pub fn required<T: Argument>(&self, name: &str) -> Result<T, HandlerError> {
        self.optional(name)?
            .ok_or_else(|| HandlerError::MissingArgument(name.to_string()))
    }

    /// Get the argument as `T`, if it was provided.
    pub fn optional<T: Argument>(&self, name: &str) -> Result<Option<T>, HandlerError> {
        match self.values.get(name) {
            Some(value) => extract::<T>(value)
                .map(Some)
                .ok_or_else(|| HandlerError::InvalidArgument {
                    name: name.to_string(),
                    expected: T::type_tag(),
                }),
            None => Ok(None),
        }
    }

    /// Get the flag, which is `false` when absent.
    pub fn flag(&self, name: &str) -> Result<bool, HandlerError> {
        Ok(self.optional::<bool>(name)?.unwrap_or(false))
    }

    /// Get the `index`-th argument which was assigned by position (rather than by `--name`).
    ///
    /// This covers the synthesized names (`"0"`, `"1"`, ..) given to positional values beyond the declared ones.
    pub fn positional<T: Argument>(&self, index: usize) -> Result<T, HandlerError> {
        match self.positional.get(index) {
            Some(name) => self.required(name),
            None => Err(HandlerError::MissingArgument(format!("#{index}"))),
        }
    }

    /// The number of arguments assigned by position.
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }
}
