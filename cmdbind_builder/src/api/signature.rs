use std::collections::HashSet;

use crate::model::TypeTag;
use crate::schema::{ArgSpec, ConfigError, Schema};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParameterClass {
    Output,
    Error,
    Value { optional: bool },
}

/// One parameter of a handler signature.
///
/// Sink parameters (`output`/`error`) are injected at dispatch time; all other parameters are supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    type_tag: Option<TypeTag>,
    class: ParameterClass,
}

impl Parameter {
    /// The output sink.
    pub fn output() -> Self {
        Self {
            name: "output".to_string(),
            type_tag: None,
            class: ParameterClass::Output,
        }
    }

    /// The error sink.
    pub fn error() -> Self {
        Self {
            name: "error".to_string(),
            type_tag: None,
            class: ParameterClass::Error,
        }
    }

    /// A parameter with neither a default value nor a nullable type.
    pub fn required(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self::value(name, type_tag, false)
    }

    /// A parameter which declares a default value.
    pub fn defaulted(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self::value(name, type_tag, true)
    }

    /// A parameter of nullable type (ex: `Option<T>`).
    pub fn nullable(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self::value(name, type_tag, true)
    }

    fn value(name: impl Into<String>, type_tag: TypeTag, optional: bool) -> Self {
        Self {
            name: name.into(),
            type_tag: Some(type_tag),
            class: ParameterClass::Value { optional },
        }
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a sink parameter.
    pub fn is_sink(&self) -> bool {
        matches!(self.class, ParameterClass::Output | ParameterClass::Error)
    }
}

/// The ordered parameter list of a handler.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{derive_schema, ArgKind, Parameter, Signature, TypeTag, Width};
///
/// let signature = Signature::new()
///     .parameter(Parameter::output())
///     .parameter(Parameter::required("a", TypeTag::Integer(Width::W32)))
///     .parameter(Parameter::defaulted("invert", TypeTag::Bool))
///     .parameter(Parameter::defaulted("c", TypeTag::Integer(Width::W32)));
/// let schema = derive_schema(&signature).unwrap();
///
/// let kinds: Vec<ArgKind> = schema.specs().iter().map(|s| s.kind()).collect();
/// assert_eq!(kinds, vec![ArgKind::Positional, ArgKind::Flag, ArgKind::Switch]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    /// An empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// The parameters, in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

impl FromIterator<Parameter> for Signature {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}

/// Derive the schema from a handler signature.
///
/// Leading sink parameters are skipped.
/// Each remaining required parameter becomes a positional argument, each optional `bool` becomes a flag, and each other optional parameter becomes a switch.
///
/// Fails when a sink follows a value parameter, when a sink is repeated, or when a name is repeated.
pub fn derive_schema(signature: &Signature) -> Result<Schema, ConfigError> {
    let mut sinks = HashSet::new();
    let mut specs = Vec::default();

    for parameter in signature.parameters() {
        match (&parameter.class, &parameter.type_tag) {
            (ParameterClass::Output | ParameterClass::Error, _) => {
                if !specs.is_empty() {
                    return Err(ConfigError(format!(
                        "Sink parameter '{}' must precede the value parameters.",
                        parameter.name()
                    )));
                }

                if !sinks.insert(parameter.name()) {
                    return Err(ConfigError(format!(
                        "Cannot duplicate the sink parameter '{}'.",
                        parameter.name()
                    )));
                }
            }
            (ParameterClass::Value { optional }, Some(type_tag)) => {
                specs.push(ArgSpec::new(parameter.name(), type_tag.clone(), *optional));
            }
            (ParameterClass::Value { .. }, None) => {
                unreachable!("internal error - value parameters always carry a type tag")
            }
        }
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Derived {} arguments from {} parameters.",
            specs.len(),
            signature.parameters().len()
        );
    }

    Schema::new(specs)
}
