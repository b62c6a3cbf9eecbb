use std::collections::HashSet;
use thiserror::Error;

use crate::model::TypeTag;

/// A mistake in how a command was declared (ex: a repeated argument name).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// How an argument appears on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A required argument, identified by position.
    Positional,
    /// An optional boolean argument; its mere presence implies `true`.
    Flag,
    /// An optional named argument followed by its value.
    Switch,
}

/// One expected argument of a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgSpec {
    name: String,
    type_tag: TypeTag,
    optional: bool,
}

impl ArgSpec {
    /// Create an argument specification.
    /// Whether it is a positional, flag, or switch is implied by `optional` and `type_tag` (see [`ArgSpec::kind`]).
    pub fn new(name: impl Into<String>, type_tag: TypeTag, optional: bool) -> Self {
        Self {
            name: name.into(),
            type_tag,
            optional,
        }
    }

    /// Create a required, positional argument.
    pub fn positional(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self::new(name, type_tag, false)
    }

    /// Create an optional boolean argument.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, TypeTag::Bool, true)
    }

    /// Create an optional named argument.
    /// Boolean switches are flags; use [`ArgSpec::flag`] for those.
    pub fn switch(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self::new(name, type_tag, true)
    }

    /// The argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    /// Whether the argument may be omitted.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The command line role of this argument.
    pub fn kind(&self) -> ArgKind {
        match (self.optional, &self.type_tag) {
            (false, _) => ArgKind::Positional,
            (true, TypeTag::Bool) => ArgKind::Flag,
            (true, _) => ArgKind::Switch,
        }
    }
}

/// The ordered declaration of a command's expected arguments.
///
/// Order only matters amongst the positional arguments, which are assigned left to right.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{ArgSpec, Schema, TypeTag, Width};
///
/// let schema = Schema::new([
///     ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
///     ArgSpec::positional("b", TypeTag::Integer(Width::W32)),
///     ArgSpec::flag("invert"),
/// ])
/// .unwrap();
///
/// assert_eq!(schema.positionals().count(), 2);
/// assert!(schema.flag_names().contains("invert"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    specs: Vec<ArgSpec>,
}

impl Schema {
    /// A schema which declares nothing.
    /// Commands registered with an empty schema accept any arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a schema, checking that the names are unique.
    pub fn new(specs: impl IntoIterator<Item = ArgSpec>) -> Result<Self, ConfigError> {
        let specs: Vec<ArgSpec> = specs.into_iter().collect();
        let mut names = HashSet::new();

        for spec in &specs {
            if !names.insert(spec.name()) {
                return Err(ConfigError(format!(
                    "Cannot duplicate the argument '{}'.",
                    spec.name()
                )));
            }
        }

        Ok(Self { specs })
    }

    /// All of the argument specifications, in declaration order.
    pub fn specs(&self) -> &[ArgSpec] {
        &self.specs
    }

    /// Whether the schema declares nothing.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Find an argument specification by name.
    pub fn get(&self, name: &str) -> Option<&ArgSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }

    /// Whether the schema declares the name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The positional (required) arguments, in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgSpec> {
        self.specs
            .iter()
            .filter(|spec| spec.kind() == ArgKind::Positional)
    }

    /// The names of the flag (optional boolean) arguments.
    pub fn flag_names(&self) -> HashSet<String> {
        self.specs
            .iter()
            .filter(|spec| spec.kind() == ArgKind::Flag)
            .map(|spec| spec.name().to_string())
            .collect()
    }
}
