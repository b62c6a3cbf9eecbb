use std::collections::HashMap;

use crate::api::{derive_schema, Handler, HandlerError, Signature, Sinks};
use crate::parser::{parse_with, split_command, Arguments, Config, DispatchError, Printer};
use crate::schema::{ConfigError, Schema};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type Binder = Box<dyn Fn(&Arguments, &mut Sinks<'_>) -> Result<(), HandlerError>>;

struct Registration {
    schema: Schema,
    binder: Binder,
}

/// The named commands of one program, and their dispatch.
///
/// The registry is typically populated once at startup, and then only read via [`Registry::evaluate`].
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{ArgSpec, Registry, Schema, Sinks, TypeTag, Width};
///
/// let mut registry = Registry::new();
/// registry.register(
///     "plus",
///     Schema::new([
///         ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
///         ArgSpec::positional("b", TypeTag::Integer(Width::W32)),
///     ])
///     .unwrap(),
///     |arguments, sinks| {
///         let a: i32 = arguments.required("a")?;
///         let b: i32 = arguments.required("b")?;
///         sinks.emit(a + b)?;
///         Ok(())
///     },
/// );
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut error: Vec<u8> = Vec::new();
/// registry
///     .evaluate("plus 2 2", &mut Sinks::new(&mut output, &mut error))
///     .unwrap();
/// assert_eq!(String::from_utf8(output).unwrap(), "4\n");
/// ```
#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, Registration>,
    config: Config,
}

impl Registry {
    /// Create an empty registry, with the default [`Config`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry which parses with the `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            commands: HashMap::default(),
            config,
        }
    }

    /// Register a command by its explicit schema.
    /// If the name is repeated, only the final registration applies.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        schema: Schema,
        binder: impl Fn(&Arguments, &mut Sinks<'_>) -> Result<(), HandlerError> + 'static,
    ) {
        let name = name.into();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Registering '{name}' with {} arguments.",
                schema.specs().len()
            );
        }

        self.commands.insert(
            name,
            Registration {
                schema,
                binder: Box::new(binder),
            },
        );
    }

    /// Register a command, deriving its schema from the signature (see [`derive_schema`]).
    pub fn register_signature(
        &mut self,
        name: impl Into<String>,
        signature: &Signature,
        binder: impl Fn(&Arguments, &mut Sinks<'_>) -> Result<(), HandlerError> + 'static,
    ) -> Result<(), ConfigError> {
        let schema = derive_schema(signature)?;
        self.register(name, schema, binder);
        Ok(())
    }

    /// Register the handler under its own name.
    pub fn install<H: Handler + 'static>(&mut self) -> Result<(), ConfigError> {
        self.install_as::<H>(H::NAME)
    }

    /// Register the handler under the `name`.
    pub fn install_as<H: Handler + 'static>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<(), ConfigError> {
        self.register_signature(name, &H::signature(), H::invoke)
    }

    /// The registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// The schema of the command, if registered.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.commands
            .get(name)
            .map(|registration| &registration.schema)
    }

    /// The usage summary of the command, if registered.
    ///
    /// ### Example
    /// ```
    /// # use cmdbind_builder as cmdbind;
    /// use cmdbind::{ArgSpec, Registry, Schema, TypeTag, Width};
    ///
    /// let mut registry = Registry::new();
    /// let schema = Schema::new([
    ///     ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
    ///     ArgSpec::flag("invert"),
    ///     ArgSpec::switch("c", TypeTag::Integer(Width::W32)),
    /// ])
    /// .unwrap();
    /// registry.register("f", schema, |_, _| Ok(()));
    ///
    /// assert_eq!(registry.usage("f").unwrap(), "usage: f A [--invert] [-c C]");
    /// ```
    pub fn usage(&self, name: &str) -> Option<String> {
        self.schema(name)
            .map(|schema| Printer::new(schema).usage(name))
    }

    /// Parse the line into its command name and arguments, without invoking the command.
    ///
    /// The first word of the line is the command name; the rest is parsed against that command's schema.
    pub fn parse<'l>(&self, line: &'l str) -> Result<(&'l str, Arguments), DispatchError> {
        self.resolve(line)
            .map(|(name, _, arguments)| (name, arguments))
    }

    /// Parse the line, and invoke the named command.
    ///
    /// Handler failures surface as [`DispatchError::HandlerInvocationFailed`], while failures to write to the sinks surface as [`DispatchError::Output`].
    pub fn evaluate(&self, line: &str, sinks: &mut Sinks<'_>) -> Result<(), DispatchError> {
        let (name, registration, arguments) = self.resolve(line)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching '{name}' with {} arguments.", arguments.len());
        }

        (registration.binder)(&arguments, sinks).map_err(|error| match error {
            HandlerError::Io(error) => DispatchError::Output(error),
            source => DispatchError::HandlerInvocationFailed {
                command: name.to_string(),
                source,
            },
        })
    }

    fn resolve<'l>(
        &self,
        line: &'l str,
    ) -> Result<(&'l str, &Registration, Arguments), DispatchError> {
        let (name, offset, remainder, base) =
            split_command(line).ok_or(DispatchError::EmptyLine)?;
        let registration =
            self.commands
                .get(name)
                .ok_or_else(|| DispatchError::UnknownCommand {
                    name: name.to_string(),
                    offset,
                })?;
        let arguments =
            parse_with(remainder, &registration.schema, &self.config).map_err(|failure| {
                DispatchError::Parse {
                    command: name.to_string(),
                    failure: failure.rebase(base),
                }
            })?;

        Ok((name, registration, arguments))
    }
}
