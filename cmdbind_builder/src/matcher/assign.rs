use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

use crate::matcher::model::{AssignedPair, RawPair};
use crate::schema::{ArgSpec, Schema};

/// A problem with the names of the arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignError {
    /// A positional argument of the schema was not provided.
    #[error("Missing required argument '{}'.", .arg.name())]
    MissingRequired {
        /// The missing argument.
        arg: ArgSpec,
    },

    /// An argument which the (non-empty) schema does not declare.
    #[error("Unexpected argument '{name}'.")]
    UnexpectedArgument {
        /// The written (or synthesized) argument name.
        name: String,
        /// The raw value, if there was one.
        value: Option<String>,
        /// The byte offset of the argument.
        offset: usize,
    },

    /// A named argument which appears more than once.
    #[error("Argument '{name}' provided more than once.")]
    Duplicate {
        /// The repeated argument name.
        name: String,
        /// The byte offset of the repetition.
        offset: usize,
    },
}

/// The names given to unnamed pairs, in order.
///
/// First the declared positional names not already claimed by a named pair, and then the numeric fallback labels `0`, `1`, ..
/// Fallback labels never collide with a declared or claimed name.
struct Labels<'s> {
    declared: VecDeque<&'s str>,
    reserved: HashSet<String>,
    next: usize,
}

impl<'s> Labels<'s> {
    fn new(schema: &'s Schema, claimed: HashSet<String>) -> Self {
        let declared = schema
            .positionals()
            .map(ArgSpec::name)
            .filter(|name| !claimed.contains(*name))
            .collect();
        let mut reserved = claimed;
        reserved.extend(schema.specs().iter().map(|spec| spec.name().to_string()));

        Self {
            declared,
            reserved,
            next: 0,
        }
    }
}

impl<'s> Iterator for Labels<'s> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.declared.pop_front() {
            return Some(name.to_string());
        }

        loop {
            let label = self.next.to_string();
            self.next += 1;

            if !self.reserved.contains(&label) {
                return Some(label);
            }
        }
    }
}

/// Give every pair a name.
///
/// Pairs which already carry a name pass through unchanged.
/// Unnamed pairs, in the order they were classified, take the schema's positional names in declaration order
/// (skipping names already written as `--name`), and then synthetic numeric names `"0"`, `"1"`, ..
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{assign, classify, lex, ArgSpec, Schema, TypeTag};
///
/// let schema = Schema::new([ArgSpec::positional("a", TypeTag::Text)]).unwrap();
/// let tokens = lex("x y");
/// let pairs = assign(classify(&tokens, &schema.flag_names()), &schema);
/// let names: Vec<&str> = pairs.iter().map(|p| p.name()).collect();
/// assert_eq!(names, vec!["a", "0"]);
/// ```
pub fn assign<'t>(pairs: Vec<RawPair<'t>>, schema: &Schema) -> Vec<AssignedPair<'t>> {
    let claimed: HashSet<String> = pairs
        .iter()
        .filter_map(|pair| pair.name().map(str::to_string))
        .collect();
    let mut labels = Labels::new(schema, claimed);

    pairs
        .into_iter()
        .map(|pair| match pair.name().map(str::to_string) {
            Some(name) => AssignedPair::named(pair, name, false),
            None => {
                let label = labels
                    .next()
                    .expect("internal error - labels must be infinite");
                AssignedPair::named(pair, label, true)
            }
        })
        .collect()
}

/// Detect the assignment errors in the pairs.
///
/// Errors are reported in command line order, followed by the missing arguments in declaration order.
pub fn check_assign(pairs: &[AssignedPair<'_>], schema: &Schema) -> Vec<AssignError> {
    let mut errors = Vec::default();
    let mut seen: HashMap<&str, usize> = HashMap::default();

    for pair in pairs {
        let count = seen.entry(pair.name()).or_insert(0);
        *count += 1;

        if *count == 2 {
            errors.push(AssignError::Duplicate {
                name: pair.name().to_string(),
                offset: pair.offset(),
            });
        }

        if !schema.is_empty() && !schema.contains(pair.name()) {
            errors.push(AssignError::UnexpectedArgument {
                name: pair.name().to_string(),
                value: pair.value().map(|token| token.value().to_string()),
                offset: pair.offset(),
            });
        }
    }

    for spec in schema.positionals() {
        if !seen.contains_key(spec.name()) {
            errors.push(AssignError::MissingRequired { arg: spec.clone() });
        }
    }

    errors
}
