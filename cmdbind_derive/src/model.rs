use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};
use syn::ext::IdentExt;

#[derive(Debug, Clone)]
pub(crate) struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        let st = &self.tokens.to_string();
        let ot = &other.tokens.to_string();
        st == ot
    }
}

impl Eq for DeriveValue {}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParameterType {
    /// `&mut dyn Write`, in the first sink position.
    Output,
    /// `&mut dyn Write`, in the second sink position.
    Error,
    /// `T`, or any type under `#[arg(positional)]`.
    Required { value_type: DeriveValue },
    /// `T` under `#[arg(default = ..)]`.
    Defaulted {
        value_type: DeriveValue,
        default: DeriveValue,
    },
    /// `Option<T>`.
    Nullable { value_type: DeriveValue },
    /// `bool`, which is `false` when absent.
    Flag,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveParameter {
    pub parameter_name: syn::Ident,
    pub parameter_type: ParameterType,
}

impl DeriveParameter {
    /// The name on the command line, which drops any `r#` prefix.
    pub(crate) fn argument_name(&self) -> String {
        self.parameter_name.unraw().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReturnType {
    /// No return value (`()`).
    Unit,
    /// `Result<(), E>`.
    UnitResult,
    /// `Result<T, E>`.
    Result,
    /// `Option<T>`.
    Optional,
    /// Any other `T: Display`.
    Display,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveCommand {
    pub struct_name: syn::Ident,
    pub function_name: syn::Ident,
    pub command_name: DeriveValue,
    pub visibility: DeriveValue,
    pub parameters: Vec<DeriveParameter>,
    pub return_type: ReturnType,
    /// The function itself, with its `#[arg]` attributes removed.
    pub function: DeriveValue,
}
