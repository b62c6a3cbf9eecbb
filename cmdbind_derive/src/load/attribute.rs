use crate::model::{DeriveValue, IntermediateAttributes};
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use std::collections::{HashMap, HashSet};
use syn::parse::Parser;
use syn::punctuated::Punctuated;

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let expressions =
            value.parse_args_with(Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated)?;
        Self::try_from(expressions)
    }
}

impl TryFrom<TokenStream2> for IntermediateAttributes {
    type Error = syn::Error;

    /// Load the arguments of an attribute macro (ex: the `name = "plus"` in `#[command(name = "plus")]`).
    fn try_from(value: TokenStream2) -> Result<Self, Self::Error> {
        let expressions =
            Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated.parse2(value)?;
        Self::try_from(expressions)
    }
}

impl TryFrom<Punctuated<syn::Expr, syn::Token![,]>> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: Punctuated<syn::Expr, syn::Token![,]>) -> Result<Self, Self::Error> {
        let mut singletons = HashSet::default();
        let mut pairs: HashMap<String, Vec<DeriveValue>> = HashMap::default();

        for expression in value {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream();
                    let values = pairs.entry(left.to_string()).or_default();
                    values.push(DeriveValue {
                        tokens: assignment.right.to_token_stream(),
                    });
                }
                syn::Expr::Path(ref path) => match path.path.get_ident() {
                    Some(ident) => {
                        singletons.insert(ident.to_string());
                    }
                    None => {
                        return Err(syn::Error::new_spanned(
                            &expression,
                            "Invalid - attribute expecting `name` or `name = value`.",
                        ));
                    }
                },
                _ => {
                    return Err(syn::Error::new_spanned(
                        &expression,
                        "Invalid - attribute expecting `name` or `name = value`.",
                    ));
                }
            };
        }

        Ok(Self { singletons, pairs })
    }
}

impl IntermediateAttributes {
    /// Fail on any attribute outside of the `known` names.
    pub(crate) fn only(&self, known: &[&str], span: proc_macro2::Span) -> Result<(), syn::Error> {
        let mut names: Vec<&String> = self.singletons.iter().chain(self.pairs.keys()).collect();
        names.sort();

        for name in names {
            if !known.contains(&name.as_str()) {
                return Err(syn::Error::new(
                    span,
                    format!("Invalid - unknown attribute `{name}`."),
                ));
            }
        }

        Ok(())
    }

    /// The single value of the pair, failing when repeated.
    pub(crate) fn single(
        &self,
        name: &str,
        span: proc_macro2::Span,
    ) -> Result<Option<&DeriveValue>, syn::Error> {
        match self.pairs.get(name).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([value]) => Ok(Some(value)),
            Some(_) => Err(syn::Error::new(
                span,
                format!("Invalid - attribute `{name}` cannot be repeated."),
            )),
        }
    }
}
