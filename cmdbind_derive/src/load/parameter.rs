use crate::load::incompatible_error;
use crate::model::{DeriveParameter, DeriveValue, IntermediateAttributes, ParameterType};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::spanned::Spanned;

pub(crate) const ARG: &str = "arg";
const DEFAULT: &str = "default";
const POSITIONAL: &str = "positional";

impl TryFrom<&syn::FnArg> for DeriveParameter {
    type Error = syn::Error;

    fn try_from(value: &syn::FnArg) -> Result<Self, Self::Error> {
        let pat_type = match value {
            syn::FnArg::Typed(pat_type) => pat_type,
            syn::FnArg::Receiver(receiver) => {
                return Err(syn::Error::new(
                    receiver.span(),
                    "Invalid - command functions cannot take `self`.",
                ));
            }
        };
        let parameter_name = match pat_type.pat.as_ref() {
            syn::Pat::Ident(syn::PatIdent {
                by_ref: None,
                subpat: None,
                ident,
                ..
            }) => ident.clone(),
            pattern => {
                return Err(syn::Error::new(
                    pattern.span(),
                    "Invalid - command parameters must be plain identifiers.",
                ));
            }
        };

        let mut attributes = IntermediateAttributes::default();

        for attribute in &pat_type.attrs {
            if attribute.path().is_ident(ARG) {
                let loaded = IntermediateAttributes::try_from(attribute)?;
                attributes.singletons.extend(loaded.singletons);

                for (name, values) in loaded.pairs {
                    attributes.pairs.entry(name).or_default().extend(values);
                }
            }
        }

        attributes.only(&[DEFAULT, POSITIONAL], parameter_name.span())?;
        let explicit_positional = attributes.singletons.contains(POSITIONAL);
        let default = attributes.single(DEFAULT, parameter_name.span())?.cloned();
        let explicit_any = explicit_positional || default.is_some();
        let ty = pat_type.ty.as_ref();

        if explicit_positional && default.is_some() {
            return Err(incompatible_error(
                &parameter_name,
                "#[arg(positional)]",
                "#[arg(default = ..)]",
            ));
        }

        let parameter_type = if let Some(bound) = sink_bound(ty) {
            if !is_io_write(bound) {
                return Err(syn::Error::new(
                    bound.span(),
                    format!(
                        "Invalid - sink parameter `{}` must be `&mut dyn std::io::Write`.",
                        parameter_name.unraw()
                    ),
                ));
            }

            if explicit_any {
                return Err(incompatible_error(
                    &parameter_name,
                    "&mut dyn Write",
                    "#[arg(..)]",
                ));
            }

            ParameterType::Output
        } else if let Some(inner) = option_inner(ty) {
            if explicit_positional {
                return Err(incompatible_error(
                    &parameter_name,
                    "Option<..>",
                    "#[arg(positional)]",
                ));
            }

            if default.is_some() {
                return Err(incompatible_error(
                    &parameter_name,
                    "Option<..>",
                    "#[arg(default = ..)]",
                ));
            }

            ParameterType::Nullable {
                value_type: DeriveValue {
                    tokens: inner.to_token_stream(),
                },
            }
        } else {
            let value_type = DeriveValue {
                tokens: ty.to_token_stream(),
            };

            match default {
                Some(default) => ParameterType::Defaulted {
                    value_type,
                    default,
                },
                None if !explicit_positional && is_bool(ty) => ParameterType::Flag,
                None => ParameterType::Required { value_type },
            }
        };

        Ok(DeriveParameter {
            parameter_name,
            parameter_type,
        })
    }
}

/// The `..Write` bound of a `&mut dyn ..Write` type, under any path.
fn sink_bound(ty: &syn::Type) -> Option<&syn::Path> {
    let elem = match ty {
        syn::Type::Reference(syn::TypeReference {
            mutability: Some(_),
            elem,
            ..
        }) => elem.as_ref(),
        _ => return None,
    };

    match elem {
        syn::Type::TraitObject(object) => object.bounds.iter().find_map(|bound| match bound {
            syn::TypeParamBound::Trait(trait_bound)
                if trait_bound
                    .path
                    .segments
                    .last()
                    .map(|segment| segment.ident == "Write")
                    .unwrap_or(false) =>
            {
                Some(&trait_bound.path)
            }
            _ => None,
        }),
        _ => None,
    }
}

/// Whether the path is `Write`, `io::Write` or `std::io::Write`.
fn is_io_write(path: &syn::Path) -> bool {
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();

    match segments.as_slice() {
        [write] => write == "Write" && path.leading_colon.is_none(),
        [io, write] => io == "io" && write == "Write",
        [std, io, write] => std == "std" && io == "io" && write == "Write",
        _ => false,
    }
}

fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let segment = match ty {
        syn::Type::Path(path) if path.qself.is_none() => path.path.segments.last()?,
        _ => return None,
    };

    if segment.ident != "Option" {
        return None;
    }

    match &segment.arguments {
        syn::PathArguments::AngleBracketed(arguments) if arguments.args.len() == 1 => {
            match arguments.args.first() {
                Some(syn::GenericArgument::Type(inner)) => Some(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

fn is_bool(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(path) => path.qself.is_none() && path.path.is_ident("bool"),
        _ => false,
    }
}
