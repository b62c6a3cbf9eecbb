use crate::load::ARG;
use crate::model::{DeriveCommand, DeriveParameter, DeriveValue, IntermediateAttributes, ParameterType, ReturnType};
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::{format_ident, ToTokens};
use syn::ext::IdentExt;
use syn::spanned::Spanned;

const NAME: &str = "name";

impl TryFrom<(TokenStream2, syn::ItemFn)> for DeriveCommand {
    type Error = syn::Error;

    /// Load the `#[command(..)]` arguments, and the function they are attached to.
    fn try_from(value: (TokenStream2, syn::ItemFn)) -> Result<Self, Self::Error> {
        let (arguments, mut function) = value;
        let function_name = function.sig.ident.clone();
        let attributes = IntermediateAttributes::try_from(arguments)?;
        attributes.only(&[NAME], function_name.span())?;
        let command_name = match attributes.single(NAME, function_name.span())? {
            Some(value) => value.clone(),
            None => DeriveValue {
                tokens: Literal::string(&function_name.unraw().to_string()).into_token_stream(),
            },
        };

        if let Some(asyncness) = &function.sig.asyncness {
            return Err(syn::Error::new(
                asyncness.span(),
                "Invalid - command functions cannot be `async`.",
            ));
        }

        let generics = &function.sig.generics;

        if generics.type_params().next().is_some() || generics.const_params().next().is_some() {
            return Err(syn::Error::new(
                generics.span(),
                "Invalid - command functions cannot be generic.",
            ));
        }

        let mut parameters = Vec::default();
        let mut sinks = 0;

        for input in &function.sig.inputs {
            let mut parameter = DeriveParameter::try_from(input)?;

            if parameter.parameter_type == ParameterType::Output {
                if parameters.len() > sinks {
                    return Err(syn::Error::new(
                        parameter.parameter_name.span(),
                        format!(
                            "Invalid - sink parameter `{}` must precede the value parameters.",
                            parameter.parameter_name
                        ),
                    ));
                }

                match sinks {
                    0 => {}
                    1 => parameter.parameter_type = ParameterType::Error,
                    _ => {
                        return Err(syn::Error::new(
                            parameter.parameter_name.span(),
                            "Invalid - command functions take at most two sinks (output, then error).",
                        ));
                    }
                }

                sinks += 1;
            }

            parameters.push(parameter);
        }

        // `#[arg]` is only meaningful to this macro; the compiler rejects it on the emitted function.
        for input in function.sig.inputs.iter_mut() {
            if let syn::FnArg::Typed(pat_type) = input {
                pat_type
                    .attrs
                    .retain(|attribute| !attribute.path().is_ident(ARG));
            }
        }

        Ok(DeriveCommand {
            struct_name: format_ident!("{}Command", camel_case(&function_name.unraw().to_string())),
            function_name,
            command_name,
            visibility: DeriveValue {
                tokens: function.vis.to_token_stream(),
            },
            parameters,
            return_type: load_return_type(&function.sig.output),
            function: DeriveValue {
                tokens: function.to_token_stream(),
            },
        })
    }
}

fn load_return_type(output: &syn::ReturnType) -> ReturnType {
    let ty = match output {
        syn::ReturnType::Default => return ReturnType::Unit,
        syn::ReturnType::Type(_, ty) => ty.as_ref(),
    };

    match ty {
        syn::Type::Tuple(tuple) if tuple.elems.is_empty() => ReturnType::Unit,
        syn::Type::Path(path) => match path.path.segments.last() {
            Some(segment) if segment.ident == "Result" => match &segment.arguments {
                syn::PathArguments::AngleBracketed(arguments) => match arguments.args.first() {
                    Some(syn::GenericArgument::Type(syn::Type::Tuple(tuple)))
                        if tuple.elems.is_empty() =>
                    {
                        ReturnType::UnitResult
                    }
                    _ => ReturnType::Result,
                },
                _ => ReturnType::Result,
            },
            Some(segment) if segment.ident == "Option" => ReturnType::Optional,
            _ => ReturnType::Display,
        },
        _ => ReturnType::Display,
    }
}

fn camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut characters = part.chars();
            match characters.next() {
                Some(first) => first.to_uppercase().chain(characters).collect::<String>(),
                None => String::default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use proc_macro2::Span;
    use quote::quote;
    use rstest::rstest;
    use syn::parse_quote;

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    #[test]
    fn construct_command() {
        // Setup
        let function: syn::ItemFn = parse_quote! {
            pub fn add_one(out: &mut dyn Write, a: i32, #[arg(default = 1)] b: i32) -> i32 {
                a + b
            }
        };

        // Execute
        let command = DeriveCommand::try_from((TokenStream2::new(), function)).unwrap();

        // Verify
        assert_eq!(command.struct_name, ident("AddOneCommand"));
        assert_eq!(command.function_name, ident("add_one"));
        assert_eq!(
            command.command_name,
            DeriveValue {
                tokens: quote! { "add_one" }
            }
        );
        assert_eq!(command.visibility, DeriveValue { tokens: quote! { pub } });
        assert_eq!(command.return_type, ReturnType::Display);
        assert_eq!(
            command.parameters,
            vec![
                DeriveParameter {
                    parameter_name: ident("out"),
                    parameter_type: ParameterType::Output,
                },
                DeriveParameter {
                    parameter_name: ident("a"),
                    parameter_type: ParameterType::Required {
                        value_type: DeriveValue { tokens: quote! { i32 } },
                    },
                },
                DeriveParameter {
                    parameter_name: ident("b"),
                    parameter_type: ParameterType::Defaulted {
                        value_type: DeriveValue { tokens: quote! { i32 } },
                        default: DeriveValue { tokens: quote! { 1 } },
                    },
                },
            ]
        );
        // The #[arg] attribute is stripped.
        assert_eq!(
            command.function,
            DeriveValue {
                tokens: quote! {
                    pub fn add_one(out: &mut dyn Write, a: i32, b: i32) -> i32 {
                        a + b
                    }
                }
            }
        );
    }

    #[test]
    fn construct_command_named() {
        // Setup
        let function: syn::ItemFn = parse_quote! {
            fn plus_impl(a: i32, b: i32) -> i32 {
                a + b
            }
        };

        // Execute
        let command =
            DeriveCommand::try_from((quote! { name = "plus" }, function)).unwrap();

        // Verify
        assert_eq!(command.struct_name, ident("PlusImplCommand"));
        assert_eq!(
            command.command_name,
            DeriveValue {
                tokens: quote! { "plus" }
            }
        );
        assert_eq!(command.visibility, DeriveValue { tokens: quote! {} });
    }

    #[test]
    fn construct_command_lifetime() {
        // Setup
        let function: syn::ItemFn = parse_quote! {
            fn report<'a>(out: &'a mut dyn Write) {}
        };

        // Execute
        let command = DeriveCommand::try_from((TokenStream2::new(), function)).unwrap();

        // Verify
        assert_eq!(command.parameters.len(), 1);
        assert_eq!(command.parameters[0].parameter_type, ParameterType::Output);
    }

    #[test]
    fn construct_command_sinks() {
        // Setup
        let function: syn::ItemFn = parse_quote! {
            fn report(out: &mut dyn Write, err: &mut dyn Write) {}
        };

        // Execute
        let command = DeriveCommand::try_from((TokenStream2::new(), function)).unwrap();

        // Verify
        let types: Vec<ParameterType> = command
            .parameters
            .into_iter()
            .map(|p| p.parameter_type)
            .collect();
        assert_eq!(types, vec![ParameterType::Output, ParameterType::Error]);
        assert_eq!(command.return_type, ReturnType::Unit);
    }

    #[rstest]
    #[case(quote! { fn f() }, ReturnType::Unit)]
    #[case(quote! { fn f() -> () }, ReturnType::Unit)]
    #[case(quote! { fn f() -> Result<(), String> }, ReturnType::UnitResult)]
    #[case(quote! { fn f() -> std::io::Result<()> }, ReturnType::UnitResult)]
    #[case(quote! { fn f() -> Result<i32, String> }, ReturnType::Result)]
    #[case(quote! { fn f() -> Option<i32> }, ReturnType::Optional)]
    #[case(quote! { fn f() -> String }, ReturnType::Display)]
    #[case(quote! { fn f() -> (i32, i32) }, ReturnType::Display)]
    fn construct_return_type(#[case] signature: TokenStream2, #[case] expected: ReturnType) {
        // Setup
        let signature: syn::Signature = syn::parse2(signature).unwrap();

        // Execute & verify
        assert_eq!(load_return_type(&signature.output), expected);
    }

    #[rstest]
    #[case(quote! {}, quote! { async fn f() {} }, "cannot be `async`")]
    #[case(quote! {}, quote! { fn f<T>(t: T) {} }, "cannot be generic")]
    #[case(quote! {}, quote! { fn f<const N: usize>() {} }, "cannot be generic")]
    #[case(quote! {}, quote! { fn f(a: i32, out: &mut dyn Write) {} }, "`out` must precede the value parameters")]
    #[case(
        quote! {},
        quote! { fn f(a: &mut dyn Write, b: &mut dyn Write, c: &mut dyn Write) {} },
        "at most two sinks"
    )]
    #[case(quote! { title = "x" }, quote! { fn f() {} }, "unknown attribute `title`")]
    #[case(quote! { name = "x", name = "y" }, quote! { fn f() {} }, "`name` cannot be repeated")]
    #[case(quote! {}, quote! { fn f(&self) {} }, "cannot take `self`")]
    fn construct_command_invalid(
        #[case] arguments: TokenStream2,
        #[case] function: TokenStream2,
        #[case] expected: &str,
    ) {
        // Setup
        let function: syn::ItemFn = syn::parse2(function).unwrap();

        // Execute
        let error = DeriveCommand::try_from((arguments, function)).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), expected);
    }

    #[rstest]
    #[case("plus", "Plus")]
    #[case("add_one", "AddOne")]
    #[case("_private__name", "PrivateName")]
    fn camel(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(camel_case(name), expected);
    }
}
