use crate::model::{DeriveCommand, ParameterType, ReturnType};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveCommand> for TokenStream2 {
    /// Render the function, alongside the `Handler` which binds it.
    fn from(value: DeriveCommand) -> Self {
        let DeriveCommand {
            struct_name,
            function_name,
            command_name,
            visibility,
            parameters,
            return_type,
            function,
        } = value;
        let command_name = command_name.tokens;
        let visibility = visibility.tokens;
        let function = function.tokens;

        let signatures = parameters
            .iter()
            .map(|parameter| parameter.signature())
            .collect::<Vec<_>>();
        let bindings = parameters
            .iter()
            .filter_map(|parameter| parameter.binding())
            .collect::<Vec<_>>();
        let sinks = sink_binding(
            parameters
                .iter()
                .filter(|parameter| {
                    matches!(
                        parameter.parameter_type,
                        ParameterType::Output | ParameterType::Error
                    )
                })
                .map(|parameter| &parameter.parameter_name)
                .collect(),
        );
        let names = parameters
            .iter()
            .map(|parameter| &parameter.parameter_name)
            .collect::<Vec<_>>();
        let call = quote! { #function_name(#( #names ),*) };

        let body = match return_type {
            ReturnType::Unit => quote! {
                #call;
                Ok(())
            },
            ReturnType::UnitResult => quote! {
                #call.map_err(::cmdbind::HandlerError::failed)?;
                Ok(())
            },
            ReturnType::Result => quote! {
                let __value = #call.map_err(::cmdbind::HandlerError::failed)?;
                __sinks.emit(__value)?;
                Ok(())
            },
            ReturnType::Optional => quote! {
                if let Some(__value) = #call {
                    __sinks.emit(__value)?;
                }
                Ok(())
            },
            ReturnType::Display => quote! {
                let __value = #call;
                __sinks.emit(__value)?;
                Ok(())
            },
        };

        quote! {
            #function

            #visibility struct #struct_name;

            impl ::cmdbind::Handler for #struct_name {
                const NAME: &'static str = #command_name;

                fn signature() -> ::cmdbind::Signature {
                    ::cmdbind::Signature::new()
                        #( .parameter(#signatures) )*
                }

                #[allow(unused_variables)]
                fn invoke(
                    __arguments: &::cmdbind::Arguments,
                    __sinks: &mut ::cmdbind::Sinks<'_>,
                ) -> ::std::result::Result<(), ::cmdbind::HandlerError> {
                    #( #bindings )*
                    #sinks
                    #body
                }
            }
        }
    }
}

/// Bind the sink parameters, in order of (output, error).
fn sink_binding(sinks: Vec<&syn::Ident>) -> TokenStream2 {
    match sinks.as_slice() {
        [] => TokenStream2::new(),
        [output] => quote! {
            let #output = __sinks.output();
        },
        [output, error] => quote! {
            let (#output, #error) = __sinks.split();
        },
        _ => unreachable!("internal error - commands take at most two sinks"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeriveParameter, DeriveValue};
    use proc_macro2::{Literal, Span};
    use quote::ToTokens;

    #[test]
    fn render_command_empty() {
        // Setup
        let command = DeriveCommand {
            struct_name: ident("PingCommand"),
            function_name: ident("ping"),
            command_name: DeriveValue {
                tokens: Literal::string("ping").into_token_stream(),
            },
            visibility: DeriveValue {
                tokens: quote! { pub },
            },
            parameters: vec![],
            return_type: ReturnType::Unit,
            function: DeriveValue {
                tokens: quote! { pub fn ping() {} },
            },
        };

        // Execute
        let token_stream = TokenStream2::from(command);

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"pub fn ping () {
 }
 pub struct PingCommand ;
 impl :: cmdbind :: Handler for PingCommand {
 const NAME : & 'static str = "ping" ;
 fn signature () -> :: cmdbind :: Signature {
 :: cmdbind :: Signature :: new () }
 # [allow (unused_variables)] fn invoke (__arguments : & :: cmdbind :: Arguments , __sinks : & mut :: cmdbind :: Sinks < '_ > ,) -> :: std :: result :: Result < () , :: cmdbind :: HandlerError > {
 ping () ;
 Ok (()) }
 }
"#,
        );
    }

    #[test]
    fn render_command() {
        // Setup
        let command = DeriveCommand {
            struct_name: ident("PlusCommand"),
            function_name: ident("plus"),
            command_name: DeriveValue {
                tokens: Literal::string("plus").into_token_stream(),
            },
            visibility: DeriveValue {
                tokens: TokenStream2::new(),
            },
            parameters: vec![
                DeriveParameter {
                    parameter_name: ident("a"),
                    parameter_type: ParameterType::Required {
                        value_type: DeriveValue {
                            tokens: quote! { i32 },
                        },
                    },
                },
                DeriveParameter {
                    parameter_name: ident("invert"),
                    parameter_type: ParameterType::Flag,
                },
            ],
            return_type: ReturnType::Display,
            function: DeriveValue {
                tokens: quote! { fn plus(a: i32, invert: bool) -> i32 { a } },
            },
        };

        // Execute
        let token_stream = TokenStream2::from(command);

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"fn plus (a : i32 , invert : bool) -> i32 {
 a }
 struct PlusCommand ;
 impl :: cmdbind :: Handler for PlusCommand {
 const NAME : & 'static str = "plus" ;
 fn signature () -> :: cmdbind :: Signature {
 :: cmdbind :: Signature :: new () . parameter (:: cmdbind :: Parameter :: required ("a" , < i32 as :: cmdbind :: Argument > :: type_tag ())) . parameter (:: cmdbind :: Parameter :: defaulted ("invert" , :: cmdbind :: TypeTag :: Bool)) }
 # [allow (unused_variables)] fn invoke (__arguments : & :: cmdbind :: Arguments , __sinks : & mut :: cmdbind :: Sinks < '_ > ,) -> :: std :: result :: Result < () , :: cmdbind :: HandlerError > {
 let a = __arguments . required :: < i32 > ("a") ? ;
 let invert = __arguments . flag ("invert") ? ;
 let __value = plus (a , invert) ;
 __sinks . emit (__value) ? ;
 Ok (()) }
 }
"#,
        );
    }

    #[test]
    fn render_command_sinks() {
        // Setup
        let command = DeriveCommand {
            struct_name: ident("CheckCommand"),
            function_name: ident("check"),
            command_name: DeriveValue {
                tokens: Literal::string("verify").into_token_stream(),
            },
            visibility: DeriveValue {
                tokens: TokenStream2::new(),
            },
            parameters: vec![
                DeriveParameter {
                    parameter_name: ident("out"),
                    parameter_type: ParameterType::Output,
                },
                DeriveParameter {
                    parameter_name: ident("err"),
                    parameter_type: ParameterType::Error,
                },
            ],
            return_type: ReturnType::UnitResult,
            function: DeriveValue {
                tokens: quote! { fn check(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), String> { Ok(()) } },
            },
        };

        // Execute
        let token_stream = TokenStream2::from(command);

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"fn check (out : & mut dyn Write , err : & mut dyn Write) -> Result < () , String > {
 Ok (()) }
 struct CheckCommand ;
 impl :: cmdbind :: Handler for CheckCommand {
 const NAME : & 'static str = "verify" ;
 fn signature () -> :: cmdbind :: Signature {
 :: cmdbind :: Signature :: new () . parameter (:: cmdbind :: Parameter :: output ()) . parameter (:: cmdbind :: Parameter :: error ()) }
 # [allow (unused_variables)] fn invoke (__arguments : & :: cmdbind :: Arguments , __sinks : & mut :: cmdbind :: Sinks < '_ > ,) -> :: std :: result :: Result < () , :: cmdbind :: HandlerError > {
 let (out , err) = __sinks . split () ;
 check (out , err) . map_err (:: cmdbind :: HandlerError :: failed) ? ;
 Ok (()) }
 }
"#,
        );
    }

    #[test]
    fn render_command_returns() {
        // Setup
        let command = |return_type| DeriveCommand {
            struct_name: ident("FindCommand"),
            function_name: ident("find"),
            command_name: DeriveValue {
                tokens: Literal::string("find").into_token_stream(),
            },
            visibility: DeriveValue {
                tokens: TokenStream2::new(),
            },
            parameters: vec![DeriveParameter {
                parameter_name: ident("out"),
                parameter_type: ParameterType::Output,
            }],
            return_type,
            function: DeriveValue {
                tokens: TokenStream2::new(),
            },
        };

        // Execute
        let result = TokenStream2::from(command(ReturnType::Result)).to_string();
        let optional = TokenStream2::from(command(ReturnType::Optional)).to_string();

        // Verify
        assert!(result.contains(
            "let out = __sinks . output () ; let __value = find (out) . map_err (:: cmdbind :: HandlerError :: failed) ? ; __sinks . emit (__value) ? ; Ok (())"
        ));
        assert!(optional.contains(
            "let out = __sinks . output () ; if let Some (__value) = find (out) { __sinks . emit (__value) ? ; } Ok (())"
        ));
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn simple_format(rust_str: String) -> String {
        rust_str
            .replace("{", "{\n")
            .replace("}", "}\n")
            .replace(";", ";\n")
    }
}
