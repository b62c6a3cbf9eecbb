use crate::model::{DeriveParameter, ParameterType};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl DeriveParameter {
    /// The `::cmdbind::Parameter` which declares this parameter in the handler signature.
    pub(crate) fn signature(&self) -> TokenStream2 {
        let argument_name = self.argument_name();

        match &self.parameter_type {
            ParameterType::Output => quote! {
                ::cmdbind::Parameter::output()
            },
            ParameterType::Error => quote! {
                ::cmdbind::Parameter::error()
            },
            ParameterType::Required { value_type } => {
                let value_type = &value_type.tokens;
                quote! {
                    ::cmdbind::Parameter::required(#argument_name, <#value_type as ::cmdbind::Argument>::type_tag())
                }
            }
            ParameterType::Defaulted { value_type, .. } => {
                let value_type = &value_type.tokens;
                quote! {
                    ::cmdbind::Parameter::defaulted(#argument_name, <#value_type as ::cmdbind::Argument>::type_tag())
                }
            }
            ParameterType::Nullable { value_type } => {
                let value_type = &value_type.tokens;
                quote! {
                    ::cmdbind::Parameter::nullable(#argument_name, <#value_type as ::cmdbind::Argument>::type_tag())
                }
            }
            ParameterType::Flag => quote! {
                ::cmdbind::Parameter::defaulted(#argument_name, ::cmdbind::TypeTag::Bool)
            },
        }
    }

    /// The statement which reads this parameter from the parsed arguments.
    ///
    /// Sinks are bound by the command as a whole, so have no binding of their own.
    pub(crate) fn binding(&self) -> Option<TokenStream2> {
        let parameter_name = &self.parameter_name;
        let argument_name = self.argument_name();

        match &self.parameter_type {
            ParameterType::Output | ParameterType::Error => None,
            ParameterType::Required { value_type } => {
                let value_type = &value_type.tokens;
                Some(quote! {
                    let #parameter_name = __arguments.required::<#value_type>(#argument_name)?;
                })
            }
            ParameterType::Defaulted { value_type, default } => {
                let value_type = &value_type.tokens;
                let default = &default.tokens;
                Some(quote! {
                    let #parameter_name = __arguments.optional::<#value_type>(#argument_name)?.unwrap_or_else(|| #default);
                })
            }
            ParameterType::Nullable { value_type } => {
                let value_type = &value_type.tokens;
                Some(quote! {
                    let #parameter_name = __arguments.optional::<#value_type>(#argument_name)?;
                })
            }
            ParameterType::Flag => Some(quote! {
                let #parameter_name = __arguments.flag(#argument_name)?;
            }),
        }
    }
}
