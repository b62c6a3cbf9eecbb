mod attribute;
mod command;
mod parameter;

pub(crate) use parameter::ARG;

pub(self) fn incompatible_error(
    parameter_name: &syn::Ident,
    left: impl Into<String>,
    right: impl Into<String>,
) -> syn::Error {
    syn::Error::new(
        parameter_name.span(),
        format!(
            "Invalid - parameter cannot be both `{}` and `{}`.",
            left.into(),
            right.into(),
        ),
    )
}
