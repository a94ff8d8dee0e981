use proc_macro2::TokenStream;

pub(crate) fn int(v: usize) -> TokenStream {
    let lit = proc_macro2::Literal::usize_unsuffixed(v);
    quote::quote!(#lit)
}

/// Identifier for a generated helper item, prefixed with `__rowmap_` so it
/// cannot collide with user code in the same module.
pub(crate) fn ident(name: impl std::fmt::Display) -> syn::Ident {
    quote::format_ident!("__rowmap_{name}")
}
