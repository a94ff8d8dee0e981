use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// `{Model}Fields`: one `const fn` per column returning its typed path.
    pub(super) fn expand_field_struct(&self) -> TokenStream {
        let rowmap = &self.rowmap;
        let vis = &self.model.vis;
        let model_ident = &self.model.ident;
        let fields_struct_ident = &self.model.fields_struct_ident;

        let methods = self.model.columns().map(|column| {
            let ident = &column.ident;
            let ty = &column.ty;
            let index = util::int(column.index);

            quote! {
                #vis const fn #ident(&self) -> #rowmap::Path<#model_ident, #ty> {
                    #rowmap::Path::from_field_index(#index)
                }
            }
        });

        quote! {
            #[derive(Debug, Clone, Copy)]
            #vis struct #fields_struct_ident;

            impl #fields_struct_ident {
                #( #methods )*
            }
        }
    }

    /// `{Model}Columns`: one `&'static str` per column, used for both bare
    /// and qualified names.
    pub(super) fn expand_columns_struct(&self) -> TokenStream {
        let vis = &self.model.vis;
        let columns_struct_ident = &self.model.columns_struct_ident;

        let fields = self.model.columns().map(|column| {
            let ident = &column.ident;
            quote!(#vis #ident: &'static str,)
        });

        quote! {
            #[derive(Debug, Clone, Copy)]
            #vis struct #columns_struct_ident {
                #( #fields )*
            }
        }
    }
}
