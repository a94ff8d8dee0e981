mod fields;
mod model;
mod relation;
mod schema;
mod util;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for rowmap types
    rowmap: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_impl = self.expand_model_impl();
        let inherent_impl = self.expand_inherent_impl();
        let field_struct = self.expand_field_struct();
        let columns_struct = self.expand_columns_struct();
        let relation_defs = self.expand_relation_defs();

        wrap_in_const(quote! {
            #model_impl
            #inherent_impl
            #field_struct
            #columns_struct
            #relation_defs
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        rowmap: quote!(_rowmap::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use rowmap as _rowmap;
            #code
        };
    }
}
