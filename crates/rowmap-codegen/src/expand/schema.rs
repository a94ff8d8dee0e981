use super::{util, Expand};
use crate::schema::{Auto, FieldTy};

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

impl Expand<'_> {
    /// The `&'static Table` describing the model.
    pub(super) fn expand_table(&self) -> TokenStream {
        let rowmap = &self.rowmap;
        let table_name = &self.model.table;

        let columns = self.model.columns().map(|column| {
            let index = util::int(column.index);
            let name = &column.name;
            let ty = &column.ty;
            let key = column.key;
            let default = column.default;
            let generated = column.generated;
            let auto = match column.auto {
                Some(Auto::CreatedAt) => {
                    quote!(#rowmap::Option::Some(#rowmap::AutoTimestamp::CreatedAt))
                }
                Some(Auto::UpdatedAt) => {
                    quote!(#rowmap::Option::Some(#rowmap::AutoTimestamp::UpdatedAt))
                }
                None => quote!(#rowmap::Option::None),
            };

            quote! {
                #rowmap::Column {
                    index: #index,
                    name: #name,
                    ty: <#ty as #rowmap::Primitive>::TYPE,
                    nullable: <#ty as #rowmap::Primitive>::NULLABLE,
                    primary_key: #key,
                    has_default: #default,
                    generated: #generated,
                    auto: #auto,
                }
            }
        });

        let qualified_columns = self
            .model
            .columns()
            .map(|column| format!("{table_name}.{}", column.name));

        let primary_key = self.model.primary_key.iter().map(|index| util::int(*index));

        let relations = self.model.fields.iter().filter_map(|field| {
            let name = field.ident.unraw().to_string();

            let (kind, key, ty, references) = match &field.ty {
                FieldTy::BelongsTo(rel) => (
                    quote!(BelongsTo),
                    rel.key_index,
                    &rel.ty,
                    &rel.references,
                ),
                FieldTy::HasMany(rel) => (
                    quote!(HasMany),
                    rel.key_index,
                    &rel.ty,
                    &rel.references,
                ),
                FieldTy::Column(_) => return None,
            };

            let key = util::int(key);

            Some(quote! {
                #rowmap::Relation {
                    name: #name,
                    kind: #rowmap::RelationKind::#kind,
                    key: #key,
                    references: <#ty>::FIELDS.#references().index(),
                }
            })
        });

        quote! {
            &#rowmap::Table {
                name: #table_name,
                columns: &[ #( #columns, )* ],
                qualified_columns: &[ #( #qualified_columns, )* ],
                primary_key: &[ #( #primary_key, )* ],
                relations: &[ #( #relations, )* ],
            }
        }
    }
}
