use super::{util, Expand};
use crate::schema::FieldTy;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let rowmap = &self.rowmap;
        let model_ident = &self.model.ident;
        let table = self.expand_table();
        let table_name = &self.model.table;

        let field_arms = self.model.columns().map(|column| {
            let index = util::int(column.index);
            let ident = &column.ident;
            let ty = &column.ty;
            quote!(#index => <#ty as #rowmap::Primitive>::to_value(&self.#ident),)
        });

        let set_field_arms = self.model.columns().map(|column| {
            let index = util::int(column.index);
            let ident = &column.ident;
            let ty = &column.ty;
            let message = format!("invalid value for column `{table_name}.{}`", column.name);

            quote! {
                #index => {
                    self.#ident = <#ty as #rowmap::Primitive>::load(value)
                        .map_err(|e| e.context(#rowmap::Error::from_args(format_args!(#message))))?;
                }
            }
        });

        let is_zero_arms = self.model.columns().map(|column| {
            let index = util::int(column.index);
            let ident = &column.ident;
            let ty = &column.ty;
            quote!(#index => <#ty as #rowmap::Primitive>::is_zero(&self.#ident),)
        });

        let detached_fields = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            match &field.ty {
                FieldTy::Column(_) => quote!(#ident: ::std::clone::Clone::clone(&self.#ident),),
                FieldTy::BelongsTo(_) | FieldTy::HasMany(_) => {
                    quote!(#ident: #rowmap::Default::default(),)
                }
            }
        });

        quote! {
            impl #rowmap::Model for #model_ident {
                const TABLE: &'static #rowmap::Table = #table;

                fn field(&self, index: usize) -> #rowmap::Value {
                    match index {
                        #( #field_arms )*
                        _ => ::std::unreachable!("invalid column index {index} for `{}`", #table_name),
                    }
                }

                fn set_field(&mut self, index: usize, value: #rowmap::Value) -> #rowmap::Result<()> {
                    match index {
                        #( #set_field_arms )*
                        _ => return ::std::result::Result::Err(
                            #rowmap::Error::validation_unknown_column(#table_name, index.to_string())
                        ),
                    }

                    ::std::result::Result::Ok(())
                }

                fn is_zero(&self, index: usize) -> bool {
                    match index {
                        #( #is_zero_arms )*
                        _ => false,
                    }
                }

                fn detached(&self) -> Self {
                    Self {
                        #( #detached_fields )*
                    }
                }
            }
        }
    }

    pub(super) fn expand_inherent_impl(&self) -> TokenStream {
        let rowmap = &self.rowmap;
        let vis = &self.model.vis;
        let model_ident = &self.model.ident;
        let fields_struct_ident = &self.model.fields_struct_ident;
        let columns_struct_ident = &self.model.columns_struct_ident;
        let table_name = &self.model.table;

        let column_names = self.model.columns().map(|column| {
            let ident = &column.ident;
            let name = &column.name;
            quote!(#ident: #name,)
        });

        let qualified_names = self.model.columns().map(|column| {
            let ident = &column.ident;
            let name = format!("{table_name}.{}", column.name);
            quote!(#ident: #name,)
        });

        let key_columns: Vec<_> = self
            .model
            .primary_key
            .iter()
            .filter_map(|index| self.model.columns().find(|column| column.index == *index))
            .collect();

        let key_args = key_columns.iter().map(|column| {
            let ident = &column.ident;
            let ty = &column.ty;
            quote!(#ident: impl #rowmap::IntoExpr<#ty>)
        });
        let key_args: Vec<_> = key_args.collect();

        let key_filters = key_columns.iter().map(|column| {
            let ident = &column.ident;
            quote!(Self::FIELDS.#ident().eq(#ident))
        });
        let key_filters: Vec<_> = key_filters.collect();

        let relation_methods = self.expand_relation_methods();

        quote! {
            impl #model_ident {
                /// Typed column paths, for building filters.
                #vis const FIELDS: #fields_struct_ident = #fields_struct_ident;

                /// Column names.
                #vis const COLUMNS: #columns_struct_ident = #columns_struct_ident {
                    #( #column_names )*
                };

                /// Column names qualified with the table name.
                #vis const TABLE_COLUMNS: #columns_struct_ident = #columns_struct_ident {
                    #( #qualified_names )*
                };

                #vis fn query() -> #rowmap::Select<#model_ident> {
                    #rowmap::Select::new()
                }

                #vis fn filter(filter: #rowmap::Filter<#model_ident>) -> #rowmap::Select<#model_ident> {
                    #rowmap::Select::from_filter(filter)
                }

                /// Loads the row with the given key, failing when there is none.
                #vis async fn find(db: &#rowmap::Db, #( #key_args ),*) -> #rowmap::Result<#model_ident> {
                    Self::filter(#rowmap::Filter::and_all([ #( #key_filters ),* ]))
                        .one(db)
                        .await
                }

                #vis async fn exists(db: &#rowmap::Db, #( #key_args ),*) -> #rowmap::Result<bool> {
                    Self::filter(#rowmap::Filter::and_all([ #( #key_filters ),* ]))
                        .exists(db)
                        .await
                }

                #relation_methods
            }
        }
    }
}
