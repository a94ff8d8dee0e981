use super::{util, Expand};
use crate::schema::{BelongsTo, FieldTy, HasMany};

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

impl Expand<'_> {
    /// Helper functions behind the relation methods: the relation
    /// definition and its cache accessors.
    pub(super) fn expand_relation_defs(&self) -> TokenStream {
        let rowmap = &self.rowmap;
        let model_ident = &self.model.ident;

        let defs = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            let name = ident.unraw();
            let def_fn = util::ident(&name);
            let cache_fn = util::ident(format_args!("{name}_cache"));
            let inverse_fn = util::ident(format_args!("{name}_inverse"));

            let (def_ty, def_ctor, cache_ty, target, references, key, inverse) = match &field.ty {
                FieldTy::BelongsTo(BelongsTo {
                    ty,
                    references,
                    key_index,
                    inverse,
                    ..
                }) => {
                    let inverse = inverse.as_ref().map(|inverse| {
                        quote! {
                            fn #inverse_fn(row: &mut #ty) -> &mut #rowmap::HasMany<#model_ident> {
                                &mut row.#inverse
                            }
                        }
                    });

                    (
                        quote!(#rowmap::BelongsToDef<#model_ident, #ty>),
                        quote!(#rowmap::BelongsToDef),
                        quote!(#rowmap::BelongsTo<#ty>),
                        ty,
                        references,
                        *key_index,
                        inverse,
                    )
                }
                FieldTy::HasMany(HasMany {
                    ty,
                    references,
                    key_index,
                    inverse,
                    ..
                }) => {
                    let inverse = inverse.as_ref().map(|inverse| {
                        quote! {
                            fn #inverse_fn(row: &mut #ty) -> &mut #rowmap::BelongsTo<#model_ident> {
                                &mut row.#inverse
                            }
                        }
                    });

                    (
                        quote!(#rowmap::HasManyDef<#model_ident, #ty>),
                        quote!(#rowmap::HasManyDef),
                        quote!(#rowmap::HasMany<#ty>),
                        ty,
                        references,
                        *key_index,
                        inverse,
                    )
                }
                FieldTy::Column(_) => return quote!(),
            };

            let key = util::int(key);
            let inverse_value = match &inverse {
                Some(_) => quote!(#rowmap::Option::Some(#inverse_fn)),
                None => quote!(#rowmap::Option::None),
            };

            quote! {
                fn #def_fn() -> #def_ty {
                    #def_ctor {
                        key: #key,
                        references: <#target>::FIELDS.#references().index(),
                        cache: #cache_fn,
                        inverse: #inverse_value,
                    }
                }

                fn #cache_fn(row: &mut #model_ident) -> &mut #cache_ty {
                    &mut row.#ident
                }

                #inverse
            }
        });

        quote!( #( #defs )* )
    }

    /// Public methods for every relation field, placed in the model's
    /// inherent impl.
    pub(super) fn expand_relation_methods(&self) -> TokenStream {
        let rowmap = &self.rowmap;
        let vis = &self.model.vis;

        let methods = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            let name = ident.unraw();
            let def_fn = util::ident(&name);
            let load_ident = quote::format_ident!("load_{name}");

            match &field.ty {
                FieldTy::BelongsTo(rel) => {
                    let ty = &rel.ty;
                    let set_ident = quote::format_ident!("set_{name}");
                    let remove_ident = quote::format_ident!("remove_{name}");

                    let remove = rel.nullable.then(|| {
                        quote! {
                            /// Clears the foreign key, and drops `self` from `related`'s
                            /// cache when given.
                            #vis async fn #remove_ident(
                                &mut self,
                                db: &#rowmap::Db,
                                related: #rowmap::Option<&mut #ty>,
                            ) -> #rowmap::Result<()> {
                                #def_fn().remove(db, self, related).await
                            }
                        }
                    });

                    quote! {
                        #vis fn #ident(&self) -> #rowmap::Select<#ty> {
                            #def_fn().query(self)
                        }

                        /// Loads the related row of every row in `rows` with one query.
                        #vis async fn #load_ident(db: &#rowmap::Db, rows: &mut [Self]) -> #rowmap::Result<()> {
                            #def_fn().load(db, rows).await
                        }

                        /// Points `self` at `related`, inserting it first when `insert` is set.
                        #vis async fn #set_ident(
                            &mut self,
                            db: &#rowmap::Db,
                            insert: bool,
                            related: &mut #ty,
                        ) -> #rowmap::Result<()> {
                            #def_fn().set(db, self, insert, related).await
                        }

                        #remove
                    }
                }
                FieldTy::HasMany(rel) => {
                    let ty = &rel.ty;
                    let add_ident = quote::format_ident!("add_{name}");

                    quote! {
                        #vis fn #ident(&self) -> #rowmap::Select<#ty> {
                            #def_fn().query(self)
                        }

                        /// Loads the related rows of every row in `rows` with one query.
                        #vis async fn #load_ident(db: &#rowmap::Db, rows: &mut [Self]) -> #rowmap::Result<()> {
                            #def_fn().load(db, rows).await
                        }

                        /// Points every row of `related` at `self`, inserting them when
                        /// `insert` is set.
                        #vis async fn #add_ident(
                            &mut self,
                            db: &#rowmap::Db,
                            insert: bool,
                            related: &mut [#ty],
                        ) -> #rowmap::Result<()> {
                            #def_fn().add(db, self, insert, related).await
                        }
                    }
                }
                FieldTy::Column(_) => quote!(),
            }
        });

        quote!( #( #methods )* )
    }
}
