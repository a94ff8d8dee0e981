use super::{Auto, BelongsTo, Column, ColumnAttr, ErrorSet, HasMany};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    pub(crate) ident: syn::Ident,
    pub(crate) ty: FieldTy,
}

#[derive(Debug)]
pub(crate) enum FieldTy {
    Column(Column),
    BelongsTo(BelongsTo),
    HasMany(HasMany),
}

impl Field {
    /// Parses one struct field. `index` is the column position the field
    /// takes if it turns out to be a column.
    pub(super) fn from_ast(field: &syn::Field, model: &syn::Ident, index: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::default();
        let mut key = None;
        let mut default = None;
        let mut generated = None;
        let mut auto = None;
        let mut column = None;
        let mut relation = None;

        for attr in &field.attrs {
            let path = attr.path();

            if path.is_ident("key") || path.is_ident("db_default") || path.is_ident("generated") {
                let slot = if path.is_ident("key") {
                    &mut key
                } else if path.is_ident("db_default") {
                    &mut default
                } else {
                    &mut generated
                };

                if let Err(err) = attr.meta.require_path_only() {
                    errs.push(err);
                } else if slot.is_some() {
                    errs.push_spanned(attr, "duplicate attribute");
                } else {
                    *slot = Some(attr);
                }
            } else if path.is_ident("auto") {
                if auto.is_some() {
                    errs.push_spanned(attr, "duplicate #[auto] attribute");
                } else {
                    auto = errs.check(Auto::from_ast(attr, ident)).map(|role| (attr, role));
                }
            } else if path.is_ident("column") {
                if column.is_some() {
                    errs.push_spanned(attr, "duplicate #[column] attribute");
                } else {
                    column = errs.check(ColumnAttr::from_ast(attr));
                }
            } else if path.is_ident("belongs_to") || path.is_ident("has_many") {
                if relation.is_some() {
                    errs.push_spanned(attr, "field has more than one relation attribute");
                    continue;
                }

                let ty = rewrite_self(&field.ty, model);
                relation = if path.is_ident("belongs_to") {
                    errs.check(BelongsTo::from_ast(attr, &ty)).map(FieldTy::BelongsTo)
                } else {
                    errs.check(HasMany::from_ast(attr, &ty)).map(FieldTy::HasMany)
                };
            }
        }

        if relation.is_some() {
            let column_attrs = [key, default, generated, auto.map(|(attr, _)| attr)];
            for attr in column_attrs.into_iter().flatten() {
                errs.push_spanned(attr, "relation fields are not columns");
            }

            if let Some(column) = &column {
                errs.push_spanned(&column.name, "relation fields are not columns");
            }
        }

        if let (Some(attr), true) = (generated, key.is_some() || default.is_some() || auto.is_some()) {
            errs.push_spanned(
                attr,
                "#[generated] cannot be combined with #[key], #[db_default], or #[auto]",
            );
        }

        errs.finish()?;

        let ty = match relation {
            Some(relation) => relation,
            None => FieldTy::Column(Column {
                index,
                ident: ident.clone(),
                name: column
                    .map(|column| column.name.value())
                    .unwrap_or_else(|| ident.unraw().to_string()),
                ty: rewrite_self(&field.ty, model),
                key: key.is_some(),
                default: default.is_some(),
                generated: generated.is_some(),
                auto: auto.map(|(_, auto)| auto),
            }),
        };

        Ok(Self {
            ident: ident.clone(),
            ty,
        })
    }

    pub(crate) fn as_column(&self) -> Option<&Column> {
        match &self.ty {
            FieldTy::Column(column) => Some(column),
            _ => None,
        }
    }
}

/// Replaces `Self` with the model name, so that the type can be named
/// outside of the model's impl blocks.
fn rewrite_self(ty: &syn::Type, model: &syn::Ident) -> syn::Type {
    use syn::visit_mut::VisitMut;

    struct RewriteSelf<'a>(&'a syn::Ident);

    impl VisitMut for RewriteSelf<'_> {
        fn visit_path_mut(&mut self, path: &mut syn::Path) {
            syn::visit_mut::visit_path_mut(self, path);

            if path.is_ident("Self") {
                path.segments[0].ident = self.0.clone();
            }
        }
    }

    let mut ty = ty.clone();
    RewriteSelf(model).visit_type_mut(&mut ty);
    ty
}
