use super::ErrorSet;

#[derive(Debug, Default)]
pub(crate) struct ModelAttr {
    /// Database table the model maps to
    pub(crate) table: Option<syn::LitStr>,
}

impl ModelAttr {
    pub(super) fn from_ast(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        let mut errs = ErrorSet::default();

        for attr in attrs {
            if !attr.path().is_ident("table") {
                continue;
            }

            if result.table.is_some() {
                errs.push_spanned(attr, "duplicate #[table] attribute");
                continue;
            }

            match table_name(attr) {
                Some(lit) => result.table = Some(lit),
                None => errs.push_spanned(attr, "expected `#[table = \"table_name\"]`"),
            }
        }

        errs.finish()?;
        Ok(result)
    }
}

fn table_name(attr: &syn::Attribute) -> Option<syn::LitStr> {
    let syn::Meta::NameValue(meta) = &attr.meta else {
        return None;
    };

    let syn::Expr::Lit(syn::ExprLit {
        lit: syn::Lit::Str(lit),
        ..
    }) = &meta.value
    else {
        return None;
    };

    Some(lit.clone())
}
