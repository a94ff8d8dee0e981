/// Arguments shared by `#[belongs_to(..)]` and `#[has_many(..)]`.
#[derive(Debug, Default)]
pub(crate) struct RelationAttr {
    pub(crate) key: Option<syn::Ident>,
    pub(crate) references: Option<syn::Ident>,
    pub(crate) inverse: Option<syn::Ident>,
}

impl RelationAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut result = Self::default();

        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("key") {
                &mut result.key
            } else if meta.path.is_ident("references") {
                &mut result.references
            } else if meta.path.is_ident("inverse") {
                &mut result.inverse
            } else {
                return Err(meta.error("expected `key`, `references`, or `inverse`"));
            };

            if slot.is_some() {
                return Err(meta.error("duplicate relation argument"));
            }

            *slot = Some(meta.value()?.parse()?);
            Ok(())
        })?;

        Ok(result)
    }
}

/// Extracts `T` from a relation cache type `wrapper<T>`.
pub(crate) fn relation_target(ty: &syn::Type, wrapper: &str) -> syn::Result<syn::Type> {
    let error = || syn::Error::new_spanned(ty, format!("expected `{wrapper}<T>`"));

    let syn::Type::Path(path) = ty else {
        return Err(error());
    };

    let Some(segment) = path.path.segments.last() else {
        return Err(error());
    };

    if segment.ident != wrapper {
        return Err(error());
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Err(error());
    };

    match args.args.first() {
        Some(syn::GenericArgument::Type(target)) if args.args.len() == 1 => Ok(target.clone()),
        _ => Err(error()),
    }
}
