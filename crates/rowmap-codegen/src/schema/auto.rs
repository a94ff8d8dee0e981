use syn::ext::IdentExt;

/// Timestamp column maintained by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auto {
    CreatedAt,
    UpdatedAt,
}

impl Auto {
    /// Parses `#[auto]`, `#[auto(created_at)]` or `#[auto(updated_at)]`.
    ///
    /// The bare form takes its role from the field name.
    pub(super) fn from_ast(attr: &syn::Attribute, field: &syn::Ident) -> syn::Result<Self> {
        match &attr.meta {
            syn::Meta::Path(_) => match field.unraw().to_string().as_str() {
                "created_at" => Ok(Self::CreatedAt),
                "updated_at" => Ok(Self::UpdatedAt),
                _ => Err(syn::Error::new_spanned(
                    attr,
                    "bare #[auto] is only allowed on `created_at` and `updated_at`; \
                     use #[auto(created_at)] or #[auto(updated_at)]",
                )),
            },
            _ => attr.parse_args(),
        }
    }
}

mod kw {
    syn::custom_keyword!(created_at);
    syn::custom_keyword!(updated_at);
}

impl syn::parse::Parse for Auto {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::created_at) {
            let _: kw::created_at = input.parse()?;
            Ok(Self::CreatedAt)
        } else if lookahead.peek(kw::updated_at) {
            let _: kw::updated_at = input.parse()?;
            Ok(Self::UpdatedAt)
        } else {
            Err(lookahead.error())
        }
    }
}
