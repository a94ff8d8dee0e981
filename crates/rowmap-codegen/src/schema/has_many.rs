use super::{relation_target, RelationAttr};

/// `#[has_many(references = <target field>, key = <field>, inverse = <target field>)]`
#[derive(Debug)]
pub(crate) struct HasMany {
    /// Target model
    pub(crate) ty: syn::Type,

    /// Referenced field on this model; the primary key when omitted
    pub(crate) key: Option<syn::Ident>,

    /// Column position of the referenced field, resolved against the model
    pub(crate) key_index: usize,

    /// Foreign key field on the target
    pub(crate) references: syn::Ident,

    /// `BelongsTo<Self>` field on the target pointing back here
    pub(crate) inverse: Option<syn::Ident>,
}

impl HasMany {
    pub(super) fn from_ast(attr: &syn::Attribute, ty: &syn::Type) -> syn::Result<Self> {
        let args = RelationAttr::from_ast(attr)?;
        let ty = relation_target(ty, "HasMany")?;

        let Some(references) = args.references else {
            return Err(syn::Error::new_spanned(
                attr,
                "#[has_many] requires `references = <field>`",
            ));
        };

        Ok(Self {
            ty,
            key: args.key,
            key_index: 0,
            references,
            inverse: args.inverse,
        })
    }
}
