use super::{relation_target, RelationAttr};

/// `#[belongs_to(key = <field>, references = <target field>, inverse = <target field>)]`
#[derive(Debug)]
pub(crate) struct BelongsTo {
    /// Target model
    pub(crate) ty: syn::Type,

    /// Foreign key field on this model
    pub(crate) key: syn::Ident,

    /// Column position of `key`, resolved against the model
    pub(crate) key_index: usize,

    /// True when `key` is an `Option<_>` field
    pub(crate) nullable: bool,

    /// Referenced field on the target
    pub(crate) references: syn::Ident,

    /// `HasMany<Self>` field on the target pointing back here
    pub(crate) inverse: Option<syn::Ident>,
}

impl BelongsTo {
    pub(super) fn from_ast(attr: &syn::Attribute, ty: &syn::Type) -> syn::Result<Self> {
        let args = RelationAttr::from_ast(attr)?;
        let ty = relation_target(ty, "BelongsTo")?;

        let Some(key) = args.key else {
            return Err(syn::Error::new_spanned(
                attr,
                "#[belongs_to] requires `key = <field>`",
            ));
        };

        let Some(references) = args.references else {
            return Err(syn::Error::new_spanned(
                attr,
                "#[belongs_to] requires `references = <field>`",
            ));
        };

        Ok(Self {
            ty,
            key,
            key_index: 0,
            nullable: false,
            references,
            inverse: args.inverse,
        })
    }
}
