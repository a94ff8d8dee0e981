use super::Auto;

/// A row struct field stored in a column.
#[derive(Debug)]
pub(crate) struct Column {
    /// Position among the model's columns
    pub(crate) index: usize,

    pub(crate) ident: syn::Ident,

    /// Column name in the database
    pub(crate) name: String,

    pub(crate) ty: syn::Type,

    /// `#[key]`
    pub(crate) key: bool,

    /// `#[db_default]`: the database fills the column when an insert omits it
    pub(crate) default: bool,

    /// `#[generated]`: computed by the database, never written
    pub(crate) generated: bool,

    pub(crate) auto: Option<Auto>,
}

impl Column {
    /// True when the field is written as `Option<_>`.
    pub(crate) fn is_option(&self) -> bool {
        let syn::Type::Path(path) = &self.ty else {
            return false;
        };

        path.qself.is_none()
            && path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Option")
    }
}

/// `#[column("name")]`
#[derive(Debug)]
pub(crate) struct ColumnAttr {
    pub(crate) name: syn::LitStr,
}

impl ColumnAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let name: syn::LitStr = attr.parse_args()?;

        if name.value().is_empty() {
            return Err(syn::Error::new_spanned(name, "column name cannot be empty"));
        }

        Ok(Self { name })
    }
}
