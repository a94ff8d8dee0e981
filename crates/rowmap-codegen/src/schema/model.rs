use super::{Column, ErrorSet, Field, FieldTy, ModelAttr};

use heck::ToSnakeCase;
use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Model {
    pub(crate) vis: syn::Visibility,

    pub(crate) ident: syn::Ident,

    /// Database table name
    pub(crate) table: String,

    /// Struct fields, columns and relation caches, in declaration order
    pub(crate) fields: Vec<Field>,

    /// Column positions of the primary key
    pub(crate) primary_key: Vec<usize>,

    /// `{Model}Fields`, the type of `Model::FIELDS`
    pub(crate) fields_struct_ident: syn::Ident,

    /// `{Model}Columns`, the type of `Model::COLUMNS`
    pub(crate) columns_struct_ident: syn::Ident,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut errs = ErrorSet::default();
        let attr = errs.check(ModelAttr::from_ast(&ast.attrs)).unwrap_or_default();

        let mut fields = vec![];
        for node in &node.named {
            let next_column = fields
                .iter()
                .filter(|field: &&Field| field.as_column().is_some())
                .count();

            if let Some(field) = errs.check(Field::from_ast(node, &ast.ident, next_column)) {
                fields.push(field);
            }
        }

        errs.finish()?;

        let primary_key: Vec<_> = fields
            .iter()
            .filter_map(Field::as_column)
            .filter(|column| column.key)
            .map(|column| column.index)
            .collect();

        if primary_key.is_empty() {
            return Err(syn::Error::new_spanned(
                ast,
                "model must have at least one field with a `#[key]` attribute",
            ));
        }

        let table = match attr.table {
            Some(lit) => lit.value(),
            None => default_table_name(&ast.ident),
        };

        let mut model = Self {
            vis: ast.vis.clone(),
            ident: ast.ident.clone(),
            table,
            fields,
            primary_key,
            fields_struct_ident: struct_ident("Fields", &ast.ident),
            columns_struct_ident: struct_ident("Columns", &ast.ident),
        };

        model.resolve_relations()?;
        model.check_duplicate_columns()?;

        Ok(model)
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.fields.iter().filter_map(Field::as_column)
    }

    pub(crate) fn column(&self, ident: &syn::Ident) -> Option<&Column> {
        let name = ident.unraw();
        self.columns().find(|column| column.ident.unraw() == name)
    }

    /// Resolves the local side of every relation to a column position.
    fn resolve_relations(&mut self) -> syn::Result<()> {
        let mut errs = ErrorSet::default();
        let mut resolved = vec![];

        for (offset, field) in self.fields.iter().enumerate() {
            match &field.ty {
                FieldTy::BelongsTo(rel) => match self.column(&rel.key) {
                    Some(column) => resolved.push((offset, column.index, column.is_option())),
                    None => errs.push_spanned(
                        &rel.key,
                        format!("`{}` is not a column of `{}`", rel.key, self.ident),
                    ),
                },
                FieldTy::HasMany(rel) => match &rel.key {
                    Some(key) => match self.column(key) {
                        Some(column) => resolved.push((offset, column.index, false)),
                        None => errs.push_spanned(
                            key,
                            format!("`{key}` is not a column of `{}`", self.ident),
                        ),
                    },
                    None if self.primary_key.len() == 1 => {
                        resolved.push((offset, self.primary_key[0], false));
                    }
                    None => errs.push_spanned(
                        &field.ident,
                        "#[has_many] on a model with a composite key requires `key = <field>`",
                    ),
                },
                FieldTy::Column(_) => {}
            }
        }

        errs.finish()?;

        for (offset, key_index, nullable) in resolved {
            match &mut self.fields[offset].ty {
                FieldTy::BelongsTo(rel) => {
                    rel.key_index = key_index;
                    rel.nullable = nullable;
                }
                FieldTy::HasMany(rel) => rel.key_index = key_index,
                FieldTy::Column(_) => {}
            }
        }

        Ok(())
    }

    fn check_duplicate_columns(&self) -> syn::Result<()> {
        let mut errs = ErrorSet::default();
        let mut seen: Vec<&str> = vec![];

        for column in self.columns() {
            if seen.contains(&column.name.as_str()) {
                errs.push_spanned(
                    &column.ident,
                    format!("duplicate column name `{}`", column.name),
                );
            }
            seen.push(&column.name);
        }

        errs.finish()
    }
}

/// `TodoItem` maps to `todo_items`.
fn default_table_name(ident: &syn::Ident) -> String {
    let snake = ident.unraw().to_string().to_snake_case();

    match snake.rsplit_once('_') {
        Some((prefix, last)) => format!("{prefix}_{}", pluralizer::pluralize(last, 2, false)),
        None => pluralizer::pluralize(&snake, 2, false),
    }
}

fn struct_ident(suffix: &str, model: &syn::Ident) -> syn::Ident {
    syn::Ident::new(&format!("{}{}", model.unraw(), suffix), model.span())
}
