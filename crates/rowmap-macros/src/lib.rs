extern crate proc_macro;

use proc_macro::TokenStream;

/// Binds a row struct to a table.
///
/// Struct attribute: `#[table = "name"]` (defaults to the pluralized snake
/// case struct name).
///
/// Column field attributes: `#[key]`, `#[db_default]`, `#[generated]`,
/// `#[auto]` / `#[auto(created_at)]` / `#[auto(updated_at)]`, and
/// `#[column("name")]`.
///
/// Relation cache fields: `#[belongs_to(key = .., references = .., inverse = ..)]`
/// on a `BelongsTo<T>` and `#[has_many(references = .., key = .., inverse = ..)]`
/// on a `HasMany<T>`.
#[proc_macro_derive(
    Model,
    attributes(table, key, db_default, generated, auto, column, belongs_to, has_many)
)]
pub fn derive_model(input: TokenStream) -> TokenStream {
    match rowmap_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
