#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the catalog server crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! brk-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Constructors**: Variants shaped `{ message, context }` get a snake-case
///   constructor, e.g. `Setup { .. }` becomes `Error::setup("...")`.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Every variant carries `context: Option<Cow<'static, str>>`.
/// 3. A source type may be wrapped by at most one variant.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[brk_derive::brk_error]
/// pub enum DocsError {
///     #[error("Setup error{}: {message}", format_context(.context))]
///     Setup { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Render error{}: {source}", format_context(.context))]
///     Render { source: std::fmt::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn prepare() -> Result<(), DocsError> {
///     Err(DocsError::setup("template has no body slot"))
/// }
/// ```
#[proc_macro_attribute]
pub fn brk_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
