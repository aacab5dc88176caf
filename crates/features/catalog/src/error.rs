use std::borrow::Cow;

/// Registry construction and lookup errors.
#[brk_derive::brk_error]
pub enum RegistryError {
    /// Invalid catalog contents (duplicate or empty ids/names, unknown override targets).
    #[error("Catalog configuration error{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No service is registered under the requested id or name.
    #[error("Service not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
