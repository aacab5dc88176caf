use brk_derive::brk_error;
use std::borrow::Cow;

#[brk_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing entry{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("boom")).context("reading demo file")
}

fn lookup() -> Result<(), DemoError> {
    Err(DemoError::not_found("demo")).context("looking up demo")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading demo file): boom");

    let err = lookup().unwrap_err();
    assert_eq!(err.to_string(), "Missing entry (looking up demo): demo");

    let converted: DemoError = std::io::Error::other("x").into();
    assert!(matches!(converted, DemoError::Io { context: None, .. }));
}
