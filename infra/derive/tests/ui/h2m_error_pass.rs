use h2m_derive::h2m_error;
use std::borrow::Cow;

#[h2m_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Bad value `{field}`{}: {source}", format_context(.context))]
    Value { field: String, source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    let text = std::fs::read_to_string("missing").context("reading")?;
    Ok(text)
}

fn main() {
    let _ = read();
    let _: DemoError = "boom".into();
    let _: DemoError = String::from("boom").into();
}
