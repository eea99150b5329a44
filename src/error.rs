use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    #[error("could not find an element at offset {offset}")]
    ElementNotFound { offset: usize },

    #[error("no component name entered")]
    NameAborted,

    #[error("element name `{0}` cannot be turned into a styled component")]
    UnsupportedElementName(String),

    #[error("`{0}` is not a valid component name")]
    InvalidComponentName(String),

    #[error("could not update document: {0}")]
    EditApplication(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
