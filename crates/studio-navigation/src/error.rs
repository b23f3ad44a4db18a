//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Malformed percent escape in {0:?}")]
    MalformedEscape(String),

    #[error("Decoded component is not valid UTF-8: {0:?}")]
    InvalidUtf8(String),
}
