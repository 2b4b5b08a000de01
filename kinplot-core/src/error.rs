/// Error types shared by primitives and render surfaces
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A named orientation or direction that is not one of the known literals
    #[error("invalid {kind} selector: {value:?}")]
    InvalidSelector { kind: &'static str, value: String },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The primitive cannot perform the requested operation
    #[error("{primitive} does not support {operation}")]
    MissingCapability {
        primitive: &'static str,
        operation: &'static str,
    },

    #[error("invalid style value: {0}")]
    InvalidStyle(String),

    #[error("surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, Error>;
