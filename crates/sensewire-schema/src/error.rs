/// Errors that can occur while building the registry.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A schema with this modality name is already registered.
    #[error("modality {0} is already registered")]
    Duplicate(String),

    /// The schema declares no fields after the timestamp.
    #[error("modality {0} declares no fields after the timestamp")]
    EmptyLayout(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
