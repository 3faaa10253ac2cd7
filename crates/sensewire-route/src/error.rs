use sensewire_codec::CodecError;

/// Reasons a message cannot be routed to a decoded record.
///
/// All recoverable: the caller logs the condition and discards the one
/// message, continuing with the next.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The topic has fewer segments than routing needs.
    #[error("malformed topic {topic:?}: need at least 5 '/'-separated segments")]
    MalformedTopic { topic: String },

    /// The topic names a modality the registry does not know.
    #[error("no layout registered for modality {modality:?}")]
    UnknownModality { modality: String },

    /// The payload failed to decode against the modality's schema.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, RouteError>;
