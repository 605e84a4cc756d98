use std::fmt;

#[derive(Debug)]
pub enum TrackerError {
    EmptyRoster,
    DuplicatePlayer(String),
    UnknownPlayer(String),
    UnsupportedSchemaVersion(u8),
    InvalidSnapshot(String),
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackerError::EmptyRoster => {
                write!(f, "Roster must contain at least one player")
            }
            TrackerError::DuplicatePlayer(id) => {
                write!(f, "Duplicate player id: {}", id)
            }
            TrackerError::UnknownPlayer(id) => {
                write!(f, "Unknown player id: {}", id)
            }
            TrackerError::UnsupportedSchemaVersion(version) => {
                write!(f, "Unsupported schema version: {}", version)
            }
            TrackerError::InvalidSnapshot(msg) => {
                write!(f, "Invalid snapshot: {}", msg)
            }
            TrackerError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            TrackerError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TrackerError {}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            TrackerError::DeserializationError(err.to_string())
        } else {
            TrackerError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
