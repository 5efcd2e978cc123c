use std::fmt::{Display, Formatter};
use std::io::{Error as IoError, ErrorKind};

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum AppResponse {
    StorageError(String),
    SerializationError(String),
    NotFound(String),
    ValidationError(String),
    BadRequest(String),
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppResponse::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl std::error::Error for AppResponse {}

impl From<IoError> for AppResponse {
    fn from(err: IoError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => AppResponse::NotFound(format!("Data file not found: {}", err)),
            ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
                AppResponse::SerializationError(format!("Data file is unreadable: {}", err))
            }
            _ => AppResponse::StorageError(format!("IO error: {}", err)),
        }
    }
}

impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        AppResponse::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AppResponse::Ok(_))
    }
}
