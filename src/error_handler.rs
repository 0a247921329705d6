// opti-week/client/src/error_handler.rs
use awc::error::{PayloadError, SendRequestError};
use std::fmt;

/// Every failure of an outbound call to the planner service.
#[derive(Debug)]
pub enum ClientError {
    Transport(String),
    Status { status: u16, body: String },
    Decode(String),
    InvalidRequest(String),
}

impl ClientError {
    fn from_send_error(error: SendRequestError) -> ClientError {
        log::error!("Request to planner service failed: {}", error);
        ClientError::Transport(error.to_string())
    }

    fn from_json_error(error: serde_json::Error) -> ClientError {
        log::error!("Could not decode planner service response: {}", error);
        ClientError::Decode(error.to_string())
    }

    fn from_payload_error(error: PayloadError) -> ClientError {
        log::error!("Could not read planner service response body: {}", error);
        ClientError::Transport(error.to_string())
    }

    /// HTTP status carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<SendRequestError> for ClientError {
    fn from(error: SendRequestError) -> ClientError {
        ClientError::from_send_error(error)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> ClientError {
        ClientError::from_json_error(error)
    }
}

impl From<PayloadError> for ClientError {
    fn from(error: PayloadError) -> ClientError {
        ClientError::from_payload_error(error)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Transport Error: {}", msg),
            ClientError::Status { status, body } if body.is_empty() => {
                write!(f, "HTTP Error: status {}", status)
            }
            ClientError::Status { status, body } => {
                write!(f, "HTTP Error: status {}: {}", status, body)
            }
            ClientError::Decode(msg) => write!(f, "Decode Error: {}", msg),
            ClientError::InvalidRequest(msg) => write!(f, "Invalid Request: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}
