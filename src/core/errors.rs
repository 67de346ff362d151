use thiserror::Error;

pub const NO_RESPONSE_MESSAGE: &str =
    "Server is not responding. Please check if the backend is running.";
pub const GENERIC_SERVER_MESSAGE: &str = "An error occurred";

/// A local precondition failed. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// How a remote call failed, as seen from the client side of the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{}", NO_RESPONSE_MESSAGE)]
    Network,

    #[error("{0}")]
    Local(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("{}", NO_RESPONSE_MESSAGE)]
    Network,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Local(String),
}

impl From<TransportError> for WorkflowError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Server { status, message } => WorkflowError::Server { status, message },
            TransportError::Network => WorkflowError::Network,
            TransportError::Local(message) => WorkflowError::Local(message),
        }
    }
}

impl WorkflowError {
    /// The single line shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_reduce_to_one_message() {
        let server: WorkflowError = TransportError::Server {
            status: 413,
            message: "file too large".into(),
        }
        .into();
        assert_eq!(server.message(), "file too large");

        let network: WorkflowError = TransportError::Network.into();
        assert_eq!(network.message(), NO_RESPONSE_MESSAGE);

        let local: WorkflowError = TransportError::Local("builder error".into()).into();
        assert_eq!(local.message(), "builder error");
    }
}
