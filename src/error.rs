use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Data unavailable: {message}")]
    DataUnavailable { message: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },
}

impl QueryError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        QueryError::DataUnavailable {
            message: message.into(),
        }
    }
}
