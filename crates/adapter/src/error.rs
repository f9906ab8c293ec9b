use thiserror::Error;

/// Errors raised while building outbound requests or decoding responses.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("no bid requests to build from")]
    EmptyBatch,

    #[error("invalid slot configuration: {message}")]
    InvalidSlot { message: String },

    #[error("failed to serialize bid request: {message}")]
    Serialization { message: String },

    #[error("malformed bidder response: {message}")]
    MalformedResponse { message: String },
}
