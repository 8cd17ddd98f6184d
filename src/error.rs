use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// A byte outside the Base64 alphabet was found while decoding.
    #[error("'{0}' is not a base64 character")]
    InvalidBase64Character(char),

    /// A Base64 VLQ run ended with its continuation bit still set.
    #[error("base64 VLQ input ends in the middle of a quantity")]
    TruncatedVlq,
}
