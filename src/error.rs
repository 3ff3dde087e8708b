use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing {0} information in CEDAR json")]
    MissingStanza(String),

    #[error("missing required field {field} in {stanza}")]
    MissingField { stanza: String, field: String },

    #[error("malformed field {field}: expected {expected}")]
    Malformed { field: String, expected: &'static str },

    #[error("unrecognized boolean value {0:?} (accepted: yes, no, true, false)")]
    InvalidBoolean(String),

    #[error("unknown data type, none of {0} present")]
    UnknownDataType(String),
}

impl ExtractError {
    /// Stable error kind, recorded alongside the message in the result envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::MissingStanza(_) => "missing_stanza",
            ExtractError::MissingField { .. } => "missing_field",
            ExtractError::Malformed { .. } => "malformed_field",
            ExtractError::InvalidBoolean(_) => "invalid_boolean",
            ExtractError::UnknownDataType(_) => "unknown_data_type",
        }
    }
}

#[derive(Debug, Error)]
pub enum CrosswalkError {
    #[error("extraction did not succeed: {0}")]
    FailedExtraction(String),

    #[error("missing {0} section in extracted model")]
    MissingSection(&'static str),

    #[error("unable to process type: {0}")]
    UnsupportedType(String),
}
