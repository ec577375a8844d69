use thiserror::Error;

/// Why a lyrics lookup produced no usable result
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Lyrics service returned status {0}")]
    Status(u16),

    #[error("Malformed lyrics response: {0}")]
    MalformedResponse(String),
}

/// Why a file's audio stream could not be described
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Prober exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("Missing {0} in prober output")]
    MissingField(&'static str),

    #[error("Invalid {field} in prober output: {value:?}")]
    InvalidField { field: &'static str, value: String },
}
