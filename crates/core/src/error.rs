use crate::header::WaveformHeader;

/// Result alias that carries the custom [`PulsePatternError`] type.
pub type Result<T> = std::result::Result<T, PulsePatternError>;

/// Common error type for the core crate.
///
/// Only conditions that stop a decode are represented here. A missing header
/// or an undecodable section is not an error; those are reported through
/// [`crate::DecodeIssue`] on the successful result.
#[derive(Debug, thiserror::Error)]
pub enum PulsePatternError {
    /// A section carried a valid frequency group but no intensity samples, so
    /// its loop count cannot be derived.
    #[error("section {section} has a frequency group but no intensity samples")]
    EmptyIntensityList { section: usize },
    /// Every section was dropped. The header, if one was found, is preserved so
    /// callers can still report it.
    #[error("no decodable sections in waveform pattern")]
    NoSectionsDecoded { header: Option<WaveformHeader> },
    /// Interpolation needs at least one subpoint per tick.
    #[error("range steps must be at least 1")]
    InvalidRangeSteps,
    /// A batch size of zero would never make progress.
    #[error("stream batch size must be at least 1")]
    InvalidBatchSize,
    /// Lookup of a waveform name that is not registered in the library.
    #[error("unknown waveform `{0}`")]
    UnknownWaveform(String),
    /// Free-form message, mostly surfaced by the command line front end.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration files that fail to parse.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl PulsePatternError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for PulsePatternError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PulsePatternError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
