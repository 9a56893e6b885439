//! Error types for rustcoinc-core.

use crate::channel::ChannelId;
use thiserror::Error;

/// Result type alias for rustcoinc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for rustcoinc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The role counts match none of the supported matcher layouts.
    #[error(
        "unsupported combination of {coincidence} coincidence and {anti_coincidence} anti-coincidence channels"
    )]
    UnsupportedConfiguration {
        coincidence: usize,
        anti_coincidence: usize,
    },

    /// Timestamp and amplitude sequences of a channel differ in length.
    #[error("channel {channel}: {timestamps} timestamps but {amplitudes} amplitudes")]
    LengthMismatch {
        channel: ChannelId,
        timestamps: usize,
        amplitudes: usize,
    },

    /// A timestamp is smaller than its predecessor.
    #[error("channel {channel}: timestamps decrease at index {index}")]
    UnsortedTimestamps { channel: ChannelId, index: usize },

    /// Unknown channel role code.
    #[error("invalid channel role: {0}")]
    InvalidRole(String),

    /// Unknown channel name.
    #[error("invalid channel: {0}")]
    InvalidChannel(String),

    /// Histogram bin width must be finite and positive.
    #[error("invalid bin width: {0}")]
    InvalidBinWidth(f64),

    /// A table column has a different row count than the first column.
    #[error("column {column:?} has {rows} rows, expected {expected}")]
    MisalignedColumn {
        column: String,
        rows: usize,
        expected: usize,
    },

    /// Not enough events to build the requested quantity.
    #[error("need at least {required} events, found {found}")]
    InsufficientEvents { required: usize, found: usize },
}
