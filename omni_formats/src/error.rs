use std::collections::TryReserveError;

use thiserror::Error;

/// Error conditions raised while sizing, decoding, or encoding records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record truncated at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        needed: usize,
        remaining: usize,
        offset: usize,
    },
    #[error("layout version tag {0} is not recognised")]
    UnknownLayout(i16),
    #[error("media source path is {0} bytes, longer than a 16-bit length prefix allows")]
    PathTooLong(usize),
    #[error("extra data is {0} bytes, longer than a 16-bit length prefix allows")]
    ExtraDataTooLong(usize),
    #[error("sustain time {value} does not fit the {width}-byte field of this layout")]
    SustainOutOfRange { value: i64, width: usize },
    #[error("allocation failed while copying {0}")]
    Allocation(&'static str, #[source] TryReserveError),
}
