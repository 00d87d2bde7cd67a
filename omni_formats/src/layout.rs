//! Versioned on-disk layouts for action records.
//!
//! Each authoring-tool release that changed the record layout gets its own
//! variant. Decoders branch on the variant; an existing branch is never edited
//! to accommodate a newer layout.

use serde::Serialize;

use crate::error::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LayoutVersion {
    /// Sustain time stored as a 32-bit word.
    #[default]
    V1,
    /// Sustain time widened to 64 bits.
    V2,
}

impl LayoutVersion {
    pub fn tag(self) -> i16 {
        match self {
            LayoutVersion::V1 => 1,
            LayoutVersion::V2 => 2,
        }
    }

    /// Width in bytes of the sustain-time field.
    pub fn sustain_width(self) -> usize {
        match self {
            LayoutVersion::V1 => 4,
            LayoutVersion::V2 => 8,
        }
    }
}

impl TryFrom<i16> for LayoutVersion {
    type Error = RecordError;

    fn try_from(tag: i16) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(LayoutVersion::V1),
            2 => Ok(LayoutVersion::V2),
            other => Err(RecordError::UnknownLayout(other)),
        }
    }
}
