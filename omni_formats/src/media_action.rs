//! Media action records: the descriptor of a timed video, audio, animation,
//! or still-image clip.
//!
//! Layout after the base action fields (little-endian, unpadded):
//!
//! | field              | width                          |
//! |--------------------|--------------------------------|
//! | reserved A         | 4                              |
//! | reserved B         | 4                              |
//! | frames per second  | 4                              |
//! | media format       | 4                              |
//! | palette management | 4                              |
//! | sustain time       | 4 (V1) or 8 (V2)               |
//! | source path        | u16 length + that many bytes   |
//!
//! A missing path and an empty path share the zero-length encoding and both
//! decode to `None`.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

use crate::action::Action;
use crate::cursor::ByteCursor;
use crate::error::RecordError;
use crate::layout::LayoutVersion;
use crate::record::Streamable;

pub const MEDIA_ACTION_CLASS_NAME: &str = "MxDSMediaAction";

/// Reserved words, frame rate, media format, and palette management.
const FIXED_WORDS_SIZE: u32 = 4 * 5;
const PATH_PREFIX_SIZE: u32 = 2;

/// Exclusively owned media source path.
///
/// Cloning duplicates the buffer; no two records ever share one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourcePath(Box<[u8]>);

impl SourcePath {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() > u16::MAX as usize {
            return Err(RecordError::PathTooLong(bytes.len()));
        }
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(bytes.len())
            .map_err(|err| RecordError::Allocation("media source path", err))?;
        buffer.extend_from_slice(bytes);
        Ok(Self(buffer.into_boxed_slice()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl fmt::Debug for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl Serialize for SourcePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Decoded media action. `Clone` copies the base action as well; `copy_from`
/// copies only the media fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaAction {
    action: Action,
    size_on_disk: u32,
    media_source_path: Option<SourcePath>,
    reserved: [u32; 2],
    frames_per_second: i32,
    media_format: i32,
    palette_management: i32,
    sustain_time: i64,
    layout: LayoutVersion,
}

impl MediaAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a single base-plus-media record from `bytes`.
    pub fn from_bytes(bytes: &[u8], version_tag: i16) -> Result<Self, RecordError> {
        let mut cursor = ByteCursor::new(bytes);
        let mut record = Self::new();
        record.decode(&mut cursor, version_tag)?;
        if !cursor.is_empty() {
            log::warn!(
                "{} trailing bytes after media action {}",
                cursor.remaining(),
                record.action.object_id
            );
        }
        Ok(record)
    }

    /// Read a file holding exactly one serialized media action.
    pub fn open<P: AsRef<Path>>(path: P, version_tag: i16) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_bytes(&bytes, version_tag)
            .with_context(|| format!("decoding media action from {}", path.display()))
    }

    /// Replace the owned path with a fresh copy of `path`. Empty paths are
    /// stored as `None`.
    pub fn copy_media_source_path(&mut self, path: Option<&[u8]>) -> Result<(), RecordError> {
        self.media_source_path = match path {
            Some(bytes) if !bytes.is_empty() => Some(SourcePath::from_bytes(bytes)?),
            _ => None,
        };
        Ok(())
    }

    /// Copy every media field of `other`, duplicating its path. The base
    /// action is left alone.
    pub fn copy_from(&mut self, other: &MediaAction) -> Result<(), RecordError> {
        self.copy_media_source_path(other.media_source_path.as_ref().map(SourcePath::as_bytes))?;
        self.size_on_disk = other.size_on_disk;
        self.reserved = other.reserved;
        self.frames_per_second = other.frames_per_second;
        self.media_format = other.media_format;
        self.palette_management = other.palette_management;
        self.sustain_time = other.sustain_time;
        self.layout = other.layout;
        Ok(())
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn action_mut(&mut self) -> &mut Action {
        &mut self.action
    }

    pub fn media_source_path(&self) -> Option<&SourcePath> {
        self.media_source_path.as_ref()
    }

    /// Bytes consumed by the media fields during the last decode.
    pub fn recorded_size(&self) -> u32 {
        self.size_on_disk
    }

    pub fn reserved(&self) -> [u32; 2] {
        self.reserved
    }

    pub fn layout(&self) -> LayoutVersion {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutVersion) {
        self.layout = layout;
    }

    pub fn frames_per_second(&self) -> i32 {
        self.frames_per_second
    }

    pub fn set_frames_per_second(&mut self, value: i32) {
        self.frames_per_second = value;
    }

    pub fn media_format(&self) -> i32 {
        self.media_format
    }

    pub fn set_media_format(&mut self, value: i32) {
        self.media_format = value;
    }

    pub fn palette_management(&self) -> i32 {
        self.palette_management
    }

    pub fn set_palette_management(&mut self, value: i32) {
        self.palette_management = value;
    }

    pub fn sustain_time(&self) -> i64 {
        self.sustain_time
    }

    pub fn set_sustain_time(&mut self, value: i64) {
        self.sustain_time = value;
    }

    fn media_size(&self) -> u32 {
        let path_len = self.media_source_path.as_ref().map_or(0, SourcePath::len);
        FIXED_WORDS_SIZE
            + self.layout.sustain_width() as u32
            + PATH_PREFIX_SIZE
            + path_len as u32
    }
}

impl Streamable for MediaAction {
    fn class_name(&self) -> &'static str {
        MEDIA_ACTION_CLASS_NAME
    }

    fn is_a(&self, name: &str) -> bool {
        name == MEDIA_ACTION_CLASS_NAME || self.action.is_a(name)
    }

    fn size_on_disk(&self) -> u32 {
        self.action.size_on_disk() + self.media_size()
    }

    fn decode(
        &mut self,
        cursor: &mut ByteCursor<'_>,
        version_tag: i16,
    ) -> Result<(), RecordError> {
        let layout = LayoutVersion::try_from(version_tag)?;

        // Decode against a scratch cursor and commit base and media together.
        let mut scratch = cursor.clone();
        let mut action = Action::new();
        action.decode(&mut scratch, version_tag)?;

        let start = scratch.position();
        let reserved = [scratch.read_u32()?, scratch.read_u32()?];
        let frames_per_second = scratch.read_i32()?;
        let media_format = scratch.read_i32()?;
        let palette_management = scratch.read_i32()?;
        let sustain_time = match layout {
            LayoutVersion::V1 => i64::from(scratch.read_i32()?),
            LayoutVersion::V2 => scratch.read_i64()?,
        };
        let path = scratch.read_prefixed()?;

        self.copy_media_source_path(Some(path))?;
        self.action = action;
        self.reserved = reserved;
        self.frames_per_second = frames_per_second;
        self.media_format = media_format;
        self.palette_management = palette_management;
        self.sustain_time = sustain_time;
        self.layout = layout;
        self.size_on_disk = (scratch.position() - start) as u32;
        *cursor = scratch;

        log::trace!(
            "decoded media action {} ({:?}, {} bytes): {:?}",
            self.action.object_id,
            layout,
            self.size_on_disk,
            self.media_source_path
        );
        Ok(())
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), RecordError> {
        // Range-check before the first byte is appended.
        let sustain = match self.layout {
            LayoutVersion::V1 => i32::try_from(self.sustain_time)
                .map(|narrow| narrow.to_le_bytes().to_vec())
                .map_err(|_| RecordError::SustainOutOfRange {
                    value: self.sustain_time,
                    width: 4,
                })?,
            LayoutVersion::V2 => self.sustain_time.to_le_bytes().to_vec(),
        };

        self.action.encode(out)?;
        out.extend_from_slice(&self.reserved[0].to_le_bytes());
        out.extend_from_slice(&self.reserved[1].to_le_bytes());
        out.extend_from_slice(&self.frames_per_second.to_le_bytes());
        out.extend_from_slice(&self.media_format.to_le_bytes());
        out.extend_from_slice(&self.palette_management.to_le_bytes());
        out.extend_from_slice(&sustain);
        let path = self
            .media_source_path
            .as_ref()
            .map_or(&[][..], SourcePath::as_bytes);
        out.extend_from_slice(&(path.len() as u16).to_le_bytes());
        out.extend_from_slice(path);
        Ok(())
    }
}
