use crate::cursor::ByteCursor;
use crate::error::RecordError;

/// Shared surface of every streamed action record.
///
/// Type checks walk a single ancestor chain: a record answers `is_a` for its
/// own tag and defers everything else to the record it extends.
pub trait Streamable {
    fn class_name(&self) -> &'static str;

    fn is_a(&self, name: &str) -> bool;

    /// Bytes the record occupies when written, computed from current state.
    fn size_on_disk(&self) -> u32;

    /// Decode the record from `cursor`, advancing past every consumed byte.
    fn decode(
        &mut self,
        cursor: &mut ByteCursor<'_>,
        version_tag: i16,
    ) -> Result<(), RecordError>;

    /// Append exactly `size_on_disk()` bytes to `out`.
    fn encode(&self, out: &mut Vec<u8>) -> Result<(), RecordError>;
}
