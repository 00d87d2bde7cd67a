//! Base action record: identity, timing, placement, and free-form extra data.

use serde::{Serialize, Serializer};

use crate::cursor::ByteCursor;
use crate::error::RecordError;
use crate::layout::LayoutVersion;
use crate::record::Streamable;

pub const ACTION_CLASS_NAME: &str = "MxDSAction";
pub const OBJECT_CLASS_NAME: &str = "MxDSObject";

/// Width of every fixed field, excluding the extra-data length prefix.
const FIXED_SIZE: u32 = 4 * 5 + 8 * 9;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Action {
    pub object_id: u32,
    pub flags: u32,
    pub start_time: i32,
    pub duration: i32,
    pub loop_count: i32,
    pub location: [f64; 3],
    pub direction: [f64; 3],
    pub up: [f64; 3],
    #[serde(serialize_with = "lossy_bytes")]
    extra_data: Vec<u8>,
}

impl Action {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extra_data(&self) -> &[u8] {
        &self.extra_data
    }

    pub fn set_extra_data(&mut self, data: &[u8]) -> Result<(), RecordError> {
        if data.len() > u16::MAX as usize {
            return Err(RecordError::ExtraDataTooLong(data.len()));
        }
        let mut copy = Vec::new();
        copy.try_reserve_exact(data.len())
            .map_err(|err| RecordError::Allocation("action extra data", err))?;
        copy.extend_from_slice(data);
        self.extra_data = copy;
        Ok(())
    }
}

impl Streamable for Action {
    fn class_name(&self) -> &'static str {
        ACTION_CLASS_NAME
    }

    fn is_a(&self, name: &str) -> bool {
        name == ACTION_CLASS_NAME || name == OBJECT_CLASS_NAME
    }

    fn size_on_disk(&self) -> u32 {
        FIXED_SIZE + 2 + self.extra_data.len() as u32
    }

    fn decode(
        &mut self,
        cursor: &mut ByteCursor<'_>,
        version_tag: i16,
    ) -> Result<(), RecordError> {
        // Every known layout shares the base fields; only the tag is checked.
        LayoutVersion::try_from(version_tag)?;

        let object_id = cursor.read_u32()?;
        let flags = cursor.read_u32()?;
        let start_time = cursor.read_i32()?;
        let duration = cursor.read_i32()?;
        let loop_count = cursor.read_i32()?;
        let location = read_vec3(cursor)?;
        let direction = read_vec3(cursor)?;
        let up = read_vec3(cursor)?;
        let extra = cursor.read_prefixed()?;

        self.set_extra_data(extra)?;
        self.object_id = object_id;
        self.flags = flags;
        self.start_time = start_time;
        self.duration = duration;
        self.loop_count = loop_count;
        self.location = location;
        self.direction = direction;
        self.up = up;
        Ok(())
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), RecordError> {
        out.extend_from_slice(&self.object_id.to_le_bytes());
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.extend_from_slice(&self.start_time.to_le_bytes());
        out.extend_from_slice(&self.duration.to_le_bytes());
        out.extend_from_slice(&self.loop_count.to_le_bytes());
        for vector in [&self.location, &self.direction, &self.up] {
            for component in vector {
                out.extend_from_slice(&component.to_le_bytes());
            }
        }
        out.extend_from_slice(&(self.extra_data.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.extra_data);
        Ok(())
    }
}

fn read_vec3(cursor: &mut ByteCursor<'_>) -> Result<[f64; 3], RecordError> {
    Ok([cursor.read_f64()?, cursor.read_f64()?, cursor.read_f64()?])
}

fn lossy_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}
