//! Nibble packing of light fields for storage.
//!
//! Block light and sky light are kept in two parallel byte arrays. Voxels
//! `x` and `x + 1` (even `x`) at the same `(y, z)` share one byte: the even
//! voxel in the low nibble, the odd voxel in the high nibble.

use crate::error::LightError;
use crate::value::LightValue;

pub const SECTION_SIDE: usize = 16;
pub const SECTION_VOLUME: usize = SECTION_SIDE * SECTION_SIDE * SECTION_SIDE;
/// Bytes per channel for one full section.
pub const PACKED_SECTION_LEN: usize = SECTION_VOLUME / 2;

/// Linear position of a voxel inside a 16x16x16 section.
#[inline]
pub fn voxel_index(x: usize, y: usize, z: usize) -> usize {
    (y * SECTION_SIDE + z) * SECTION_SIDE + x
}

#[inline]
pub fn byte_index(x: usize, y: usize, z: usize) -> usize {
    voxel_index(x, y, z) / 2
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PackedLight {
    pub block: Vec<u8>,
    pub sky: Vec<u8>,
}

impl PackedLight {
    pub fn decode(&self) -> Result<Vec<LightValue>, LightError> {
        decode(&self.block, &self.sky)
    }
}

/// Packs `field`, indexed by [`voxel_index`]. An odd trailing voxel leaves
/// the final high nibbles zero.
pub fn encode(field: &[LightValue]) -> PackedLight {
    let len = field.len().div_ceil(2);
    let mut block = vec![0u8; len];
    let mut sky = vec![0u8; len];
    for (i, v) in field.iter().enumerate() {
        let shift = (i & 1) * 4;
        block[i / 2] |= v.block_light() << shift;
        sky[i / 2] |= v.sky_light() << shift;
    }
    PackedLight { block, sky }
}

/// Exact inverse of [`encode`] for even-length fields.
pub fn decode(block: &[u8], sky: &[u8]) -> Result<Vec<LightValue>, LightError> {
    if block.len() != sky.len() {
        return Err(LightError::MalformedLightData {
            block: block.len(),
            sky: sky.len(),
        });
    }
    let mut field = Vec::with_capacity(block.len() * 2);
    for (&b, &s) in block.iter().zip(sky) {
        field.push(LightValue::new(b & 0x0F, s & 0x0F));
        field.push(LightValue::new(b >> 4, s >> 4));
    }
    Ok(field)
}

/// Like [`decode`] but insists on one full section per channel.
pub fn decode_section(block: &[u8], sky: &[u8]) -> Result<Vec<LightValue>, LightError> {
    if block.len() == sky.len() && block.len() != PACKED_SECTION_LEN {
        return Err(LightError::SectionLength {
            expected: PACKED_SECTION_LEN,
            found: block.len(),
        });
    }
    decode(block, sky)
}
