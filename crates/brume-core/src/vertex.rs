use bytemuck::{Pod, Zeroable};
use glam::UVec3;

use crate::constants::{
    AO_MASK, AO_SHIFT, COORD_MASK, FACE_MASK, FACE_SHIFT, TEXTURE_MASK, TEXTURE_SHIFT, X_SHIFT,
    Y_SHIFT, Z_SHIFT,
};
use crate::direction::Direction;

/// One terrain vertex, packed into a single u32 for upload.
///
/// Every field is masked to its declared width on construction; values
/// outside the logically valid range (a texture_id past the atlas capacity,
/// a face index of 6 or 7) are the mesher's responsibility. Decoding never
/// validates, it only shifts and masks.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedVertex(pub u32);

impl PackedVertex {
    /// Pack local position, ambient-occlusion bucket, atlas tile index, and
    /// face direction into one word. Bits [5:0] stay zero (reserved).
    pub fn new(position: UVec3, ao_index: u32, texture_id: u32, direction: Direction) -> Self {
        let word = ((position.x & COORD_MASK) << X_SHIFT)
            | ((position.y & COORD_MASK) << Y_SHIFT)
            | ((position.z & COORD_MASK) << Z_SHIFT)
            | ((ao_index & AO_MASK) << AO_SHIFT)
            | ((texture_id & TEXTURE_MASK) << TEXTURE_SHIFT)
            | ((direction as u32 & FACE_MASK) << FACE_SHIFT);

        Self(word)
    }

    /// Local block-space position within the chunk, each axis in [0, 31].
    pub fn local_position(self) -> UVec3 {
        UVec3::new(
            (self.0 >> X_SHIFT) & COORD_MASK,
            (self.0 >> Y_SHIFT) & COORD_MASK,
            (self.0 >> Z_SHIFT) & COORD_MASK,
        )
    }

    /// Ambient-occlusion bucket in [0, 3].
    pub fn ao_index(self) -> u32 {
        (self.0 >> AO_SHIFT) & AO_MASK
    }

    /// Atlas tile index in [0, 63].
    pub fn texture_id(self) -> u32 {
        (self.0 >> TEXTURE_SHIFT) & TEXTURE_MASK
    }

    /// Raw 3-bit face field in [0, 7].
    pub fn face_index(self) -> u32 {
        (self.0 >> FACE_SHIFT) & FACE_MASK
    }

    /// Decoded face direction (raw values 6 and 7 fall back to Top).
    pub fn direction(self) -> Direction {
        Direction::from_index(self.face_index())
    }
}
