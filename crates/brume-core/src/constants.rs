//! Single source of truth for the packed vertex layout and chunk geometry.
//! These values are used by both Rust and WGSL; the renderer injects them
//! into the shader preamble so the numbers exist in exactly one place.
//!
//! Packed vertex word, fields read most-significant first:
//!
//! | bits  | field          |
//! |-------|----------------|
//! | 31:27 | x              |
//! | 26:22 | y              |
//! | 21:17 | z              |
//! | 16:15 | ao_index       |
//! | 14:9  | texture_id     |
//! | 8:6   | face_direction |
//! | 5:0   | reserved       |

/// Bit offset of the local X coordinate.
pub const X_SHIFT: u32 = 27;
/// Bit offset of the local Y coordinate.
pub const Y_SHIFT: u32 = 22;
/// Bit offset of the local Z coordinate.
pub const Z_SHIFT: u32 = 17;
/// Bit offset of the ambient-occlusion bucket.
pub const AO_SHIFT: u32 = 15;
/// Bit offset of the atlas tile index.
pub const TEXTURE_SHIFT: u32 = 9;
/// Bit offset of the face direction.
pub const FACE_SHIFT: u32 = 6;

/// Width of each local coordinate field (0-31).
pub const COORD_BITS: u32 = 5;
/// Width of the ambient-occlusion field (0-3).
pub const AO_BITS: u32 = 2;
/// Width of the atlas tile index field (0-63).
pub const TEXTURE_BITS: u32 = 6;
/// Width of the face direction field (0-7, only 0-5 meaningful).
pub const FACE_BITS: u32 = 3;
/// Bits [5:0] are reserved. Never repurpose them.
pub const RESERVED_BITS: u32 = 6;

/// Mask for a local coordinate field.
pub const COORD_MASK: u32 = (1 << COORD_BITS) - 1;
/// Mask for the ambient-occlusion field.
pub const AO_MASK: u32 = (1 << AO_BITS) - 1;
/// Mask for the atlas tile index field.
pub const TEXTURE_MASK: u32 = (1 << TEXTURE_BITS) - 1;
/// Mask for the face direction field.
pub const FACE_MASK: u32 = (1 << FACE_BITS) - 1;

/// World-space stride between adjacent chunk origins. A chunk spans 16
/// blocks per axis; the far corner of the last block sits at local
/// coordinate 16, which is why the coordinate fields carry 5 bits.
pub const CHUNK_STRIDE: i32 = 16;

/// Number of cardinal face directions.
pub const FACE_COUNT: u32 = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_cover_the_word() {
        let used = COORD_BITS * 3 + AO_BITS + TEXTURE_BITS + FACE_BITS + RESERVED_BITS;
        assert_eq!(used, 32);
    }

    #[test]
    fn test_field_shifts_are_contiguous() {
        assert_eq!(X_SHIFT + COORD_BITS, 32);
        assert_eq!(Y_SHIFT + COORD_BITS, X_SHIFT);
        assert_eq!(Z_SHIFT + COORD_BITS, Y_SHIFT);
        assert_eq!(AO_SHIFT + AO_BITS, Z_SHIFT);
        assert_eq!(TEXTURE_SHIFT + TEXTURE_BITS, AO_SHIFT);
        assert_eq!(FACE_SHIFT + FACE_BITS, TEXTURE_SHIFT);
        assert_eq!(FACE_SHIFT, RESERVED_BITS);
    }
}
