//! Shader source composition. The bit layout, AO table, and fog constants
//! live in Rust; a generated preamble injects them so the WGSL never
//! repeats a number. Each variant is preamble + shared decode helpers +
//! one variant file.

use brume_core::constants::{
    AO_MASK, AO_SHIFT, CHUNK_STRIDE, COORD_MASK, FACE_MASK, FACE_SHIFT, TEXTURE_MASK,
    TEXTURE_SHIFT, X_SHIFT, Y_SHIFT, Z_SHIFT,
};

use crate::ao::AO_TABLE;
use crate::fog::{FOG_COLOR, FOG_EXPONENT, FOG_START};

const DECODE_WGSL: &str = include_str!("../../../shaders/common/decode.wgsl");
const TERRAIN_WGSL: &str = include_str!("../../../shaders/render/terrain.wgsl");
const FACE_DEBUG_WGSL: &str = include_str!("../../../shaders/render/face_debug.wgsl");

fn constants_preamble() -> String {
    format!(
        "const X_SHIFT: u32 = {X_SHIFT}u;\n\
         const Y_SHIFT: u32 = {Y_SHIFT}u;\n\
         const Z_SHIFT: u32 = {Z_SHIFT}u;\n\
         const AO_SHIFT: u32 = {AO_SHIFT}u;\n\
         const TEXTURE_SHIFT: u32 = {TEXTURE_SHIFT}u;\n\
         const FACE_SHIFT: u32 = {FACE_SHIFT}u;\n\
         const COORD_MASK: u32 = {COORD_MASK}u;\n\
         const AO_MASK: u32 = {AO_MASK}u;\n\
         const TEXTURE_MASK: u32 = {TEXTURE_MASK}u;\n\
         const FACE_MASK: u32 = {FACE_MASK}u;\n\
         const CHUNK_STRIDE: i32 = {CHUNK_STRIDE};\n\
         const AO_WEIGHT_0: f32 = {:?};\n\
         const AO_WEIGHT_1: f32 = {:?};\n\
         const AO_WEIGHT_2: f32 = {:?};\n\
         const AO_WEIGHT_3: f32 = {:?};\n\
         const FOG_START: f32 = {:?};\n\
         const FOG_EXPONENT: f32 = {:?};\n\
         const FOG_COLOR: vec4<f32> = vec4<f32>({:?}, {:?}, {:?}, {:?});\n",
        AO_TABLE[0],
        AO_TABLE[1],
        AO_TABLE[2],
        AO_TABLE[3],
        FOG_START,
        FOG_EXPONENT as f32,
        FOG_COLOR.x,
        FOG_COLOR.y,
        FOG_COLOR.z,
        FOG_COLOR.w,
    )
}

/// Full source of the primary (textured + fog) variant.
pub fn terrain_source() -> String {
    let preamble = constants_preamble();
    format!("{preamble}\n{DECODE_WGSL}\n{TERRAIN_WGSL}")
}

/// Full source of the debug (direction tint, no fog) variant.
pub fn face_debug_source() -> String {
    let preamble = constants_preamble();
    format!("{preamble}\n{DECODE_WGSL}\n{FACE_DEBUG_WGSL}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_injects_layout() {
        let preamble = constants_preamble();
        assert!(preamble.contains("const X_SHIFT: u32 = 27u;"));
        assert!(preamble.contains("const COORD_MASK: u32 = 31u;"));
        assert!(preamble.contains("const CHUNK_STRIDE: i32 = 16;"));
        assert!(preamble.contains("const AO_WEIGHT_0: f32 = 0.1;"));
        assert!(preamble.contains("const FOG_START: f32 = 260.0;"));
    }

    #[test]
    fn test_variants_carry_both_entry_points() {
        for source in [terrain_source(), face_debug_source()] {
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
            assert!(source.contains("fn decode_world_position"));
        }
    }

    #[test]
    fn test_only_the_primary_variant_fogs() {
        assert!(terrain_source().contains("fog_amount"));
        assert!(!face_debug_source().contains("fog_amount"));
        assert!(face_debug_source().contains("face_tint"));
    }
}
