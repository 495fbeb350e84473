use brume_core::AtlasLayout;
use glam::{IVec3, Mat4, Vec3};

/// GPU-uploadable camera state. Must match CameraUniforms in the WGSL
/// variants; the debug shader declares only the two matrices and binding
/// the same 144-byte buffer remains valid.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// World position, w unused. Only the fog term reads this.
    pub position: [f32; 4],
}

impl CameraUniforms {
    pub fn new(projection: Mat4, view: Mat4, position: Vec3) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            position: position.extend(0.0).to_array(),
        }
    }
}

/// GPU-uploadable atlas tile counts. Must match AtlasUniforms in WGSL.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AtlasUniforms {
    pub rows: u32,
    pub columns: u32,
}

impl From<AtlasLayout> for AtlasUniforms {
    fn from(layout: AtlasLayout) -> Self {
        Self {
            rows: layout.rows,
            columns: layout.columns,
        }
    }
}

/// GPU-uploadable per-draw chunk origin, in chunk units. Must match
/// ChunkOffset in WGSL; vec3<i32> rounds up to 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ChunkOffsetUniform {
    pub offset: [i32; 3],
    pub _padding: u32,
}

impl ChunkOffsetUniform {
    pub fn new(origin: IVec3) -> Self {
        Self {
            offset: origin.to_array(),
            _padding: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 144);
        assert_eq!(std::mem::size_of::<AtlasUniforms>(), 8);
        assert_eq!(std::mem::size_of::<ChunkOffsetUniform>(), 16);
    }

    #[test]
    fn test_camera_matrices_are_column_major() {
        let projection = Mat4::perspective_rh(1.0, 1.5, 0.1, 1000.0);
        let uniforms = CameraUniforms::new(projection, Mat4::IDENTITY, Vec3::ZERO);
        assert_eq!(uniforms.projection, projection.to_cols_array_2d());
        assert_eq!(uniforms.view[0][0], 1.0);
    }

    #[test]
    fn test_chunk_offset_keeps_sign() {
        let uniform = ChunkOffsetUniform::new(IVec3::new(-7, 0, 12));
        assert_eq!(uniform.offset, [-7, 0, 12]);
        assert_eq!(uniform._padding, 0);
    }
}
