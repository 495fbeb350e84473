use glam::{IVec3, UVec3, Vec3};

use crate::constants::CHUNK_STRIDE;

/// World-space block coordinate of a chunk's origin.
/// Stays in integer arithmetic; large chunk coordinates lose no precision
/// until the final widening to float.
pub fn chunk_origin_world(chunk: IVec3) -> IVec3 {
    chunk * CHUNK_STRIDE
}

/// World-space position of a local vertex coordinate within a chunk.
pub fn chunk_local_to_world(chunk: IVec3, local: UVec3) -> IVec3 {
    chunk_origin_world(chunk) + local.as_ivec3()
}

/// The float world position the vertex stage produces for a decoded vertex.
/// Integer math first, one conversion at the end.
pub fn vertex_world_position(chunk: IVec3, local: UVec3) -> Vec3 {
    chunk_local_to_world(chunk, local).as_vec3()
}
