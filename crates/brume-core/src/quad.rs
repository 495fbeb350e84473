//! Quad emission contract: the corner order and index pattern the shading
//! core assumes. The mesher decides *which* faces exist; whatever it emits
//! must follow these tables, or UVs land on the wrong corners with no
//! diagnostic.

use glam::UVec3;

use crate::direction::Direction;
use crate::vertex::PackedVertex;

/// Index pattern for one quad: two triangles over four vertices, clockwise
/// front faces.
pub const QUAD_INDEX_PATTERN: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Indices for the `quad`-th face in a mesh, offset into its four vertices.
pub fn quad_indices(quad: u16) -> [u16; 6] {
    QUAD_INDEX_PATTERN.map(|i| i + quad * 4)
}

impl Direction {
    /// Unit-cube corners of this face in emission order. Position 0 is the
    /// corner the atlas maps to top-left; vertex_index mod 4 walks
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn corner_offsets(self) -> [UVec3; 4] {
        match self {
            Direction::Top => [
                UVec3::new(0, 1, 0),
                UVec3::new(1, 1, 0),
                UVec3::new(1, 1, 1),
                UVec3::new(0, 1, 1),
            ],
            Direction::Bottom => [
                UVec3::new(1, 0, 1),
                UVec3::new(1, 0, 0),
                UVec3::new(0, 0, 0),
                UVec3::new(0, 0, 1),
            ],
            Direction::Left => [
                UVec3::new(0, 1, 0),
                UVec3::new(0, 1, 1),
                UVec3::new(0, 0, 1),
                UVec3::new(0, 0, 0),
            ],
            Direction::Right => [
                UVec3::new(1, 1, 1),
                UVec3::new(1, 1, 0),
                UVec3::new(1, 0, 0),
                UVec3::new(1, 0, 1),
            ],
            Direction::Front => [
                UVec3::new(0, 1, 1),
                UVec3::new(1, 1, 1),
                UVec3::new(1, 0, 1),
                UVec3::new(0, 0, 1),
            ],
            Direction::Back => [
                UVec3::new(1, 1, 0),
                UVec3::new(0, 1, 0),
                UVec3::new(0, 0, 0),
                UVec3::new(1, 0, 0),
            ],
        }
    }
}

/// Pack the four vertices of one block face. `position` is the block's
/// local coordinate within the chunk, `ao` the per-corner occlusion
/// buckets in emission order.
pub fn emit_face(
    position: UVec3,
    ao: [u32; 4],
    texture_id: u32,
    direction: Direction,
) -> [PackedVertex; 4] {
    let corners = direction.corner_offsets();
    std::array::from_fn(|i| {
        PackedVertex::new(position + corners[i], ao[i], texture_id, direction)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::ALL_DIRECTIONS;
    use glam::uvec3;

    #[test]
    fn test_quad_indices_offset() {
        assert_eq!(quad_indices(0), [0, 1, 2, 2, 3, 0]);
        assert_eq!(quad_indices(2), [8, 9, 10, 10, 11, 8]);
    }

    #[test]
    fn test_index_pattern_cycles_corners() {
        // vertex_index mod 4 must reach every corner exactly once per quad
        for quad in [0u16, 1, 7] {
            let mut seen = [false; 4];
            for index in quad_indices(quad) {
                seen[(index % 4) as usize] = true;
            }
            assert_eq!(seen, [true; 4]);
        }
    }

    #[test]
    fn test_corner_offsets_lie_on_their_face() {
        for dir in ALL_DIRECTIONS {
            let offset = dir.offset();
            for corner in dir.corner_offsets() {
                // The fixed axis of every corner matches the face side
                let c = corner.as_ivec3();
                if offset.x != 0 {
                    assert_eq!(c.x, offset.x.max(0), "{dir:?}");
                } else if offset.y != 0 {
                    assert_eq!(c.y, offset.y.max(0), "{dir:?}");
                } else {
                    assert_eq!(c.z, offset.z.max(0), "{dir:?}");
                }
            }
        }
    }

    #[test]
    fn test_emit_face_packs_per_corner_ao() {
        let vertices = emit_face(uvec3(3, 0, 5), [0, 1, 2, 3], 9, Direction::Top);
        for (i, v) in vertices.iter().enumerate() {
            assert_eq!(v.ao_index(), i as u32);
            assert_eq!(v.texture_id(), 9);
            assert_eq!(v.direction(), Direction::Top);
        }
    }

    #[test]
    fn test_emit_face_positions_offset_from_block() {
        let vertices = emit_face(uvec3(2, 4, 6), [3; 4], 0, Direction::Front);
        let corners = Direction::Front.corner_offsets();
        for (v, corner) in vertices.iter().zip(corners) {
            assert_eq!(v.local_position(), uvec3(2, 4, 6) + corner);
        }
    }
}
