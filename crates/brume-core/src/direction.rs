use glam::IVec3;

/// One of the six cardinal face orientations a quad can carry.
/// Discriminants match the 3-bit face_direction field of the packed vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Front = 4,
    Back = 5,
}

/// All six face directions in discriminant order.
pub const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::Top,
    Direction::Bottom,
    Direction::Left,
    Direction::Right,
    Direction::Front,
    Direction::Back,
];

impl Direction {
    /// Unit offset toward the face. Y-up convention: Top = (0,1,0).
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::Top => IVec3::Y,
            Direction::Bottom => IVec3::NEG_Y,
            Direction::Left => IVec3::NEG_X,
            Direction::Right => IVec3::X,
            Direction::Front => IVec3::Z,
            Direction::Back => IVec3::NEG_Z,
        }
    }

    /// Decode a 3-bit face field. The field can hold 6 and 7; those fall
    /// back to Top, mirroring the shader's switch default arm.
    pub fn from_index(index: u32) -> Direction {
        match index & 0x7 {
            1 => Direction::Bottom,
            2 => Direction::Left,
            3 => Direction::Right,
            4 => Direction::Front,
            5 => Direction::Back,
            _ => Direction::Top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_directions_unique_offsets() {
        for (i, a) in ALL_DIRECTIONS.iter().enumerate() {
            for (j, b) in ALL_DIRECTIONS.iter().enumerate() {
                if i != j {
                    assert_ne!(a.offset(), b.offset(), "directions {i} and {j} share offset");
                }
            }
        }
    }

    #[test]
    fn test_no_zero_offset() {
        for dir in ALL_DIRECTIONS {
            assert_ne!(dir.offset(), IVec3::ZERO, "{dir:?} has zero offset");
        }
    }

    #[test]
    fn test_from_index_roundtrip() {
        for dir in ALL_DIRECTIONS {
            assert_eq!(Direction::from_index(dir as u32), dir);
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(Direction::from_index(6), Direction::Top);
        assert_eq!(Direction::from_index(7), Direction::Top);
        // Only the low 3 bits participate
        assert_eq!(Direction::from_index(0b1000 | 3), Direction::Right);
    }
}
