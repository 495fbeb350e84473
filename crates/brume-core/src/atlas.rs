use glam::Vec2;

/// Row/column tile counts of the texture atlas. Defines the UV size of one
/// tile; immutable for the lifetime of a loaded atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    pub rows: u32,
    pub columns: u32,
}

impl AtlasLayout {
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Derive the layout from the atlas image dimensions and the square
    /// tile edge length in pixels.
    pub fn from_texture_size(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            rows: height / tile_size,
            columns: width / tile_size,
        }
    }

    /// Total number of addressable tiles.
    pub fn tile_count(self) -> u32 {
        self.rows * self.columns
    }

    /// UV of one corner of one tile. Tiles are indexed row-major: column =
    /// id mod columns, row = id div columns. Corners follow the quad
    /// emission order, `corner` = vertex_index mod 4:
    ///
    ///   0 -> top-left, 1 -> top-right, 2 -> bottom-right, 3 -> bottom-left
    ///
    /// Any corner value >= 4 collapses to bottom-left. That is the shader's
    /// switch default arm, kept identical here. A texture_id past
    /// `tile_count()` wraps vertically; no validation happens at this layer.
    pub fn tile_uv(self, texture_id: u32, corner: u32) -> Vec2 {
        let tile_width = 1.0 / self.columns as f32;
        let tile_height = 1.0 / self.rows as f32;

        let column = (texture_id % self.columns) as f32;
        let row = (texture_id / self.columns) as f32;
        let base = Vec2::new(column * tile_width, row * tile_height);

        match corner {
            0 => base,
            1 => base + Vec2::new(tile_width, 0.0),
            2 => base + Vec2::new(tile_width, tile_height),
            _ => base + Vec2::new(0.0, tile_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn test_tile_corners_roundtrip() {
        // 4x8 atlas, tile 13: column 5, row 1
        let atlas = AtlasLayout::new(4, 8);
        let (c, r) = (5.0, 1.0);
        assert_eq!(atlas.tile_uv(13, 0), vec2(c / 8.0, r / 4.0));
        assert_eq!(atlas.tile_uv(13, 1), vec2((c + 1.0) / 8.0, r / 4.0));
        assert_eq!(atlas.tile_uv(13, 2), vec2((c + 1.0) / 8.0, (r + 1.0) / 4.0));
        assert_eq!(atlas.tile_uv(13, 3), vec2(c / 8.0, (r + 1.0) / 4.0));
    }

    #[test]
    fn test_corner_overflow_collapses_to_bottom_left() {
        let atlas = AtlasLayout::new(4, 4);
        for corner in 4..8 {
            assert_eq!(atlas.tile_uv(6, corner), atlas.tile_uv(6, 3));
        }
    }

    #[test]
    fn test_reference_tile_seven_of_eight_columns() {
        let atlas = AtlasLayout::new(8, 8);
        assert_eq!(atlas.tile_uv(7, 0), vec2(7.0 / 8.0, 0.0));
    }

    #[test]
    fn test_from_texture_size() {
        let atlas = AtlasLayout::from_texture_size(128, 64, 16);
        assert_eq!(atlas, AtlasLayout::new(4, 8));
        assert_eq!(atlas.tile_count(), 32);
    }

    #[test]
    fn test_uv_stays_in_unit_square_for_valid_tiles() {
        let atlas = AtlasLayout::new(8, 8);
        for tile in 0..atlas.tile_count() {
            for corner in 0..4 {
                let uv = atlas.tile_uv(tile, corner);
                assert!((0.0..=1.0).contains(&uv.x), "tile {tile} corner {corner}");
                assert!((0.0..=1.0).contains(&uv.y), "tile {tile} corner {corner}");
            }
        }
    }
}
