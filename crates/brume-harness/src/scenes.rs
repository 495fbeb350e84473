//! Deterministic scenes exercising every part of the shading contract:
//! the AO ladder, a grid of atlas tiles, quads across several chunk
//! origins, and walls straddling the fog range. Every scene carries probe
//! points whose expected colors the checks derive analytically from the
//! CPU mirrors of the shader math.

use brume_core::quad::{emit_face, quad_indices};
use brume_core::{Direction, PackedVertex};
use brume_render::uniforms::CameraUniforms;
use glam::{IVec3, Mat4, UVec3, Vec3};

/// Atlas used by every scene: 8x8 tiles, 4px per tile, one solid color
/// per tile so a sampled pixel identifies its tile exactly.
pub const ATLAS_COLUMNS: u32 = 8;
pub const ATLAS_ROWS: u32 = 8;
pub const ATLAS_TILE_SIZE: u32 = 4;

/// Solid fill color of an atlas tile. Channels stay below 200 so no tile
/// can be confused with the white fog color.
pub fn tile_color(texture_id: u32) -> [u8; 3] {
    [
        (40 + (texture_id * 13) % 160) as u8,
        (40 + (texture_id * 29) % 160) as u8,
        (40 + (texture_id * 47) % 160) as u8,
    ]
}

/// Build the RGBA8 test atlas image.
pub fn test_atlas_pixels() -> Vec<u8> {
    let width = ATLAS_COLUMNS * ATLAS_TILE_SIZE;
    let height = ATLAS_ROWS * ATLAS_TILE_SIZE;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let tile = (y / ATLAS_TILE_SIZE) * ATLAS_COLUMNS + x / ATLAS_TILE_SIZE;
            let [r, g, b] = tile_color(tile);
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }

    pixels
}

/// Camera placement for one scene. Matrices follow the host renderer's
/// conventions: right-handed perspective, look-at view, Y up.
#[derive(Debug, Clone, Copy)]
pub struct SceneCamera {
    pub position: Vec3,
    pub target: Vec3,
}

impl SceneCamera {
    const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;
    const NEAR: f32 = 0.1;
    const FAR: f32 = 2000.0;

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(Self::FOV_Y, aspect, Self::NEAR, Self::FAR)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn uniforms(&self, aspect: f32) -> CameraUniforms {
        CameraUniforms::new(self.projection(aspect), self.view(), self.position)
    }

    /// Project a world point to a framebuffer pixel. None if the point is
    /// behind the camera or outside the viewport.
    pub fn project_to_pixel(&self, world: Vec3, width: u32, height: u32) -> Option<(u32, u32)> {
        let aspect = width as f32 / height as f32;
        let clip = self.projection(aspect) * self.view() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }

        let px = ((ndc.x + 1.0) * 0.5 * width as f32) as u32;
        let py = ((1.0 - ndc.y) * 0.5 * height as f32) as u32;
        Some((px.min(width - 1), py.min(height - 1)))
    }
}

/// A point on a quad surface with the packed fields the checks need to
/// predict its shaded color.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub label: &'static str,
    pub world: Vec3,
    pub texture_id: u32,
    pub ao_index: u32,
}

/// Mesh data for one chunk, in the emission order the decode contract
/// assumes.
pub struct SceneChunk {
    pub origin: IVec3,
    pub vertices: Vec<PackedVertex>,
    pub indices: Vec<u16>,
}

impl SceneChunk {
    pub fn new(origin: IVec3) -> Self {
        Self {
            origin,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn push_face(&mut self, position: UVec3, ao: [u32; 4], texture_id: u32, dir: Direction) {
        let quad = (self.vertices.len() / 4) as u16;
        self.vertices.extend(emit_face(position, ao, texture_id, dir));
        self.indices.extend(quad_indices(quad));
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

pub struct Scene {
    pub name: &'static str,
    pub camera: SceneCamera,
    pub chunks: Vec<SceneChunk>,
    pub probes: Vec<Probe>,
}

/// The full deterministic suite.
pub fn standard_scenes() -> Vec<Scene> {
    vec![ao_ladder(), atlas_grid(), origin_span(), fog_march()]
}

pub fn scene_by_name(name: &str) -> Option<Scene> {
    standard_scenes().into_iter().find(|s| s.name == name)
}

/// Four front-facing quads, one per AO bucket, close enough to the camera
/// that fog is negligible. Shared tile, so brightness differences come
/// from AO alone.
fn ao_ladder() -> Scene {
    const TILE: u32 = 9;
    let mut chunk = SceneChunk::new(IVec3::ZERO);
    let mut probes = Vec::new();

    for bucket in 0u32..4 {
        let x = bucket * 2;
        chunk.push_face(UVec3::new(x, 8, 0), [bucket; 4], TILE, Direction::Front);
        probes.push(Probe {
            label: ["ao-bucket-0", "ao-bucket-1", "ao-bucket-2", "ao-bucket-3"]
                [bucket as usize],
            world: Vec3::new(x as f32 + 0.5, 8.5, 1.0),
            texture_id: TILE,
            ao_index: bucket,
        });
    }

    Scene {
        name: "ao-ladder",
        camera: SceneCamera {
            position: Vec3::new(3.5, 8.5, 7.0),
            target: Vec3::new(3.5, 8.5, 1.0),
        },
        chunks: vec![chunk],
        probes,
    }
}

/// A 4x4 grid of quads, each addressing a different atlas tile, fully
/// open AO. Verifies the row-major tile lookup against the CPU mirror.
fn atlas_grid() -> Scene {
    let mut chunk = SceneChunk::new(IVec3::ZERO);
    let mut probes = Vec::new();

    static LABELS: [&str; 16] = [
        "tile-0", "tile-1", "tile-2", "tile-3", "tile-4", "tile-5", "tile-6", "tile-7", "tile-8",
        "tile-9", "tile-10", "tile-11", "tile-12", "tile-13", "tile-14", "tile-15",
    ];

    for tile in 0u32..16 {
        let x = (tile % 4) * 2;
        let y = 4 + (tile / 4) * 2;
        chunk.push_face(UVec3::new(x, y, 0), [3; 4], tile, Direction::Front);
        probes.push(Probe {
            label: LABELS[tile as usize],
            world: Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 1.0),
            texture_id: tile,
            ao_index: 3,
        });
    }

    Scene {
        name: "atlas-grid",
        camera: SceneCamera {
            position: Vec3::new(3.5, 7.5, 10.0),
            target: Vec3::new(3.5, 7.5, 1.0),
        },
        chunks: vec![chunk],
        probes,
    }
}

/// The same quad emitted in three chunks along X. Each probe sits at
/// chunk_origin*16 + local, so a hit proves the integer origin math.
fn origin_span() -> Scene {
    const TILE: u32 = 21;
    let mut chunks = Vec::new();
    let mut probes = Vec::new();

    static LABELS: [&str; 3] = ["chunk-minus-one", "chunk-zero", "chunk-plus-one"];

    for (i, cx) in [-1i32, 0, 1].into_iter().enumerate() {
        let mut chunk = SceneChunk::new(IVec3::new(cx, 0, 0));
        // 2x2 blocks so the quad survives projection at this distance
        for dx in 0..2 {
            for dy in 0..2 {
                chunk.push_face(UVec3::new(6 + dx, 7 + dy, 0), [3; 4], TILE, Direction::Front);
            }
        }
        chunks.push(chunk);
        probes.push(Probe {
            label: LABELS[i],
            world: Vec3::new(cx as f32 * 16.0 + 7.0, 8.0, 1.0),
            texture_id: TILE,
            ao_index: 3,
        });
    }

    Scene {
        name: "origin-span",
        camera: SceneCamera {
            position: Vec3::new(7.0, 8.0, 42.0),
            target: Vec3::new(7.0, 8.0, 1.0),
        },
        chunks,
        probes,
    }
}

/// Walls marching away from the camera: ~48, ~128, ~256, and ~512 world
/// units of planar distance. Nearer walls are shorter so every probe has
/// line of sight. The last wall sits past twice the fog start and must
/// saturate to the fog color.
fn fog_march() -> Scene {
    const TILE: u32 = 33;

    // (chunk z origin, wall height in blocks, probe height)
    let walls: [(i32, u32, f32); 4] = [(-4, 3, 1.5), (-9, 6, 4.5), (-17, 10, 8.5), (-33, 16, 13.5)];
    static LABELS: [&str; 4] = ["wall-48", "wall-128", "wall-256", "wall-512"];

    let mut chunks = Vec::new();
    let mut probes = Vec::new();

    for (i, (cz, height, probe_y)) in walls.into_iter().enumerate() {
        let mut chunk = SceneChunk::new(IVec3::new(0, 0, cz));
        for x in 0..16 {
            for y in 0..height {
                chunk.push_face(UVec3::new(x, y, 15), [3; 4], TILE, Direction::Front);
            }
        }
        let front_z = (cz * 16 + 16) as f32;
        probes.push(Probe {
            label: LABELS[i],
            world: Vec3::new(8.0, probe_y, front_z),
            texture_id: TILE,
            ao_index: 3,
        });
        chunks.push(chunk);
    }

    Scene {
        name: "fog-march",
        camera: SceneCamera {
            position: Vec3::new(8.0, 10.0, 0.0),
            target: Vec3::new(8.0, 8.0, -48.0),
        },
        chunks,
        probes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brume_render::fog;

    #[test]
    fn test_atlas_pixels_cover_every_tile() {
        let pixels = test_atlas_pixels();
        let width = ATLAS_COLUMNS * ATLAS_TILE_SIZE;
        assert_eq!(pixels.len(), (width * width * 4) as usize);

        // Center texel of tile 7 (top row, last column)
        let x = 7 * ATLAS_TILE_SIZE + ATLAS_TILE_SIZE / 2;
        let y = ATLAS_TILE_SIZE / 2;
        let offset = ((y * width + x) * 4) as usize;
        assert_eq!(&pixels[offset..offset + 3], &tile_color(7));
    }

    #[test]
    fn test_tile_colors_never_reach_white() {
        for tile in 0..64 {
            for channel in tile_color(tile) {
                assert!(channel < 200);
            }
        }
    }

    #[test]
    fn test_every_scene_emits_whole_quads() {
        for scene in standard_scenes() {
            for chunk in &scene.chunks {
                assert_eq!(chunk.vertices.len() % 4, 0, "{}", scene.name);
                assert_eq!(chunk.indices.len(), chunk.quad_count() * 6, "{}", scene.name);
            }
            assert!(!scene.probes.is_empty(), "{}", scene.name);
        }
    }

    #[test]
    fn test_every_probe_projects_on_screen() {
        for scene in standard_scenes() {
            for probe in &scene.probes {
                let pixel = scene.camera.project_to_pixel(probe.world, 256, 256);
                assert!(pixel.is_some(), "{}: {} off screen", scene.name, probe.label);
            }
        }
    }

    #[test]
    fn test_fog_march_spans_the_fog_range() {
        let scene = scene_by_name("fog-march").unwrap();
        let factors: Vec<f32> = scene
            .probes
            .iter()
            .map(|p| fog::fog_factor(scene.camera.position, p.world))
            .collect();

        assert!(factors[0] < 0.01, "near wall already fogged: {}", factors[0]);
        assert!(factors[2] > 0.5, "wall at fog start barely fogged: {}", factors[2]);
        assert!(factors[3] > 1.0, "far wall not over-blending: {}", factors[3]);
        assert!(factors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_probe_fields_match_emitted_vertices() {
        for scene in standard_scenes() {
            for chunk in &scene.chunks {
                for vertex in &chunk.vertices {
                    assert!(vertex.texture_id() < ATLAS_ROWS * ATLAS_COLUMNS);
                }
            }
        }
    }
}
