//! GPU side of the terrain shading core: shader composition, the two
//! pipeline variants, uniform types, atlas and chunk mesh resources.
//! Consumes buffers and uniforms the host prepares; produces a color per
//! covered pixel. Stateless between draws apart from GPU resource
//! ownership.

pub mod ao;
pub mod depth;
pub mod fog;
pub mod material;
pub mod mesh;
pub mod pipeline;
pub mod shader;
pub mod uniforms;

pub use material::TerrainAtlas;
pub use mesh::ChunkMesh;
pub use pipeline::{ShadingVariant, TerrainRenderer};
pub use uniforms::{AtlasUniforms, CameraUniforms, ChunkOffsetUniform};
