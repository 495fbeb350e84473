//! Shared vocabulary of the terrain shading core: the packed vertex format,
//! face directions and quad emission tables, atlas tile addressing, and
//! chunk coordinate math. No GPU types live here; everything is plain data
//! mirrored exactly by the WGSL decode helpers.

pub mod atlas;
pub mod constants;
pub mod direction;
pub mod error;
pub mod math;
pub mod quad;
pub mod vertex;

pub use atlas::AtlasLayout;
pub use direction::Direction;
pub use error::BrumeError;
pub use vertex::PackedVertex;
