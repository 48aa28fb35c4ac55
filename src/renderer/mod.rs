//! Host-facing render output: Pod vertex buffers and fixed mesh templates.

pub mod fallback;
pub mod meshes;
pub mod vertex;

pub use fallback::radial_gradient;
pub use meshes::{Mesh, MeshHandle, MeshRegistry};
pub use vertex::{SurfaceVertex, vertex_bytes};
