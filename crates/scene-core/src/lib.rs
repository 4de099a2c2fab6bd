pub mod animator;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod mesh;
pub mod object;
pub mod pointer;
pub mod scene;
pub mod surface;

pub use animator::*;
pub use camera::Camera;
pub use clock::FrameClock;
pub use config::*;
pub use error::SceneError;
pub use mesh::{MeshData, Topology, Vertex};
pub use object::{SceneObject, Transform};
pub use pointer::PointerState;
pub use scene::SceneGraph;
pub use surface::*;

// Shader bundled as a string constant
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
