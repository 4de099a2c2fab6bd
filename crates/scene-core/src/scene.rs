use crate::config::SceneConfig;
use crate::mesh::{build_mesh, MeshData, MeshKey};
use crate::object::SceneObject;
use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;

/// Objects plus the meshes they reference, built once per animator.
pub struct SceneGraph {
    pub objects: Vec<SceneObject>,
    pub meshes: Vec<MeshData>,
}

impl SceneGraph {
    /// Identical primitives (the hero's two rings, the phone's floats) share
    /// one mesh. Scattered objects are placed from `config.seed`, in list
    /// order.
    pub fn build(config: &SceneConfig) -> Self {
        let mut by_key: FnvHashMap<MeshKey, usize> = FnvHashMap::default();
        let mut meshes = Vec::new();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut bob_slot = 0;
        let objects = config
            .objects
            .iter()
            .map(|spec| {
                let key = MeshKey::new(&spec.primitive, spec.wireframe, config.seed);
                let mesh = *by_key.entry(key).or_insert_with(|| {
                    meshes.push(build_mesh(&spec.primitive, spec.wireframe, config.seed));
                    meshes.len() - 1
                });
                let slot = bob_slot;
                if spec.motion.bob.is_some() {
                    bob_slot += 1;
                }
                let mut obj = SceneObject::from_spec(spec, slot, mesh);
                if let Some(box_size) = spec.scatter {
                    let jitter = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
                    obj.base.position += (jitter - Vec3::splat(0.5)) * box_size;
                    obj.transform = obj.base;
                }
                obj
            })
            .collect();
        Self { objects, meshes }
    }
}
