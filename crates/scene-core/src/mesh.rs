//! CPU-side geometry for scene primitives.
//!
//! Solid meshes carry white vertex colors and are tinted per object by the
//! renderer; particle fields and gradient planes bake their colors into the
//! vertices.

use crate::config::Primitive;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    #[inline]
    fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    #[inline]
    fn white(position: Vec3) -> Self {
        Self::new(position, Vec3::ONE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
    /// One vertex per particle, expanded to a camera-facing quad of
    /// `point_size` world units by the renderer.
    Points,
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub topology: Topology,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub point_size: f32,
}

impl MeshData {
    fn new(topology: Topology) -> Self {
        Self {
            topology,
            vertices: Vec::new(),
            indices: Vec::new(),
            point_size: 0.0,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Identity of a generated mesh. Objects with equal keys share one mesh.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshKey(SmallVec<[u32; 10]>);

impl MeshKey {
    pub fn new(primitive: &Primitive, wireframe: bool, seed: u64) -> Self {
        let mut words: SmallVec<[u32; 10]> = SmallVec::new();
        let push3 = |w: &mut SmallVec<[u32; 10]>, v: Vec3| {
            w.extend([v.x.to_bits(), v.y.to_bits(), v.z.to_bits()])
        };
        match primitive {
            Primitive::ParticleField {
                count,
                extent,
                point_size,
                colors,
            } => {
                words.extend([0, *count, extent.to_bits(), point_size.to_bits()]);
                words.extend([seed as u32, (seed >> 32) as u32]);
                push3(&mut words, colors[0]);
                push3(&mut words, colors[1]);
            }
            Primitive::Sphere { radius, segments } => {
                words.extend([1, radius.to_bits(), *segments]);
            }
            Primitive::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => {
                words.extend([
                    2,
                    radius.to_bits(),
                    tube.to_bits(),
                    *radial_segments,
                    *tubular_segments,
                ]);
            }
            Primitive::Cuboid { size } => {
                words.push(3);
                push3(&mut words, *size);
            }
            Primitive::Plane {
                width,
                height,
                gradient,
            } => {
                words.extend([4, width.to_bits(), height.to_bits()]);
                if let Some([a, b]) = gradient {
                    push3(&mut words, *a);
                    push3(&mut words, *b);
                }
            }
        }
        words.push(wireframe as u32);
        Self(words)
    }
}

/// Generate geometry for `primitive`. `seed` only affects particle fields.
pub fn build_mesh(primitive: &Primitive, wireframe: bool, seed: u64) -> MeshData {
    match *primitive {
        Primitive::ParticleField {
            count,
            extent,
            point_size,
            colors,
        } => particle_field(count, extent, point_size, colors, seed),
        Primitive::Sphere { radius, segments } => sphere(radius, segments, wireframe),
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments, tubular_segments, wireframe),
        Primitive::Cuboid { size } => cuboid(size, wireframe),
        Primitive::Plane {
            width,
            height,
            gradient,
        } => plane(width, height, gradient, wireframe),
    }
}

pub fn particle_field(
    count: u32,
    extent: f32,
    point_size: f32,
    colors: [Vec3; 2],
    seed: u64,
) -> MeshData {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mesh = MeshData::new(Topology::Points);
    mesh.point_size = point_size;
    mesh.vertices.reserve(count as usize);
    for _ in 0..count {
        let p = Vec3::new(
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
        ) * extent;
        let c = colors[0].lerp(colors[1], rng.gen::<f32>());
        mesh.vertices.push(Vertex::new(p, c));
    }
    mesh.indices = (0..count).collect();
    mesh
}

/// Lat/long grid with `segments` divisions around and `segments` from pole
/// to pole.
pub fn sphere(radius: f32, segments: u32, wireframe: bool) -> MeshData {
    let w = segments.max(3);
    let h = segments.max(2);
    let row = |iy: u32| iy * (w + 1);
    let mut mesh = MeshData::new(if wireframe {
        Topology::Lines
    } else {
        Topology::Triangles
    });
    for iy in 0..=h {
        let theta = iy as f32 / h as f32 * PI;
        for ix in 0..=w {
            let phi = ix as f32 / w as f32 * TAU;
            mesh.vertices.push(Vertex::white(Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            )));
        }
    }
    if wireframe {
        // parallels (poles collapse to a point, skip them)
        for iy in 1..h {
            for ix in 0..w {
                mesh.indices.extend([row(iy) + ix, row(iy) + ix + 1]);
            }
        }
        // meridians
        for iy in 0..h {
            for ix in 0..w {
                mesh.indices.extend([row(iy) + ix, row(iy + 1) + ix]);
            }
        }
    } else {
        for iy in 0..h {
            for ix in 0..w {
                let a = row(iy) + ix + 1;
                let b = row(iy) + ix;
                let c = row(iy + 1) + ix;
                let d = row(iy + 1) + ix + 1;
                if iy != 0 {
                    mesh.indices.extend([a, b, d]);
                }
                if iy != h - 1 {
                    mesh.indices.extend([b, c, d]);
                }
            }
        }
    }
    mesh
}

/// Torus in the XY plane; `radius` is center-to-tube, `tube` the tube radius.
pub fn torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
    wireframe: bool,
) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let row = |j: u32| j * (tubular + 1);
    let mut mesh = MeshData::new(if wireframe {
        Topology::Lines
    } else {
        Topology::Triangles
    });
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            mesh.vertices.push(Vertex::white(Vec3::new(
                ring * u.cos(),
                ring * u.sin(),
                tube * v.sin(),
            )));
        }
    }
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row(j) + i - 1;
            let b = row(j - 1) + i - 1;
            let c = row(j - 1) + i;
            let d = row(j) + i;
            if wireframe {
                mesh.indices.extend([b, c, b, a]);
            } else {
                mesh.indices.extend([a, b, d, b, c, d]);
            }
        }
    }
    mesh
}

pub fn cuboid(size: Vec3, wireframe: bool) -> MeshData {
    let h = size * 0.5;
    if wireframe {
        let mut mesh = MeshData::new(Topology::Lines);
        for i in 0..8u32 {
            let sign = |bit: u32| if i & bit == 0 { -1.0 } else { 1.0 };
            mesh.vertices
                .push(Vertex::white(Vec3::new(sign(1), sign(2), sign(4)) * h));
        }
        for i in 0..8u32 {
            for bit in [1u32, 2, 4] {
                if i & bit == 0 {
                    mesh.indices.extend([i, i | bit]);
                }
            }
        }
        return mesh;
    }

    let mut mesh = MeshData::new(Topology::Triangles);
    // (normal, u axis, v axis) per face
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.vertices.push(Vertex::white((n + u * su + v * sv) * h));
        }
        mesh.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Plane in the XY plane facing +z. A gradient runs from the top-left corner
/// to the bottom-right one.
pub fn plane(width: f32, height: f32, gradient: Option<[Vec3; 2]>, wireframe: bool) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let shade = |t: f32| gradient.map_or(Vec3::ONE, |[a, b]| a.lerp(b, t));
    let mut mesh = MeshData::new(if wireframe {
        Topology::Lines
    } else {
        Topology::Triangles
    });
    mesh.vertices = vec![
        Vertex::new(Vec3::new(-hw, hh, 0.0), shade(0.0)),
        Vertex::new(Vec3::new(hw, hh, 0.0), shade(0.5)),
        Vertex::new(Vec3::new(hw, -hh, 0.0), shade(1.0)),
        Vertex::new(Vec3::new(-hw, -hh, 0.0), shade(0.5)),
    ];
    mesh.indices = if wireframe {
        vec![0, 1, 1, 2, 2, 3, 3, 0]
    } else {
        vec![0, 3, 2, 0, 2, 1]
    };
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(mesh: &MeshData) {
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n), "index out of range");
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        for wire in [false, true] {
            let mesh = sphere(1.5, 16, wire);
            assert_indices_in_range(&mesh);
            for v in &mesh.vertices {
                let len = Vec3::from(v.position).length();
                assert!((len - 1.5).abs() < 1e-4);
            }
        }
        assert_eq!(sphere(1.0, 16, false).indices.len() % 3, 0);
        assert_eq!(sphere(1.0, 16, true).indices.len() % 2, 0);
    }

    #[test]
    fn torus_vertices_stay_within_tube() {
        let mesh = torus(2.0, 0.02, 16, 100, false);
        assert_indices_in_range(&mesh);
        assert_eq!(mesh.indices.len(), 16 * 100 * 6);
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let ring_dist = (p.truncate().length() - 2.0).hypot(p.z);
            assert!((ring_dist - 0.02).abs() < 1e-4);
        }
    }

    #[test]
    fn cuboid_spans_its_size() {
        let size = Vec3::new(1.2, 2.5, 0.15);
        for wire in [false, true] {
            let mesh = cuboid(size, wire);
            assert_indices_in_range(&mesh);
            let max = mesh
                .vertices
                .iter()
                .fold(Vec3::splat(f32::MIN), |m, v| m.max(Vec3::from(v.position)));
            assert!((max - size * 0.5).length() < 1e-6);
        }
        assert_eq!(cuboid(size, false).indices.len(), 36);
        assert_eq!(cuboid(size, true).indices.len(), 24);
    }

    #[test]
    fn particle_field_is_seeded_and_bounded() {
        let colors = [Vec3::X, Vec3::Z];
        let a = particle_field(500, 20.0, 0.02, colors, 7);
        let b = particle_field(500, 20.0, 0.02, colors, 7);
        let c = particle_field(500, 20.0, 0.02, colors, 8);
        assert_eq!(a.vertices, b.vertices);
        assert_ne!(a.vertices, c.vertices);
        assert_eq!(a.topology, Topology::Points);
        for v in &a.vertices {
            assert!(v.position.iter().all(|x| x.abs() <= 10.0));
            assert_eq!(v.color[1], 0.0);
        }
    }

    #[test]
    fn gradient_plane_runs_corner_to_corner() {
        let mesh = plane(1.0, 2.0, Some([Vec3::ZERO, Vec3::ONE]), false);
        assert_eq!(mesh.vertices[0].color, [0.0; 3]);
        assert_eq!(mesh.vertices[2].color, [1.0; 3]);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn mesh_keys_distinguish_geometry_not_placement() {
        let ring = Primitive::Torus {
            radius: 2.0,
            tube: 0.02,
            radial_segments: 16,
            tubular_segments: 100,
        };
        assert_eq!(MeshKey::new(&ring, false, 1), MeshKey::new(&ring, false, 2));
        assert_ne!(MeshKey::new(&ring, false, 1), MeshKey::new(&ring, true, 1));
        let small = Primitive::Torus {
            radius: 1.0,
            tube: 0.02,
            radial_segments: 16,
            tubular_segments: 100,
        };
        assert_ne!(MeshKey::new(&ring, false, 1), MeshKey::new(&small, false, 1));
    }
}
