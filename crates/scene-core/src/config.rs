//! Scene configuration and the built-in presets.
//!
//! A `SceneConfig` is plain data: the animator turns it into scene objects at
//! `initialize` time and never reads it again. Every field has a default so a
//! host can override a preset with a partial JSON document.

use crate::constants::*;
use crate::error::SceneError;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Convert a `0xRRGGBB` sRGB color to linear RGB.
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xFF) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(16), channel(8), channel(0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Alpha,
    Additive,
}

/// Geometry of a scene object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    ParticleField {
        count: u32,
        extent: f32,
        point_size: f32,
        colors: [Vec3; 2],
    },
    Sphere {
        radius: f32,
        segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Cuboid {
        size: Vec3,
    },
    Plane {
        width: f32,
        height: f32,
        gradient: Option<[Vec3; 2]>,
    },
}

impl Default for Primitive {
    fn default() -> Self {
        Primitive::Sphere {
            radius: 1.0,
            segments: 16,
        }
    }
}

/// Sinusoidal vertical bobbing. The phase is the object's position among the
/// scene's bobbing objects, so the first one starts at phase 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bob {
    pub amplitude: f32,
    pub angular_frequency: f32,
}

/// Pointer-proportional offsets; `rotation.x` is yaw per unit pointer x,
/// `rotation.y` is pitch per unit pointer y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PointerResponse {
    pub rotation: Vec2,
    pub translation: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Motion {
    /// Angular velocity about x, y, z in rad/s.
    pub spin: Vec3,
    pub bob: Option<Bob>,
    pub pointer: Option<PointerResponse>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSpec {
    pub name: String,
    pub primitive: Primitive,
    pub position: Vec3,
    /// Random offset inside a box of this size centered on `position`,
    /// drawn from the scene seed when the scene is built.
    pub scatter: Option<Vec3>,
    /// Initial Euler rotation (XYZ order) in radians.
    pub rotation: Vec3,
    pub color: Vec3,
    pub opacity: f32,
    pub wireframe: bool,
    pub blend: BlendMode,
    pub motion: Motion,
}

impl Default for ObjectSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            primitive: Primitive::default(),
            position: Vec3::ZERO,
            scatter: None,
            rotation: Vec3::ZERO,
            color: Vec3::ONE,
            opacity: 1.0,
            wireframe: false,
            blend: BlendMode::Alpha,
            motion: Motion::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    /// Eye offset per unit pointer coordinate.
    pub parallax: Vec2,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Vec3::new(0.0, 0.0, HERO_CAMERA_Z),
            target: Vec3::ZERO,
            parallax: Vec2::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for particle and float placement.
    pub seed: u64,
    pub clear_color: [f32; 4],
    pub camera: CameraConfig,
    pub objects: Vec<ObjectSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// The three scenes the landing page ships.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenePreset {
    Hero,
    Vault,
    Phone,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 3] = [ScenePreset::Hero, ScenePreset::Vault, ScenePreset::Phone];

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Hero => "hero",
            ScenePreset::Vault => "vault",
            ScenePreset::Phone => "phone",
        }
    }

    pub fn config(self) -> SceneConfig {
        match self {
            ScenePreset::Hero => SceneConfig::hero(),
            ScenePreset::Vault => SceneConfig::vault(),
            ScenePreset::Phone => SceneConfig::phone(),
        }
    }
}

impl FromStr for ScenePreset {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ScenePreset::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| SceneError::UnknownPreset(s.to_string()))
    }
}

fn ring(name: &str, radius: f32, tube: f32, color: Vec3, opacity: f32) -> ObjectSpec {
    ObjectSpec {
        name: name.to_string(),
        primitive: Primitive::Torus {
            radius,
            tube,
            radial_segments: RING_RADIAL_SEGMENTS,
            tubular_segments: RING_TUBULAR_SEGMENTS,
        },
        color,
        opacity,
        ..Default::default()
    }
}

fn wire_sphere(name: &str, radius: f32, segments: u32, color: Vec3, opacity: f32) -> ObjectSpec {
    ObjectSpec {
        name: name.to_string(),
        primitive: Primitive::Sphere { radius, segments },
        color,
        opacity,
        wireframe: true,
        ..Default::default()
    }
}

impl SceneConfig {
    /// Full-viewport background: particle field, wireframe orbs and two
    /// counter-rotating rings.
    pub fn hero() -> Self {
        let primary = rgb_from_hex(PRIMARY_HEX);
        let secondary = rgb_from_hex(SECONDARY_HEX);
        let orb_center = Vec3::from(ORB_CENTER);

        let particles = ObjectSpec {
            name: "particles".to_string(),
            primitive: Primitive::ParticleField {
                count: PARTICLE_COUNT,
                extent: PARTICLE_EXTENT,
                point_size: PARTICLE_SIZE,
                colors: [primary, secondary],
            },
            opacity: PARTICLE_OPACITY,
            blend: BlendMode::Additive,
            motion: Motion {
                spin: Vec3::new(PARTICLE_SPIN_X, PARTICLE_SPIN_Y, 0.0),
                pointer: Some(PointerResponse {
                    rotation: Vec2::ZERO,
                    translation: Vec2::splat(PARTICLE_POINTER_TRANSLATION),
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let orb_outer = ObjectSpec {
            position: orb_center,
            ..wire_sphere("orb_outer", ORB_OUTER_RADIUS, 64, primary, 0.1)
        };
        let orb_inner = ObjectSpec {
            position: orb_center,
            ..wire_sphere("orb_inner", ORB_INNER_RADIUS, 32, secondary, 0.15)
        };
        let ring_a = ObjectSpec {
            position: orb_center,
            rotation: Vec3::new(HERO_RING_TILT, 0.0, 0.0),
            motion: Motion {
                spin: Vec3::new(0.0, 0.0, HERO_RING_A_SPIN_Z),
                ..Default::default()
            },
            ..ring("ring_a", HERO_RING_RADIUS, HERO_RING_TUBE, primary, 0.3)
        };
        let ring_b = ObjectSpec {
            position: orb_center,
            rotation: Vec3::new(-HERO_RING_TILT, 0.0, 0.0),
            motion: Motion {
                spin: Vec3::new(0.0, 0.0, HERO_RING_B_SPIN_Z),
                ..Default::default()
            },
            ..ring("ring_b", HERO_RING_RADIUS, HERO_RING_TUBE, secondary, 0.3)
        };

        Self {
            seed: DEFAULT_SEED,
            clear_color: CLEAR_COLOR,
            camera: CameraConfig {
                position: Vec3::new(0.0, 0.0, HERO_CAMERA_Z),
                parallax: Vec2::splat(HERO_CAMERA_PARALLAX),
                ..Default::default()
            },
            objects: vec![particles, orb_outer, orb_inner, ring_a, ring_b],
        }
    }

    /// Small square emblem: three nested rings tumbling around a wireframe
    /// shield.
    pub fn vault() -> Self {
        let primary = rgb_from_hex(PRIMARY_HEX);
        let secondary = rgb_from_hex(SECONDARY_HEX);
        let [r1, r2, r3] = VAULT_RING_RADII;

        let outer = ObjectSpec {
            motion: Motion {
                spin: Vec3::new(VAULT_SPIN, VAULT_SPIN_SLOW, 0.0),
                ..Default::default()
            },
            ..ring("vault_ring_outer", r1, VAULT_RING_TUBE, primary, 0.5)
        };
        let middle = ObjectSpec {
            motion: Motion {
                spin: Vec3::new(-VAULT_SPIN_MEDIUM, 0.0, VAULT_SPIN),
                ..Default::default()
            },
            ..ring("vault_ring_middle", r2, VAULT_RING_TUBE, secondary, 0.5)
        };
        let inner = ObjectSpec {
            motion: Motion {
                spin: Vec3::new(0.0, VAULT_SPIN_FAST, -VAULT_SPIN_MEDIUM),
                ..Default::default()
            },
            ..ring("vault_ring_inner", r3, VAULT_RING_TUBE, primary, 0.7)
        };
        let shield = ObjectSpec {
            motion: Motion {
                spin: Vec3::new(0.0, VAULT_SPIN, 0.0),
                ..Default::default()
            },
            ..wire_sphere("vault_shield", VAULT_SHIELD_RADIUS, 32, primary, 0.3)
        };

        Self {
            seed: DEFAULT_SEED,
            clear_color: CLEAR_COLOR,
            camera: CameraConfig {
                position: Vec3::new(0.0, 0.0, VAULT_CAMERA_Z),
                ..Default::default()
            },
            objects: vec![outer, middle, inner, shield],
        }
    }

    /// Phone mockup tilting toward the pointer with a few floating beads.
    pub fn phone() -> Self {
        let primary = rgb_from_hex(PRIMARY_HEX);
        let secondary = rgb_from_hex(SECONDARY_HEX);
        let follow = Motion {
            pointer: Some(PointerResponse {
                rotation: Vec2::new(PHONE_YAW_GAIN, PHONE_PITCH_GAIN),
                translation: Vec2::ZERO,
            }),
            ..Default::default()
        };

        let mut objects = vec![
            ObjectSpec {
                name: "phone_body".to_string(),
                primitive: Primitive::Cuboid {
                    size: Vec3::from(PHONE_BODY_SIZE),
                },
                color: rgb_from_hex(PHONE_BODY_HEX),
                opacity: 0.9,
                motion: follow,
                ..Default::default()
            },
            ObjectSpec {
                name: "phone_screen".to_string(),
                primitive: Primitive::Cuboid {
                    size: Vec3::from(PHONE_SCREEN_SIZE),
                },
                position: Vec3::new(0.0, 0.0, 0.08),
                color: rgb_from_hex(PHONE_SCREEN_HEX),
                motion: follow,
                ..Default::default()
            },
            ObjectSpec {
                name: "phone_content".to_string(),
                primitive: Primitive::Plane {
                    width: PHONE_CONTENT_SIZE[0],
                    height: PHONE_CONTENT_SIZE[1],
                    gradient: Some([primary, secondary]),
                },
                position: Vec3::new(0.0, 0.0, 0.085),
                motion: follow,
                ..Default::default()
            },
        ];

        for i in 0..FLOAT_COUNT {
            objects.push(ObjectSpec {
                name: format!("float_{i}"),
                primitive: Primitive::Sphere {
                    radius: FLOAT_RADIUS,
                    segments: 16,
                },
                scatter: Some(Vec3::from(FLOAT_SPREAD)),
                color: primary,
                opacity: 0.5,
                motion: Motion {
                    spin: Vec3::new(FLOAT_SPIN_X, 0.0, 0.0),
                    bob: Some(Bob {
                        amplitude: FLOAT_BOB_AMPLITUDE,
                        angular_frequency: FLOAT_BOB_ANGULAR_FREQUENCY,
                    }),
                    pointer: None,
                },
                ..Default::default()
            });
        }

        Self {
            seed: DEFAULT_SEED,
            clear_color: CLEAR_COLOR,
            camera: CameraConfig {
                position: Vec3::new(0.0, 0.0, PHONE_CAMERA_Z),
                ..Default::default()
            },
            objects,
        }
    }

    /// Deep-merge a JSON document over this config. Objects merge by key,
    /// arrays are replaced wholesale.
    pub fn with_overrides(self, overrides: &serde_json::Value) -> Result<Self, SceneError> {
        let mut base =
            serde_json::to_value(&self).map_err(|e| SceneError::InvalidConfig(e.to_string()))?;
        merge_json(&mut base, overrides);
        serde_json::from_value(base).map_err(|e| SceneError::InvalidConfig(e.to_string()))
    }

    /// Reject values that would produce a degenerate camera or geometry.
    pub fn validate(&self) -> Result<(), SceneError> {
        let bad = |msg: String| Err(SceneError::InvalidConfig(msg));
        let cam = &self.camera;
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return bad(format!("fov_y_degrees {} outside (0, 180)", cam.fov_y_degrees));
        }
        if !(cam.near > 0.0) || !(cam.far > cam.near) {
            return bad(format!("near {} / far {} must satisfy 0 < near < far", cam.near, cam.far));
        }
        if !(cam.position.is_finite() && cam.target.is_finite() && cam.parallax.is_finite()) {
            return bad("camera vectors must be finite".to_string());
        }
        if self.objects.is_empty() {
            return bad("scene has no objects".to_string());
        }
        for obj in &self.objects {
            if !(0.0..=1.0).contains(&obj.opacity) {
                return bad(format!("`{}` opacity {} outside [0, 1]", obj.name, obj.opacity));
            }
            let m = &obj.motion;
            let finite = obj.position.is_finite()
                && obj.rotation.is_finite()
                && obj.color.is_finite()
                && m.spin.is_finite()
                && m.bob.map_or(true, |b| b.amplitude.is_finite() && b.angular_frequency.is_finite())
                && m.pointer.map_or(true, |p| p.rotation.is_finite() && p.translation.is_finite());
            if !finite {
                return bad(format!("`{}` has non-finite transform or motion", obj.name));
            }
            if !obj.scatter.map_or(true, |s| s.is_finite()) {
                return bad(format!("`{}` scatter must be finite", obj.name));
            }
            obj.primitive
                .validate()
                .map_err(|msg| SceneError::InvalidConfig(format!("`{}` {msg}", obj.name)))?;
        }
        Ok(())
    }
}

impl Primitive {
    /// Bounds that keep mesh generation finite and small enough to allocate.
    fn validate(&self) -> Result<(), String> {
        let positive = |label: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(format!("{label} {v} must be finite and positive"))
            }
        };
        let segments = |label: &str, n: u32| {
            if n <= MAX_SEGMENTS {
                Ok(())
            } else {
                Err(format!("{label} {n} exceeds {MAX_SEGMENTS}"))
            }
        };
        match *self {
            Primitive::ParticleField {
                count,
                extent,
                point_size,
                colors,
            } => {
                if count == 0 {
                    return Err("particle field has no particles".to_string());
                }
                if count > MAX_PARTICLES {
                    return Err(format!("particle count {count} exceeds {MAX_PARTICLES}"));
                }
                if !(colors[0].is_finite() && colors[1].is_finite()) {
                    return Err("particle colors must be finite".to_string());
                }
                positive("extent", extent)?;
                positive("point_size", point_size)
            }
            Primitive::Sphere { radius, segments: n } => {
                positive("radius", radius)?;
                segments("segments", n)
            }
            Primitive::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => {
                positive("radius", radius)?;
                positive("tube", tube)?;
                segments("radial_segments", radial_segments)?;
                segments("tubular_segments", tubular_segments)
            }
            Primitive::Cuboid { size } => {
                positive("size.x", size.x)?;
                positive("size.y", size.y)?;
                positive("size.z", size.z)
            }
            Primitive::Plane {
                width,
                height,
                gradient,
            } => {
                if !gradient.map_or(true, |[a, b]| a.is_finite() && b.is_finite()) {
                    return Err("plane gradient must be finite".to_string());
                }
                positive("width", width)?;
                positive("height", height)
            }
        }
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: &serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(b), serde_json::Value::Object(o)) => {
            for (k, v) in o {
                match b.get_mut(k) {
                    Some(slot) => merge_json(slot, v),
                    None => {
                        b.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (slot, v) => *slot = v.clone(),
    }
}
