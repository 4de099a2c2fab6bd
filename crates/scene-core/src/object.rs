use crate::config::{BlendMode, Motion, ObjectSpec};
use crate::pointer::PointerState;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
use std::f64::consts::TAU;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles, XYZ order, radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

/// Angle swept by a constant angular velocity, wrapped into [0, 2π).
/// Accumulated in f64 so long-running pages keep their precision.
#[inline]
pub fn spin_angle(omega: f32, elapsed: Duration) -> f32 {
    (omega as f64 * elapsed.as_secs_f64()).rem_euclid(TAU) as f32
}

/// One visual primitive and its update rule.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    /// Position among the scene's bobbing objects; keys the bobbing phase.
    pub bob_slot: usize,
    /// Index into the scene's deduplicated mesh list.
    pub mesh: usize,
    pub color: Vec4,
    pub blend: BlendMode,
    pub base: Transform,
    pub motion: Motion,
    /// Transform as of the last update.
    pub transform: Transform,
}

impl SceneObject {
    pub fn from_spec(spec: &ObjectSpec, bob_slot: usize, mesh: usize) -> Self {
        let base = Transform {
            position: spec.position,
            rotation: spec.rotation,
            scale: Vec3::ONE,
        };
        Self {
            name: spec.name.clone(),
            bob_slot,
            mesh,
            color: spec.color.extend(spec.opacity),
            blend: spec.blend,
            base,
            motion: spec.motion,
            transform: base,
        }
    }

    /// Rotation offset contributed by the pointer as (pitch about x, yaw
    /// about y). Bounded by the configured gains since the pointer is.
    pub fn pointer_rotation(&self, pointer: PointerState) -> Vec2 {
        match self.motion.pointer {
            Some(p) => Vec2::new(pointer.y * p.rotation.y, pointer.x * p.rotation.x),
            None => Vec2::ZERO,
        }
    }

    /// Transform at `elapsed` for the given pointer. Depends on nothing else,
    /// so objects can be updated in any order.
    pub fn transform_at(&self, elapsed: Duration, pointer: PointerState) -> Transform {
        let m = &self.motion;
        let mut t = self.base;

        t.rotation += Vec3::new(
            spin_angle(m.spin.x, elapsed),
            spin_angle(m.spin.y, elapsed),
            spin_angle(m.spin.z, elapsed),
        );

        if let Some(bob) = m.bob {
            let phase =
                bob.angular_frequency as f64 * elapsed.as_secs_f64() + self.bob_slot as f64;
            t.position.y += bob.amplitude * phase.sin() as f32;
        }

        if let Some(p) = m.pointer {
            let rot = self.pointer_rotation(pointer);
            t.rotation.x += rot.x;
            t.rotation.y += rot.y;
            let shift = pointer.as_vec2() * p.translation;
            t.position.x += shift.x;
            t.position.y += shift.y;
        }
        t
    }

    pub fn update(&mut self, elapsed: Duration, pointer: PointerState) {
        self.transform = self.transform_at(elapsed, pointer);
    }
}
