use std::f32::consts::{FRAC_PI_4, TAU};

// Shared scene tuning constants used by both web and native frontends.
//
// Rates are radians per second. The landing page tuned its motion per
// display frame, so those values are scaled by the reference refresh rate.

pub const REFERENCE_FPS: f32 = 60.0; // refresh rate the per-frame rates were tuned at

// Palette (hex as authored, converted with `rgb_from_hex`)
pub const PRIMARY_HEX: u32 = 0x7C3AED; // violet
pub const SECONDARY_HEX: u32 = 0x06B6D4; // cyan
pub const PHONE_BODY_HEX: u32 = 0x1A1A1A;
pub const PHONE_SCREEN_HEX: u32 = 0x0A0A0F;

// Shared camera defaults
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Hero background
pub const HERO_CAMERA_Z: f32 = 5.0;
pub const HERO_CAMERA_PARALLAX: f32 = 0.2; // eye offset at the viewport edge
pub const PARTICLE_COUNT: u32 = 2000;
pub const PARTICLE_EXTENT: f32 = 20.0; // side of the cube particles are scattered in
pub const PARTICLE_SIZE: f32 = 0.02;
pub const PARTICLE_OPACITY: f32 = 0.8;
pub const PARTICLE_SPIN_X: f32 = 0.0001 * REFERENCE_FPS;
pub const PARTICLE_SPIN_Y: f32 = 0.0003 * REFERENCE_FPS;
pub const PARTICLE_POINTER_TRANSLATION: f32 = 0.5; // world units at the viewport edge
pub const ORB_CENTER: [f32; 3] = [3.0, 0.0, -2.0];
pub const ORB_OUTER_RADIUS: f32 = 1.5;
pub const ORB_INNER_RADIUS: f32 = 1.0;
pub const HERO_RING_RADIUS: f32 = 2.0;
pub const HERO_RING_TUBE: f32 = 0.02;
pub const HERO_RING_TILT: f32 = FRAC_PI_4;
pub const HERO_RING_A_SPIN_Z: f32 = TAU / 20.0; // one turn per 20 s
pub const HERO_RING_B_SPIN_Z: f32 = -TAU / 15.0; // one turn per 15 s, reversed

// Vault emblem
pub const VAULT_CAMERA_Z: f32 = 3.0;
pub const VAULT_SIZE_PX: u32 = 200;
pub const VAULT_RING_RADII: [f32; 3] = [1.2, 0.9, 0.6];
pub const VAULT_RING_TUBE: f32 = 0.03;
pub const VAULT_SHIELD_RADIUS: f32 = 0.4;
pub const VAULT_SPIN_FAST: f32 = 0.015 * REFERENCE_FPS;
pub const VAULT_SPIN: f32 = 0.01 * REFERENCE_FPS;
pub const VAULT_SPIN_MEDIUM: f32 = 0.008 * REFERENCE_FPS;
pub const VAULT_SPIN_SLOW: f32 = 0.005 * REFERENCE_FPS;

// Phone mockup
pub const PHONE_CAMERA_Z: f32 = 4.0;
pub const PHONE_BODY_SIZE: [f32; 3] = [1.2, 2.5, 0.15];
pub const PHONE_SCREEN_SIZE: [f32; 3] = [1.1, 2.3, 0.01];
pub const PHONE_CONTENT_SIZE: [f32; 2] = [1.0, 2.1];
pub const PHONE_YAW_GAIN: f32 = 0.3; // rotation.y per unit pointer x
pub const PHONE_PITCH_GAIN: f32 = 0.2; // rotation.x per unit pointer y
pub const FLOAT_COUNT: usize = 5;
pub const FLOAT_RADIUS: f32 = 0.1;
pub const FLOAT_SPREAD: [f32; 3] = [3.0, 3.0, 2.0];
pub const FLOAT_BOB_AMPLITUDE: f32 = 0.12;
pub const FLOAT_BOB_ANGULAR_FREQUENCY: f32 = 1.0;
pub const FLOAT_SPIN_X: f32 = 0.01 * REFERENCE_FPS;

// Mesh tessellation
pub const RING_RADIAL_SEGMENTS: u32 = 16;
pub const RING_TUBULAR_SEGMENTS: u32 = 100;
pub const MAX_SEGMENTS: u32 = 512; // per axis, for spheres and tori
pub const MAX_PARTICLES: u32 = 1_000_000;

pub const DEFAULT_SEED: u64 = 42;
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0]; // transparent, the page shows through
