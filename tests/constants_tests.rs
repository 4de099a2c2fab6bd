// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use scene_core::constants as scene;

#[test]
#[allow(clippy::assertions_on_constants)]
fn page_contract_ids_are_distinct() {
    let ids = [HERO_CANVAS_ID, VAULT_CONTAINER_ID, PHONE_CONTAINER_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.starts_with('#'), "ids are passed to getElementById");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(SCENE_CONFIG_ATTR.starts_with("data-"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_and_sizing_are_within_reasonable_bounds() {
    assert!(EMBED_DELAY_MS >= 0);
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(scene::VAULT_SIZE_PX > 0);
}

#[test]
fn per_frame_rates_convert_at_reference_fps() {
    // 0.0003 rad per frame at 60 Hz
    assert!((scene::PARTICLE_SPIN_Y / scene::REFERENCE_FPS - 0.0003).abs() < 1e-9);
    assert!((scene::PARTICLE_SPIN_X / scene::REFERENCE_FPS - 0.0001).abs() < 1e-9);
    assert!(scene::VAULT_SPIN_FAST > scene::VAULT_SPIN);
    assert!(scene::VAULT_SPIN > scene::VAULT_SPIN_MEDIUM);
    assert!(scene::VAULT_SPIN_MEDIUM > scene::VAULT_SPIN_SLOW);
}

#[test]
fn nested_vault_rings_shrink_inward() {
    let [a, b, c] = scene::VAULT_RING_RADII;
    assert!(a > b && b > c && c > scene::VAULT_SHIELD_RADIUS);
}
