// Host-side tests for resolving a mount's scene config.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod options {
    include!("../src/options.rs");
}

use options::resolve_scene_config;
use scene_core::{SceneConfig, SceneError};

#[test]
fn preset_without_overrides() {
    assert_eq!(resolve_scene_config("vault", None).unwrap(), SceneConfig::vault());
    assert_eq!(resolve_scene_config("hero", Some("  ")).unwrap(), SceneConfig::hero());
}

#[test]
fn attribute_overrides_merge_over_preset() {
    let cfg = resolve_scene_config(
        "hero",
        Some(r#"{ "camera": { "parallax": [0.0, 0.0] }, "clear_color": [0, 0, 0, 1] }"#),
    )
    .unwrap();
    assert_eq!(cfg.camera.parallax, glam::Vec2::ZERO);
    assert_eq!(cfg.clear_color, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(cfg.objects.len(), SceneConfig::hero().objects.len());
}

#[test]
fn malformed_attribute_is_an_error() {
    assert!(matches!(
        resolve_scene_config("phone", Some("{ not json")),
        Err(SceneError::InvalidConfig(_))
    ));
    assert!(matches!(
        resolve_scene_config("phone", Some("[1, 2]")),
        Err(SceneError::InvalidConfig(_))
    ));
}

#[test]
fn unknown_preset_is_rejected() {
    assert!(matches!(
        resolve_scene_config("galaxy", None),
        Err(SceneError::UnknownPreset(_))
    ));
}
