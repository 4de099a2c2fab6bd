use scene_core::{SceneConfig, SceneError, ScenePreset};

/// Resolve the config for a mount: the named preset, with an optional JSON
/// document (the mount element's config attribute) merged over it.
///
/// Blank attributes count as absent. Anything else that fails to parse is an
/// error rather than silently falling back to the preset.
pub fn resolve_scene_config(
    preset: &str,
    overrides: Option<&str>,
) -> Result<SceneConfig, SceneError> {
    let preset: ScenePreset = preset.parse()?;
    let config = preset.config();
    match overrides.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(config),
        Some(raw) => {
            let doc: serde_json::Value = serde_json::from_str(raw)
                .map_err(|e| SceneError::InvalidConfig(format!("scene config JSON: {e}")))?;
            if !doc.is_object() {
                return Err(SceneError::InvalidConfig(
                    "scene config must be a JSON object".to_string(),
                ));
            }
            config.with_overrides(&doc)
        }
    }
}
