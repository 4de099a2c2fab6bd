// cli.rs - Command-line interface configuration
use anyhow::Context;
use clap::Parser;
use scene_core::{SceneConfig, ScenePreset};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-native")]
#[command(about = "Preview the landing-page scenes in a desktop window", long_about = None)]
pub struct Cli {
    /// Scene to show: hero, vault or phone
    #[arg(long, default_value = "hero")]
    pub preset: ScenePreset,

    /// JSON document merged over the preset
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        let base = self.preset.config();
        let Some(path) = &self.config else {
            return Ok(base);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let doc: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(base.with_overrides(&doc)?)
    }

    /// Initial window size in logical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        match self.preset {
            ScenePreset::Hero => (1280, 720),
            ScenePreset::Vault => {
                let side = scene_core::constants::VAULT_SIZE_PX * 2;
                (side, side)
            }
            ScenePreset::Phone => (480, 640),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_hero() {
        let cli = Cli::try_parse_from(["scene-native"]).unwrap();
        assert_eq!(cli.preset, ScenePreset::Hero);
        assert!(cli.config.is_none());
        assert_eq!(cli.scene_config().unwrap(), SceneConfig::hero());
    }

    #[test]
    fn parses_preset_names() {
        let cli = Cli::try_parse_from(["scene-native", "--preset", "phone"]).unwrap();
        assert_eq!(cli.preset, ScenePreset::Phone);
        assert!(Cli::try_parse_from(["scene-native", "--preset", "nebula"]).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let cli = Cli::try_parse_from([
            "scene-native",
            "--preset",
            "vault",
            "--config",
            "/nonexistent/scene.json",
        ])
        .unwrap();
        let err = cli.scene_config().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scene.json"));
    }
}
