use anyhow::Context;
use clap::ValueEnum;
use panelgen_introspect::{ArrayUnion, GeneratorOptions, InlineMarker, NameCollisions, RuleSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "panelgen.config.json";

/// Built-in option and rule bundles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// `window.panel` of the Kirby Panel
    #[default]
    KirbyPanel,
    /// Plain inference, no overrides
    None,
}

/// Panelgen configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root interface name (defaults to the preset's, `Panel` for Kirby)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_name: Option<String>,

    /// Property of the snapshot root to generate for, e.g. `panel`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,

    #[serde(default)]
    pub preset: Preset,

    /// Lines printed before the declarations (replaces the preset's)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prelude: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_root_key_prefixes: Option<Vec<String>>,

    /// Inline objects collapsed to a fixed type (replaces the preset's)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_markers: Option<Vec<InlineMarker>>,

    /// Extra root properties, in snapshot format
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub inject: Map<String, Json>,

    /// Resolver rules, checked before the preset's
    #[serde(default, skip_serializing_if = "RuleSet::is_empty")]
    pub rules: RuleSet,

    #[serde(default)]
    pub name_collisions: NameCollisions,

    #[serde(default)]
    pub array_union: ArrayUnion,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Starter config written by `panelgen init`
    pub fn starter(preset: Preset) -> Self {
        match preset {
            Preset::KirbyPanel => {
                let mut inject = Map::new();
                inject.insert(
                    "plugin".to_string(),
                    serde_json::json!({ "@@kind": "function", "source": "() => {}" }),
                );
                Self {
                    global: Some("panel".to_string()),
                    preset,
                    inject,
                    ..Default::default()
                }
            }
            Preset::None => Self {
                root_name: Some("Root".to_string()),
                preset,
                ..Default::default()
            },
        }
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        let mut options = match self.preset {
            Preset::KirbyPanel => GeneratorOptions::kirby_panel(),
            Preset::None => GeneratorOptions::default(),
        };

        if let Some(root_name) = &self.root_name {
            options.root_name = root_name.clone();
        }
        if let Some(prelude) = &self.prelude {
            options.prelude = prelude.clone();
        }
        if let Some(prefixes) = &self.skip_root_key_prefixes {
            options.skip_root_key_prefixes = prefixes.clone();
        }
        if let Some(markers) = &self.inline_markers {
            options.inline_markers = markers.clone();
        }
        options.name_collisions = self.name_collisions;
        options.array_union = self.array_union;
        options
    }

    /// Configured rules followed by the preset's
    pub fn rule_set(&self) -> RuleSet {
        let mut rules = RuleSet::from(self.rules.rules().to_vec());
        if self.preset == Preset::KirbyPanel {
            rules.extend(RuleSet::kirby_panel());
        }
        rules
    }
}
