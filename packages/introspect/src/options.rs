use serde::{Deserialize, Serialize};

pub const DEFAULT_ROOT_NAME: &str = "Root";

/// What to do when two key paths normalize to the same interface name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameCollisions {
    /// Append a numeric suffix to later interfaces (`PanelFoo2`)
    #[default]
    Suffix,
    /// Emit every declaration under its derived name, duplicates included
    Allow,
}

/// How mixed-kind arrays become unions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrayUnion {
    /// One member per distinct kind, typed from the first element of that kind
    #[default]
    DistinctKinds,
    /// One member per distinct kind, typed from the element at the same
    /// index as the kind, as older generator versions did. A kind paired with
    /// an element of another kind renders the way those versions rendered it.
    Positional,
}

/// Inline objects with a truthy `key` property are written as `type_text`
/// instead of being expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InlineMarker {
    pub key: String,

    #[serde(rename = "type")]
    pub type_text: String,
}

impl InlineMarker {
    pub fn new(key: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_text: type_text.into(),
        }
    }
}

/// Configuration options for declaration generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Name of the root interface
    pub root_name: String,

    /// Lines printed before the declarations (imports)
    pub prelude: Vec<String>,

    /// Root-level keys starting with any of these prefixes are left out
    pub skip_root_key_prefixes: Vec<String>,

    pub name_collisions: NameCollisions,

    pub array_union: ArrayUnion,

    /// Checked in order; the first present marker wins
    pub inline_markers: Vec<InlineMarker>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            prelude: Vec::new(),
            skip_root_key_prefixes: Vec::new(),
            name_collisions: NameCollisions::default(),
            array_union: ArrayUnion::default(),
            inline_markers: Vec::new(),
        }
    }
}

impl GeneratorOptions {
    /// Options for the Kirby Panel global: `Panel` root, Vue type imports,
    /// deprecated `$` aliases skipped, inline Vue components collapsed
    pub fn kirby_panel() -> Self {
        Self {
            root_name: "Panel".to_string(),
            prelude: vec![
                "import type { ComponentPublicInstance, VueConstructor } from \"vue\";".to_string(),
            ],
            skip_root_key_prefixes: vec!["$".to_string()],
            inline_markers: vec![InlineMarker::new("_isVue", "ComponentPublicInstance")],
            ..Default::default()
        }
    }

    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    pub fn is_skipped_root_key(&self, key: &str) -> bool {
        self.skip_root_key_prefixes
            .iter()
            .any(|prefix| key.starts_with(prefix.as_str()))
    }
}
