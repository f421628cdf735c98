//! Registry of plugin assets and the modules loaded from them.

use crate::error::{RuntimeError, RuntimeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const MODULE_EXTENSION: &str = ".js";

/// A file shipped by a plugin, addressed by its filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginAsset {
    pub filename: String,
    pub url: String,
}

impl PluginAsset {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
        }
    }
}

/// Fetches the module behind an asset
pub trait ModuleLoader {
    type Module;

    fn load(&self, asset: &PluginAsset) -> RuntimeResult<Self::Module>;
}

/// Loads module source text from files below `root`; asset urls are
/// interpreted as paths relative to it
pub struct FsModuleLoader {
    root: PathBuf,
}

impl FsModuleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ModuleLoader for FsModuleLoader {
    type Module = String;

    fn load(&self, asset: &PluginAsset) -> RuntimeResult<String> {
        let path = self.root.join(asset.url.trim_start_matches('/'));
        fs::read_to_string(&path).map_err(|err| RuntimeError::ModuleLoad {
            filename: asset.filename.clone(),
            message: format!("{}: {}", path.display(), err),
        })
    }
}

/// Registered assets plus a per-filename cache of loaded modules
pub struct AssetRegistry<M = String> {
    assets: Vec<PluginAsset>,
    modules: HashMap<String, M>,
}

impl<M> Default for AssetRegistry<M> {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            modules: HashMap::new(),
        }
    }
}

impl<M> AssetRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add assets, ignoring filenames that are already registered.
    /// Returns how many were added.
    pub fn register(&mut self, assets: impl IntoIterator<Item = PluginAsset>) -> usize {
        let mut added = 0;
        for asset in assets {
            if self.assets.iter().any(|existing| existing.filename == asset.filename) {
                continue;
            }
            debug!(filename = %asset.filename, url = %asset.url, "Registered plugin asset");
            self.assets.push(asset);
            added += 1;
        }
        added
    }

    pub fn assets(&self) -> &[PluginAsset] {
        &self.assets
    }

    pub fn resolve(&self, filename: &str) -> RuntimeResult<&PluginAsset> {
        if self.assets.is_empty() {
            return Err(RuntimeError::AssetsNotRegistered);
        }

        self.assets
            .iter()
            .find(|asset| asset.filename == filename)
            .ok_or_else(|| RuntimeError::AssetNotFound(filename.to_string()))
    }

    /// Load a module asset once; later calls return the cached module.
    /// The `.js` extension is optional.
    pub fn load_module<L>(&mut self, filename: &str, loader: &L) -> RuntimeResult<&M>
    where
        L: ModuleLoader<Module = M>,
    {
        let filename = module_filename(filename);

        if !self.modules.contains_key(&filename) {
            let asset = self.resolve(&filename)?;
            let module = loader.load(asset)?;
            debug!(filename = %filename, "Loaded plugin module");
            self.modules.insert(filename.clone(), module);
        }

        self.modules
            .get(&filename)
            .ok_or(RuntimeError::AssetNotFound(filename))
    }

    pub fn is_loaded(&self, filename: &str) -> bool {
        self.modules.contains_key(&module_filename(filename))
    }
}

fn module_filename(filename: &str) -> String {
    if filename.ends_with(MODULE_EXTENSION) {
        filename.to_string()
    } else {
        format!("{}{}", filename, MODULE_EXTENSION)
    }
}
