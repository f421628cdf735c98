//! # Panelgen Runtime
//!
//! Small helpers shared by Panel plugin tooling: plugin asset lookup,
//! translation of label maps, section endpoints, local development
//! detection, host version checks and a tagged console logger.

pub mod assets;
pub mod compat;
pub mod env;
pub mod error;
pub mod i18n;
pub mod logger;
pub mod section;

pub use assets::{AssetRegistry, FsModuleLoader, ModuleLoader, PluginAsset};
pub use compat::{Capability, HostVersion};
pub use env::is_local_dev;
pub use error::{RuntimeError, RuntimeResult};
pub use i18n::{translate, Translatable};
pub use logger::{LogType, Logger};
pub use section::section_endpoint;
