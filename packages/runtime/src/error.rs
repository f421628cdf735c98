use crate::compat::{Capability, HostVersion};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Plugin assets not registered")]
    AssetsNotRegistered,

    #[error("Plugin asset \"{0}\" not found")]
    AssetNotFound(String),

    #[error("Failed to load plugin module \"{filename}\": {message}")]
    ModuleLoad { filename: String, message: String },

    #[error("{capability} is not supported by {version}")]
    Unsupported {
        capability: Capability,
        version: HostVersion,
    },
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
