//! Host version detection and capability checks.
//!
//! Features that only exist on one Panel generation are gated through
//! [`HostVersion::require`], which fails with [`RuntimeError::Unsupported`]
//! instead of handing out a stand-in object.

use crate::error::{RuntimeError, RuntimeResult};
use panelgen_introspect::{Value, ValueGraph};
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostVersion {
    Kirby4,
    Kirby5,
}

impl HostVersion {
    /// Kirby 5 is the first Panel to expose the `content` API object
    pub fn detect(graph: &ValueGraph, panel: &Value) -> HostVersion {
        let version = if graph.get(panel, "content").is_some() {
            HostVersion::Kirby5
        } else {
            HostVersion::Kirby4
        };
        debug!(%version, "Detected host version");
        version
    }

    pub fn supports(self, capability: Capability) -> bool {
        match capability {
            Capability::ContentApi | Capability::DialogClosedEvent => self >= HostVersion::Kirby5,
            Capability::StoreContentUpdate => self == HostVersion::Kirby4,
        }
    }

    pub fn require(self, capability: Capability) -> RuntimeResult<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(RuntimeError::Unsupported {
                capability,
                version: self,
            })
        }
    }

    /// Dialog event that fires once a dialog has finished closing
    pub fn dialog_close_event(self) -> &'static str {
        if self.supports(Capability::DialogClosedEvent) {
            "closed"
        } else {
            "close"
        }
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostVersion::Kirby4 => write!(f, "Kirby 4"),
            HostVersion::Kirby5 => write!(f, "Kirby 5"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// `panel.content` with `merge` and `changes`
    ContentApi,
    /// Dispatching `content/update` to the Vuex store
    StoreContentUpdate,
    DialogClosedEvent,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::ContentApi => "Content API",
            Capability::StoreContentUpdate => "Store content updates",
            Capability::DialogClosedEvent => "Dialog `closed` event",
        };
        f.write_str(name)
    }
}
