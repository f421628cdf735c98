//! # Panelgen Introspect
//!
//! Synthesizes TypeScript declarations from a snapshot of a live host object
//! graph, such as the Kirby Panel's `window.panel`.
//!
//! ## Features
//!
//! - **Identity-aware walking**: shared objects and cycles are entered once
//!   per run and reported with a circular-reference marker afterwards
//! - **Recursive interfaces**: nested plain objects become named interfaces
//!   (`Panel` → `PanelView` → `PanelViewProps`)
//! - **Collection unification**: uniform arrays become `T[]`, mixed ones a union
//! - **Function signatures**: parameter counts from declared arity or the
//!   function's source text
//! - **Declarative overrides**: [`RuleSet`] rules replace inferred types for
//!   known keys and paths
//!
//! ## Example
//!
//! ```rust
//! use panelgen_introspect::{snapshot, Generator, GeneratorOptions, RuleSet};
//!
//! let snapshot = snapshot::from_json_str(r#"{
//!     "panel": {
//!         "title": "Site",
//!         "languages": [],
//!         "user": { "id": "abc", "email": null }
//!     }
//! }"#).unwrap();
//!
//! let generator = Generator::new(GeneratorOptions::kirby_panel())
//!     .with_resolver(RuleSet::kirby_panel());
//! let document = generator
//!     .generate_global(&snapshot.graph, &snapshot.root, "panel")
//!     .unwrap()
//!     .expect("panel global present");
//!
//! let output = document.to_typescript();
//! assert!(output.contains("export interface Panel {"));
//! assert!(output.contains("  user: PanelUser;"));
//! ```

pub mod codegen;
pub mod document;
pub mod error;
pub mod generator;
pub mod kind;
pub mod naming;
pub mod options;
pub mod resolver;
pub mod signature;
pub mod snapshot;
pub mod synth;
pub mod value;

// Re-export main types for convenience
pub use codegen::{typescript::TypeScriptEmitter, DeclarationEmitter};
pub use document::{Declaration, Document, Member};
pub use error::{IntrospectError, IntrospectResult};
pub use generator::Generator;
pub use kind::{classify, Kind};
pub use options::{ArrayUnion, GeneratorOptions, InlineMarker, NameCollisions};
pub use resolver::{Matcher, NoOverrides, Resolution, ResolveContext, Rule, RuleSet, TypeResolver};
pub use snapshot::Snapshot;
pub use synth::{SynthesisRun, CIRCULAR_MARKER, OPEN_RECORD};
pub use value::{FunctionData, ObjectData, ObjectId, ObjectKind, Property, Value, ValueGraph};
