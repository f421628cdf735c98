use crate::document::{Declaration, Document};
use crate::error::IntrospectResult;
use crate::options::GeneratorOptions;
use crate::resolver::{NoOverrides, TypeResolver};
use crate::synth::SynthesisRun;
use crate::value::{Value, ValueGraph};
use tracing::{info, warn};

/// Declaration generator: options plus an override resolver.
///
/// Every call starts a fresh [`SynthesisRun`]; a generator can be reused for
/// any number of graphs.
pub struct Generator<R = NoOverrides> {
    options: GeneratorOptions,
    resolver: R,
}

impl Generator<NoOverrides> {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            resolver: NoOverrides,
        }
    }
}

impl Default for Generator<NoOverrides> {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl<R: TypeResolver> Generator<R> {
    pub fn with_resolver<T: TypeResolver>(self, resolver: T) -> Generator<T> {
        Generator {
            options: self.options,
            resolver,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Declarations for `root`, root interface first
    pub fn synthesize(&self, graph: &ValueGraph, root: &Value) -> IntrospectResult<Vec<Declaration>> {
        SynthesisRun::new(graph, &self.resolver, &self.options)
            .synthesize(root, &self.options.root_name)
    }

    pub fn generate(&self, graph: &ValueGraph, root: &Value) -> IntrospectResult<Document> {
        let declarations = self.synthesize(graph, root)?;
        info!(
            root = %self.options.root_name,
            declarations = declarations.len(),
            "Generated declarations"
        );
        Ok(Document::new(self.options.prelude.clone(), declarations))
    }

    /// Generate for the `key` property of a global object. A missing global
    /// is not an error: there is simply nothing to generate.
    pub fn generate_global(
        &self,
        graph: &ValueGraph,
        global: &Value,
        key: &str,
    ) -> IntrospectResult<Option<Document>> {
        match graph.get(global, key) {
            Some(root) => self.generate(graph, root).map(Some),
            None => {
                warn!(key, "Global not found, nothing to generate");
                Ok(None)
            }
        }
    }
}
