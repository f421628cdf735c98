use crate::document::{Declaration, Member};
use crate::error::{IntrospectError, IntrospectResult};
use crate::kind::{classify, Kind};
use crate::naming::{child_interface_name, sanitize_key};
use crate::options::{ArrayUnion, GeneratorOptions, NameCollisions};
use crate::resolver::{ResolveContext, TypeResolver};
use crate::signature::parse_parameters;
use crate::value::{FunctionData, ObjectId, ObjectKind, Value, ValueGraph};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Type text used where an already visited object is reached again
pub const CIRCULAR_MARKER: &str = "any /* circular reference */";

/// Target of empty objects
pub const OPEN_RECORD: &str = "Record<string, any>";

const REST_ARGS: &str = "...args: any[]";

/// State of a single synthesis run.
///
/// The visited-set and the claimed interface names belong to the run and are
/// dropped with it, so independent runs never see each other's objects.
pub struct SynthesisRun<'a, R: ?Sized> {
    graph: &'a ValueGraph,
    resolver: &'a R,
    options: &'a GeneratorOptions,
    visited: HashSet<ObjectId>,
    names: HashSet<String>,
}

impl<'a, R: TypeResolver + ?Sized> SynthesisRun<'a, R> {
    pub fn new(graph: &'a ValueGraph, resolver: &'a R, options: &'a GeneratorOptions) -> Self {
        Self {
            graph,
            resolver,
            options,
            visited: HashSet::new(),
            names: HashSet::new(),
        }
    }

    /// Walk `root` and return its declaration followed by every nested one,
    /// depth-first in key order
    pub fn synthesize(mut self, root: &Value, root_name: &str) -> IntrospectResult<Vec<Declaration>> {
        let kind = classify(self.graph, root);
        let id = match (kind, root) {
            (Kind::Object, Value::Object(id)) => *id,
            _ => return Err(IntrospectError::RootNotObject(kind)),
        };

        let (_, declarations) = self.interface(id, root_name.to_string(), 0);
        Ok(declarations)
    }

    fn interface(&mut self, id: ObjectId, name: String, depth: usize) -> (String, Vec<Declaration>) {
        self.visited.insert(id);
        let name = self.claim_name(name);

        let graph = self.graph;
        let options = self.options;
        let entries: Vec<(&'a str, &'a Value)> = graph
            .object(id)
            .map(|object| {
                object
                    .entries()
                    .filter(|(key, _)| depth > 0 || !options.is_skipped_root_key(key))
                    .collect()
            })
            .unwrap_or_default();

        if entries.is_empty() {
            debug!(interface = %name, "Empty object, emitting open record");
            let declaration = Declaration::Alias {
                name: name.clone(),
                target: OPEN_RECORD.to_string(),
            };
            return (name, vec![declaration]);
        }

        debug!(interface = %name, depth, keys = entries.len(), "Synthesizing interface");

        let mut members = Vec::with_capacity(entries.len());
        let mut nested = Vec::new();

        for (key, value) in entries {
            let kind = classify(graph, value);
            let base_name = child_interface_name(&name, key);
            // Resolvers see the name the child would actually be declared under
            let child_name = self.free_name(&base_name);

            let resolution = self.resolver.resolve(
                key,
                value,
                &ResolveContext {
                    graph,
                    depth,
                    interface_name: &name,
                    child_interface_name: &child_name,
                    kind,
                },
            );

            if let Some(extra) = resolution.extra_declarations {
                nested.push(Declaration::Raw(extra));
            }

            let type_text = match resolution.type_text {
                Some(text) => text,
                None => match (kind, value) {
                    (Kind::Object, Value::Object(child)) if self.visited.contains(child) => {
                        debug!(interface = %child_name, "Circular reference detected");
                        CIRCULAR_MARKER.to_string()
                    }
                    (Kind::Object, Value::Object(child)) => {
                        let (child_name, declarations) =
                            self.interface(*child, base_name, depth + 1);
                        nested.extend(declarations);
                        child_name
                    }
                    _ => self.inline(value, kind),
                },
            };

            members.push(Member {
                key: key.to_string(),
                optional: kind == Kind::Undefined,
                type_text,
            });
        }

        let mut declarations = Vec::with_capacity(nested.len() + 1);
        declarations.push(Declaration::Interface {
            name: name.clone(),
            members,
        });
        declarations.extend(nested);
        (name, declarations)
    }

    /// Name `name` would be declared under if claimed now
    fn free_name(&self, name: &str) -> String {
        if !self.names.contains(name) || self.options.name_collisions == NameCollisions::Allow {
            return name.to_string();
        }

        let mut suffix = 2;
        loop {
            let candidate = format!("{}{}", name, suffix);
            if !self.names.contains(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn claim_name(&mut self, name: String) -> String {
        let claimed = self.free_name(&name);
        if !self.names.insert(claimed.clone()) {
            warn!(interface = %name, "Duplicate interface name");
        } else if claimed != name {
            warn!(interface = %name, renamed = %claimed, "Interface name collision");
        }
        claimed
    }

    /// Type text for a value that does not get its own interface
    fn inline(&mut self, value: &Value, kind: Kind) -> String {
        match kind {
            Kind::Object => self.inline_object(value),
            Kind::Array => self.inline_array(value),
            Kind::Function => self.function_type(value, false),
            Kind::AsyncFunction => self.function_type(value, true),
            Kind::String | Kind::Number | Kind::Boolean | Kind::BigInt | Kind::Symbol => {
                kind.as_str().to_string()
            }
            Kind::Date => "Date".to_string(),
            Kind::RegExp => "RegExp".to_string(),
            Kind::Map => "Map<any, any>".to_string(),
            Kind::Set => "Set<any>".to_string(),
            Kind::WeakMap => "WeakMap<object, any>".to_string(),
            Kind::WeakSet => "WeakSet<object>".to_string(),
            Kind::Promise => "Promise<any>".to_string(),
            Kind::ArrayBuffer => "ArrayBuffer".to_string(),
            Kind::Null | Kind::Undefined | Kind::Unknown => "any".to_string(),
        }
    }

    fn inline_object(&mut self, value: &Value) -> String {
        let graph = self.graph;
        let (id, object) = match value.as_object().and_then(|id| graph.object(id).map(|o| (id, o))) {
            Some(found) => found,
            None => return "any".to_string(),
        };

        let marker = self
            .options
            .inline_markers
            .iter()
            .find(|marker| object.get_own(&marker.key).is_some_and(Value::is_truthy));
        if let Some(marker) = marker {
            debug!(key = %marker.key, "Inline object collapsed by marker");
            return marker.type_text.clone();
        }

        if !self.visited.insert(id) {
            return CIRCULAR_MARKER.to_string();
        }

        let entries: Vec<(&'a str, &'a Value)> = object.entries().collect();
        if entries.is_empty() {
            return OPEN_RECORD.to_string();
        }

        let members: Vec<String> = entries
            .into_iter()
            .map(|(key, value)| {
                let kind = classify(graph, value);
                let optional_marker = if kind == Kind::Undefined { "?" } else { "" };
                format!(
                    "{}{}: {}",
                    sanitize_key(key),
                    optional_marker,
                    self.inline(value, kind)
                )
            })
            .collect();

        format!("{{ {} }}", members.join(", "))
    }

    fn inline_array(&mut self, value: &Value) -> String {
        let graph = self.graph;
        let (id, items) = match value.as_object().and_then(|id| graph.object(id).map(|o| (id, &o.kind))) {
            Some((id, ObjectKind::Array(items))) => (id, items),
            _ => return "any[]".to_string(),
        };

        if !self.visited.insert(id) {
            return CIRCULAR_MARKER.to_string();
        }

        if items.is_empty() {
            return "any[]".to_string();
        }

        let kinds: Vec<Kind> = items.iter().map(|item| classify(graph, item)).collect();
        let mut distinct: Vec<Kind> = Vec::new();
        for kind in &kinds {
            if !distinct.contains(kind) {
                distinct.push(*kind);
            }
        }

        // Uniform arrays are typed from their first element
        if distinct.len() == 1 {
            let element = self.inline(&items[0], distinct[0]);
            return array_of(&element);
        }

        let members: Vec<String> = match self.options.array_union {
            ArrayUnion::DistinctKinds => {
                let mut members = Vec::with_capacity(distinct.len());
                for kind in &distinct {
                    let index = kinds.iter().position(|k| k == kind).unwrap_or(0);
                    let text = parenthesize_function(self.inline(&items[index], *kind));
                    if !members.contains(&text) {
                        members.push(text);
                    }
                }
                members
            }
            ArrayUnion::Positional => distinct
                .iter()
                .enumerate()
                .map(|(index, kind)| {
                    let text = self.positional_member(&items[index], kinds[index], *kind);
                    parenthesize_function(text)
                })
                .collect(),
        };

        format!("({})[]", members.join(" | "))
    }

    /// Union member for `kind` typed from an element that may be of another
    /// kind. Mismatched pairs render as older generators rendered them.
    fn positional_member(&mut self, value: &Value, value_kind: Kind, kind: Kind) -> String {
        if value_kind == kind {
            return self.inline(value, kind);
        }

        match (kind, value) {
            // A primitive has no keys
            (Kind::Object, value) if value.as_object().is_none() => OPEN_RECORD.to_string(),
            (Kind::Function | Kind::AsyncFunction, _) => {
                let is_async = kind == Kind::AsyncFunction;
                if matches!(value_kind, Kind::Function | Kind::AsyncFunction) {
                    self.function_type(value, is_async)
                } else {
                    // Only functions stringify with a parameter list
                    let return_type = if is_async { "Promise<any>" } else { "any" };
                    format!("() => {}", return_type)
                }
            }
            // Strings iterate as characters
            (Kind::Array, Value::String(text)) if !text.is_empty() => "string[]".to_string(),
            _ => self.inline(value, kind),
        }
    }

    fn function_type(&self, value: &Value, is_async: bool) -> String {
        let return_type = if is_async { "Promise<any>" } else { "any" };

        let data = value
            .as_object()
            .and_then(|id| self.graph.object(id))
            .and_then(|object| match &object.kind {
                ObjectKind::Function(data) => Some(data),
                _ => None,
            });

        let parameters = match data {
            // Declared arity is exact, so zero really means no parameters
            Some(FunctionData {
                arity: Some(arity), ..
            }) => optional_args(*arity),
            Some(FunctionData {
                source: Some(source),
                ..
            }) => match parse_parameters(source) {
                Ok(list) if list.count > 0 && !list.rest => optional_args(list.count),
                Ok(_) => REST_ARGS.to_string(),
                Err(err) => {
                    debug!(error = %err, "Falling back to rest parameters");
                    REST_ARGS.to_string()
                }
            },
            _ => REST_ARGS.to_string(),
        };

        format!("({}) => {}", parameters, return_type)
    }
}

fn optional_args(count: usize) -> String {
    (1..=count)
        .map(|index| format!("arg{}?: any", index))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parenthesize_function(text: String) -> String {
    if text.contains("=>") {
        format!("({})", text)
    } else {
        text
    }
}

fn array_of(element: &str) -> String {
    format!("{}[]", parenthesize_function(element.to_string()))
}
