//! JSON snapshot format for host object graphs.
//!
//! Plain JSON maps onto the obvious values. Everything JSON cannot say is
//! spelled with reserved `@@` keys:
//!
//! ```json
//! {
//!   "@@id": "panel",
//!   "title": "Site",
//!   "draft": { "@@kind": "undefined" },
//!   "open": { "@@kind": "function", "source": "async function (url) {}", "async": true },
//!   "self": { "@@ref": "panel" },
//!   "@@hidden": { "secret": 1 },
//!   "@@proto": { "inherited": true }
//! }
//! ```
//!
//! `@@id` labels an object so `@@ref` can point at it from anywhere in the
//! document, before or after the definition, which is how shared references
//! and cycles are written. Tagged objects (`array`, `function`, `map`, ...)
//! keep their own enumerable properties under `properties`.

use crate::error::{IntrospectError, IntrospectResult};
use crate::kind::classify;
use crate::value::{FunctionData, ObjectData, ObjectId, ObjectKind, Property, Value, ValueGraph};
use serde_json::{Map, Value as Json};
use std::collections::HashMap;
use std::io::Read;

pub const KIND_KEY: &str = "@@kind";
pub const ID_KEY: &str = "@@id";
pub const REF_KEY: &str = "@@ref";
pub const PROTO_KEY: &str = "@@proto";
pub const HIDDEN_KEY: &str = "@@hidden";

const RESERVED_KEYS: [&str; 4] = [KIND_KEY, ID_KEY, PROTO_KEY, HIDDEN_KEY];

/// A decoded snapshot: the object arena plus the root value
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub graph: ValueGraph,
    pub root: Value,
}

impl Snapshot {
    /// Own property of the root, e.g. the `panel` global of a `window` dump
    pub fn global(&self, key: &str) -> Option<&Value> {
        self.graph.get(&self.root, key)
    }

    /// Build `{ ...target, ...extra }` as a new object in this snapshot's
    /// graph. `extra` values use the snapshot format; their labels are local
    /// to each value.
    pub fn inject(&mut self, target: &Value, extra: &Map<String, Json>) -> IntrospectResult<Value> {
        let id = target
            .as_object()
            .ok_or_else(|| IntrospectError::RootNotObject(classify(&self.graph, target)))?;

        let mut entries = Vec::with_capacity(extra.len());
        for (key, json) in extra {
            entries.push((key.clone(), decode_into(&mut self.graph, json)?));
        }
        Ok(Value::Object(self.graph.spread(id, entries)))
    }
}

pub fn from_json_str(source: &str) -> IntrospectResult<Snapshot> {
    let json: Json = serde_json::from_str(source)?;
    from_json(&json)
}

pub fn from_reader<R: Read>(reader: R) -> IntrospectResult<Snapshot> {
    let json: Json = serde_json::from_reader(reader)?;
    from_json(&json)
}

pub fn from_json(json: &Json) -> IntrospectResult<Snapshot> {
    let mut decoder = Decoder::default();
    decoder.collect_labels(json)?;
    let root = decoder.decode(json)?;
    Ok(Snapshot {
        graph: decoder.graph,
        root,
    })
}

/// Decode one snapshot value into an existing graph
pub fn decode_into(graph: &mut ValueGraph, json: &Json) -> IntrospectResult<Value> {
    let mut decoder = Decoder {
        graph: std::mem::take(graph),
        labels: HashMap::new(),
    };
    let result = decoder
        .collect_labels(json)
        .and_then(|()| decoder.decode(json));
    *graph = decoder.graph;
    result
}

#[derive(Default)]
struct Decoder {
    graph: ValueGraph,
    labels: HashMap<String, ObjectId>,
}

impl Decoder {
    /// First pass: reserve an id for every labelled object so references can
    /// be resolved regardless of document order
    fn collect_labels(&mut self, json: &Json) -> IntrospectResult<()> {
        match json {
            Json::Array(items) => {
                for item in items {
                    self.collect_labels(item)?;
                }
            }
            Json::Object(map) => {
                if let Some(label) = map.get(ID_KEY) {
                    let label = label
                        .as_str()
                        .ok_or_else(|| IntrospectError::invalid_snapshot("@@id must be a string"))?;
                    if is_primitive_tag(map) {
                        return Err(IntrospectError::invalid_snapshot(format!(
                            "primitive value cannot carry @@id '{}'",
                            label
                        )));
                    }
                    if self.labels.contains_key(label) {
                        return Err(IntrospectError::DuplicateLabel(label.to_string()));
                    }
                    let id = self.graph.alloc(ObjectKind::Plain);
                    self.labels.insert(label.to_string(), id);
                }
                for value in map.values() {
                    self.collect_labels(value)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn decode(&mut self, json: &Json) -> IntrospectResult<Value> {
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(value) => Ok(Value::Boolean(*value)),
            Json::Number(number) => number
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| IntrospectError::invalid_snapshot(format!("number out of range: {}", number))),
            Json::String(value) => Ok(Value::String(value.clone())),
            Json::Array(items) => {
                let items = self.decode_items(items)?;
                Ok(Value::Object(self.graph.array(items)))
            }
            Json::Object(map) => self.decode_object(map),
        }
    }

    fn decode_items(&mut self, items: &[Json]) -> IntrospectResult<Vec<Value>> {
        items.iter().map(|item| self.decode(item)).collect()
    }

    fn decode_object(&mut self, map: &Map<String, Json>) -> IntrospectResult<Value> {
        if let Some(target) = map.get(REF_KEY) {
            if map.len() != 1 {
                return Err(IntrospectError::invalid_snapshot("@@ref cannot have sibling keys"));
            }
            let label = target
                .as_str()
                .ok_or_else(|| IntrospectError::invalid_snapshot("@@ref must be a string"))?;
            return self
                .labels
                .get(label)
                .map(|id| Value::Object(*id))
                .ok_or_else(|| IntrospectError::UnknownReference(label.to_string()));
        }

        let tag = match map.get(KIND_KEY) {
            None => None,
            Some(Json::String(tag)) => Some(tag.as_str()),
            Some(_) => return Err(IntrospectError::invalid_snapshot("@@kind must be a string")),
        };

        let kind = match tag {
            None | Some("object") => ObjectKind::Plain,
            Some("undefined") => return Ok(Value::Undefined),
            Some("bigint") => {
                let digits = string_field(map, "value")?
                    .ok_or_else(|| IntrospectError::invalid_snapshot("bigint needs a value"))?;
                return Ok(Value::BigInt(digits));
            }
            Some("symbol") => return Ok(Value::Symbol(string_field(map, "description")?)),
            Some("array") => {
                let items = match map.get("items") {
                    Some(Json::Array(items)) => self.decode_items(items)?,
                    None => Vec::new(),
                    Some(_) => return Err(IntrospectError::invalid_snapshot("array items must be a list")),
                };
                ObjectKind::Array(items)
            }
            Some("function") => ObjectKind::Function(FunctionData {
                source: string_field(map, "source")?,
                is_async: map.get("async").and_then(Json::as_bool).unwrap_or(false),
                arity: map.get("arity").and_then(Json::as_u64).map(|arity| arity as usize),
            }),
            Some("date") => ObjectKind::Date,
            Some("regexp") => ObjectKind::RegExp,
            Some("map") => ObjectKind::Map,
            Some("set") => ObjectKind::Set,
            Some("weakmap") => ObjectKind::WeakMap,
            Some("weakset") => ObjectKind::WeakSet,
            Some("promise") => ObjectKind::Promise,
            Some("arraybuffer") => ObjectKind::ArrayBuffer,
            Some("host") => ObjectKind::Host {
                tag: string_field(map, "tag")?,
            },
            Some(other) => return Err(IntrospectError::UnknownKind(other.to_string())),
        };

        let id = match map.get(ID_KEY).and_then(Json::as_str) {
            Some(label) => self
                .labels
                .get(label)
                .copied()
                .ok_or_else(|| IntrospectError::UnknownReference(label.to_string()))?,
            None => self.graph.alloc(ObjectKind::Plain),
        };

        let mut properties = Vec::new();
        if tag.is_none() || tag == Some("object") {
            for (key, value) in map {
                if RESERVED_KEYS.contains(&key.as_str()) {
                    continue;
                }
                properties.push(Property {
                    key: key.clone(),
                    value: self.decode(value)?,
                    enumerable: true,
                });
            }
        } else if let Some(own) = map.get("properties") {
            self.decode_properties(own, true, &mut properties)?;
        }

        if let Some(hidden) = map.get(HIDDEN_KEY) {
            self.decode_properties(hidden, false, &mut properties)?;
        }

        let prototype = match map.get(PROTO_KEY) {
            Some(proto) => match self.decode(proto)? {
                Value::Object(proto_id) => Some(proto_id),
                Value::Null => None,
                _ => return Err(IntrospectError::invalid_snapshot("@@proto must be an object or null")),
            },
            None => None,
        };

        self.graph.replace(
            id,
            ObjectData {
                kind,
                properties,
                prototype,
            },
        );
        Ok(Value::Object(id))
    }

    fn decode_properties(
        &mut self,
        json: &Json,
        enumerable: bool,
        properties: &mut Vec<Property>,
    ) -> IntrospectResult<()> {
        let map = json
            .as_object()
            .ok_or_else(|| IntrospectError::invalid_snapshot("property lists must be objects"))?;
        for (key, value) in map {
            properties.push(Property {
                key: key.clone(),
                value: self.decode(value)?,
                enumerable,
            });
        }
        Ok(())
    }
}

fn is_primitive_tag(map: &Map<String, Json>) -> bool {
    matches!(
        map.get(KIND_KEY).and_then(Json::as_str),
        Some("undefined" | "bigint" | "symbol")
    )
}

fn string_field(map: &Map<String, Json>, key: &str) -> IntrospectResult<Option<String>> {
    match map.get(key) {
        None | Some(Json::Null) => Ok(None),
        Some(Json::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(IntrospectError::invalid_snapshot(format!("'{}' must be a string", key))),
    }
}
