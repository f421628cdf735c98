//! Arena representation of a host object graph.
//!
//! Objects live in a [`ValueGraph`] and are addressed by [`ObjectId`], so
//! shared references and cycles are plain ids rather than owning pointers.
//! Identity is the id; two objects with equal contents are still distinct.

use std::fmt;

/// Identity of an object inside a [`ValueGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A runtime value observed on the host
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    /// Decimal digits of the big integer
    BigInt(String),
    String(String),
    /// Symbol with its optional description
    Symbol(Option<String>),
    Object(ObjectId),
}

impl Value {
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// JavaScript truthiness; objects are always truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(value) => *value,
            Value::Number(value) => *value != 0.0 && !value.is_nan(),
            Value::BigInt(digits) => !digits.trim_start_matches(['-', '0']).is_empty(),
            Value::String(text) => !text.is_empty(),
            Value::Symbol(_) | Value::Object(_) => true,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Object(id)
    }
}

/// What we know about a function object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionData {
    /// Source text as returned by `Function.prototype.toString`
    pub source: Option<String>,
    pub is_async: bool,
    /// Declared parameter count, when the dump step could record it
    pub arity: Option<usize>,
}

impl FunctionData {
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Default::default()
        }
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }
}

/// Built-in class of an object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Plain,
    Array(Vec<Value>),
    Function(FunctionData),
    Date,
    RegExp,
    Map,
    Set,
    WeakMap,
    WeakSet,
    Promise,
    ArrayBuffer,
    /// Exotic host object; the tag is its `Symbol.toStringTag`, if any
    Host { tag: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Value,
    pub enumerable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectData {
    pub kind: ObjectKind,
    /// Own properties in insertion order
    pub properties: Vec<Property>,
    pub prototype: Option<ObjectId>,
}

impl ObjectData {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            prototype: None,
        }
    }

    /// Own enumerable properties in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties
            .iter()
            .filter(|prop| prop.enumerable)
            .map(|prop| (prop.key.as_str(), &prop.value))
    }

    /// Own property lookup, enumerable or not. Never consults the prototype.
    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|prop| prop.key == key)
            .map(|prop| &prop.value)
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.properties.iter().any(|prop| prop.key == key)
    }

    fn define(&mut self, key: String, value: Value, enumerable: bool) {
        if let Some(existing) = self.properties.iter_mut().find(|prop| prop.key == key) {
            // Redefinition keeps the original position, like JS property order
            existing.value = value;
            existing.enumerable = enumerable;
        } else {
            self.properties.push(Property {
                key,
                value,
                enumerable,
            });
        }
    }
}

/// Arena owning every object of one snapshot
#[derive(Debug, Clone, Default)]
pub struct ValueGraph {
    objects: Vec<ObjectData>,
}

impl ValueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn alloc(&mut self, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(ObjectData::new(kind));
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectData> {
        self.objects.get(id.index())
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut ObjectData> {
        self.objects.get_mut(id.index())
    }

    /// Replace the contents behind an id that was allocated up front
    pub fn replace(&mut self, id: ObjectId, data: ObjectData) {
        if let Some(slot) = self.objects.get_mut(id.index()) {
            *slot = data;
        }
    }

    /// Define an own enumerable property
    pub fn set(&mut self, id: ObjectId, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(object) = self.object_mut(id) {
            object.define(key.into(), value.into(), true);
        }
    }

    /// Define an own non-enumerable property
    pub fn set_hidden(&mut self, id: ObjectId, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(object) = self.object_mut(id) {
            object.define(key.into(), value.into(), false);
        }
    }

    pub fn set_prototype(&mut self, id: ObjectId, prototype: ObjectId) {
        if let Some(object) = self.object_mut(id) {
            object.prototype = Some(prototype);
        }
    }

    /// Allocate a plain object with the given own enumerable properties
    pub fn plain_object<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> ObjectId
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let id = self.alloc(ObjectKind::Plain);
        for (key, value) in entries {
            self.set(id, key, value);
        }
        id
    }

    pub fn array(&mut self, items: impl IntoIterator<Item = Value>) -> ObjectId {
        self.alloc(ObjectKind::Array(items.into_iter().collect()))
    }

    pub fn function(&mut self, data: FunctionData) -> ObjectId {
        self.alloc(ObjectKind::Function(data))
    }

    /// Own property lookup through a value; `None` for primitives
    pub fn get(&self, value: &Value, key: &str) -> Option<&Value> {
        value
            .as_object()
            .and_then(|id| self.object(id))
            .and_then(|object| object.get_own(key))
    }

    /// Shallow copy of `source`'s own enumerable properties into a new plain
    /// object, followed by `extra` (later keys overwrite earlier ones in place).
    pub fn spread(
        &mut self,
        source: ObjectId,
        extra: impl IntoIterator<Item = (String, Value)>,
    ) -> ObjectId {
        let copied: Vec<(String, Value)> = self
            .object(source)
            .map(|object| {
                object
                    .entries()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let id = self.alloc(ObjectKind::Plain);
        for (key, value) in copied.into_iter().chain(extra) {
            self.set(id, key, value);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_skip_hidden_properties() {
        let mut graph = ValueGraph::new();
        let id = graph.plain_object([("a", Value::from(1.0))]);
        graph.set_hidden(id, "secret", "x");
        graph.set(id, "b", true);

        let object = graph.object(id).unwrap();
        let keys: Vec<&str> = object.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(object.has_own("secret"));
    }

    #[test]
    fn test_redefinition_keeps_position() {
        let mut graph = ValueGraph::new();
        let id = graph.plain_object([("a", 1.0), ("b", 2.0)]);
        graph.set(id, "a", "changed");

        let object = graph.object(id).unwrap();
        let entries: Vec<(&str, &Value)> = object.entries().collect();
        assert_eq!(entries[0], ("a", &Value::from("changed")));
        assert_eq!(entries[1].0, "b");
    }

    #[test]
    fn test_truthiness() {
        let mut graph = ValueGraph::new();
        let empty = graph.plain_object::<&str, Value>([]);

        for falsy in [
            Value::Undefined,
            Value::Null,
            Value::from(false),
            Value::from(0.0),
            Value::from(f64::NAN),
            Value::BigInt("0".into()),
            Value::from(""),
        ] {
            assert!(!falsy.is_truthy(), "{:?}", falsy);
        }
        assert!(Value::from(true).is_truthy());
        assert!(Value::from(-1.0).is_truthy());
        assert!(Value::BigInt("10".into()).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::Object(empty).is_truthy());
    }

    #[test]
    fn test_get_ignores_prototype() {
        let mut graph = ValueGraph::new();
        let proto = graph.plain_object([("inherited", true)]);
        let id = graph.plain_object([("own", true)]);
        graph.set_prototype(id, proto);

        let value = Value::Object(id);
        assert!(graph.get(&value, "own").is_some());
        assert!(graph.get(&value, "inherited").is_none());
    }

    #[test]
    fn test_spread_creates_new_identity() {
        let mut graph = ValueGraph::new();
        let child = graph.plain_object([("x", 1.0)]);
        let source = graph.plain_object([("child", Value::Object(child)), ("a", Value::from(1.0))]);

        let copy = graph.spread(source, [("plugin".to_string(), Value::Null)]);

        assert_ne!(copy, source);
        let object = graph.object(copy).unwrap();
        let keys: Vec<&str> = object.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["child", "a", "plugin"]);
        // Children stay shared
        assert_eq!(object.get_own("child"), Some(&Value::Object(child)));
    }
}
