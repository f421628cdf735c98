use crate::value::{ObjectKind, Value, ValueGraph};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of value classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Undefined,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Array,
    Object,
    Function,
    AsyncFunction,
    Date,
    RegExp,
    Map,
    Set,
    WeakMap,
    WeakSet,
    Promise,
    ArrayBuffer,
    /// Anything the classifier cannot name
    Unknown,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Undefined => "undefined",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::BigInt => "bigint",
            Kind::Symbol => "symbol",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Function => "function",
            Kind::AsyncFunction => "asyncfunction",
            Kind::Date => "date",
            Kind::RegExp => "regexp",
            Kind::Map => "map",
            Kind::Set => "set",
            Kind::WeakMap => "weakmap",
            Kind::WeakSet => "weakset",
            Kind::Promise => "promise",
            Kind::ArrayBuffer => "arraybuffer",
            Kind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value. Never fails: dangling ids and unnamed host objects
/// come back as [`Kind::Unknown`].
pub fn classify(graph: &ValueGraph, value: &Value) -> Kind {
    match value {
        Value::Undefined => Kind::Undefined,
        Value::Null => Kind::Null,
        Value::Boolean(_) => Kind::Boolean,
        Value::Number(_) => Kind::Number,
        Value::BigInt(_) => Kind::BigInt,
        Value::String(_) => Kind::String,
        Value::Symbol(_) => Kind::Symbol,
        Value::Object(id) => match graph.object(*id).map(|object| &object.kind) {
            Some(ObjectKind::Plain) => Kind::Object,
            Some(ObjectKind::Array(_)) => Kind::Array,
            Some(ObjectKind::Function(data)) if data.is_async => Kind::AsyncFunction,
            Some(ObjectKind::Function(_)) => Kind::Function,
            Some(ObjectKind::Date) => Kind::Date,
            Some(ObjectKind::RegExp) => Kind::RegExp,
            Some(ObjectKind::Map) => Kind::Map,
            Some(ObjectKind::Set) => Kind::Set,
            Some(ObjectKind::WeakMap) => Kind::WeakMap,
            Some(ObjectKind::WeakSet) => Kind::WeakSet,
            Some(ObjectKind::Promise) => Kind::Promise,
            Some(ObjectKind::ArrayBuffer) => Kind::ArrayBuffer,
            Some(ObjectKind::Host { .. }) | None => Kind::Unknown,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FunctionData;

    #[test]
    fn test_classify_primitives() {
        let graph = ValueGraph::new();

        assert_eq!(classify(&graph, &Value::Null), Kind::Null);
        assert_eq!(classify(&graph, &Value::Undefined), Kind::Undefined);
        assert_eq!(classify(&graph, &Value::from("a")), Kind::String);
        assert_eq!(classify(&graph, &Value::from(1.5)), Kind::Number);
        assert_eq!(classify(&graph, &Value::from(false)), Kind::Boolean);
        assert_eq!(classify(&graph, &Value::BigInt("10".into())), Kind::BigInt);
        assert_eq!(classify(&graph, &Value::Symbol(None)), Kind::Symbol);
    }

    #[test]
    fn test_classify_objects() {
        let mut graph = ValueGraph::new();
        let plain = graph.plain_object::<&str, Value>([]);
        let array = graph.array([]);
        let sync_fn = graph.function(FunctionData::from_source("function () {}"));
        let async_fn = graph.function(FunctionData::from_source("async () => {}").asynchronous());
        let date = graph.alloc(ObjectKind::Date);

        assert_eq!(classify(&graph, &plain.into()), Kind::Object);
        assert_eq!(classify(&graph, &array.into()), Kind::Array);
        assert_eq!(classify(&graph, &sync_fn.into()), Kind::Function);
        assert_eq!(classify(&graph, &async_fn.into()), Kind::AsyncFunction);
        assert_eq!(classify(&graph, &date.into()), Kind::Date);
    }

    #[test]
    fn test_classify_exotic_falls_back_to_unknown() {
        let mut graph = ValueGraph::new();
        let host = graph.alloc(ObjectKind::Host {
            tag: Some("Window".into()),
        });
        assert_eq!(classify(&graph, &host.into()), Kind::Unknown);

        // Dangling id from another graph
        let mut other = ValueGraph::new();
        other.alloc(ObjectKind::Plain);
        let foreign = other.alloc(ObjectKind::Plain);
        assert_eq!(classify(&ValueGraph::new(), &foreign.into()), Kind::Unknown);
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: Kind = serde_json::from_str("\"asyncfunction\"").unwrap();
        assert_eq!(kind, Kind::AsyncFunction);
        assert_eq!(serde_json::to_string(&Kind::RegExp).unwrap(), "\"regexp\"");
    }
}
