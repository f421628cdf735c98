use criterion::{black_box, criterion_group, criterion_main, Criterion};
use panelgen_introspect::{
    snapshot, FunctionData, Generator, GeneratorOptions, RuleSet, Value, ValueGraph,
};

fn decode_panel_snapshot(c: &mut Criterion) {
    let source = r#"{
        "panel": {
            "@@id": "panel",
            "title": "Site",
            "languages": [{ "code": "en", "default": true }],
            "user": { "id": "abc", "email": "a@b.c", "role": { "name": "admin" } },
            "view": { "props": { "tabs": [], "model": { "id": "home" } } },
            "open": { "@@kind": "function", "source": "async function (url, options) {}", "async": true },
            "self": { "@@ref": "panel" }
        }
    }"#;

    c.bench_function("decode_panel_snapshot", |b| {
        b.iter(|| snapshot::from_json_str(black_box(source)))
    });
}

/// A wide, moderately deep graph with shared nodes and a back edge
fn build_graph(width: usize, depth: usize) -> (ValueGraph, Value) {
    let mut graph = ValueGraph::new();
    let shared = graph.plain_object([("shared", true)]);
    let handler = graph.function(FunctionData::from_source("function (event, payload) {}"));

    let mut level: Vec<Value> = Vec::new();
    for d in 0..depth {
        let mut entries: Vec<(String, Value)> = (0..width)
            .map(|i| (format!("field{}", i), Value::from(i as f64)))
            .collect();
        entries.push(("shared".to_string(), Value::Object(shared)));
        entries.push(("onClick".to_string(), Value::Object(handler)));
        for (i, child) in level.drain(..).enumerate() {
            entries.push((format!("child{}", i), child));
        }
        let id = graph.plain_object(entries);
        level.push(Value::Object(id));
        if d % 2 == 0 {
            level.push(Value::Object(graph.plain_object([("level", d as f64)])));
        }
    }

    let root = graph.plain_object(
        level
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("root{}", i), value)),
    );
    graph.set(root, "back", Value::Object(root));
    (graph, Value::Object(root))
}

fn generate_wide_graph(c: &mut Criterion) {
    let (graph, root) = build_graph(50, 12);
    let generator = Generator::default();

    c.bench_function("generate_wide_graph", |b| {
        b.iter(|| generator.generate(black_box(&graph), black_box(&root)))
    });
}

fn generate_with_rules(c: &mut Criterion) {
    let (graph, root) = build_graph(50, 12);
    let generator = Generator::new(GeneratorOptions::kirby_panel().with_root_name("Root"))
        .with_resolver(RuleSet::kirby_panel());

    c.bench_function("generate_with_rules", |b| {
        b.iter(|| {
            generator
                .generate(black_box(&graph), black_box(&root))
                .map(|document| document.to_typescript())
        })
    });
}

criterion_group!(
    benches,
    decode_panel_snapshot,
    generate_wide_graph,
    generate_with_rules
);
criterion_main!(benches);
