//! Integration tests for plugin asset loading

use panelgen_runtime::{AssetRegistry, FsModuleLoader, PluginAsset, RuntimeError};
use std::fs;

#[test]
fn test_register_from_json_and_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let plugin_dir = dir.path().join("media/plugins/acme/tools");
    fs::create_dir_all(&plugin_dir).unwrap();
    fs::write(plugin_dir.join("chart.js"), "export const chart = 1;").unwrap();

    let assets: Vec<PluginAsset> = serde_json::from_str(
        r#"[
            { "filename": "chart.js", "url": "/media/plugins/acme/tools/chart.js" },
            { "filename": "icon.svg", "url": "/media/plugins/acme/tools/icon.svg" },
            { "filename": "chart.js", "url": "/elsewhere/chart.js" }
        ]"#,
    )
    .unwrap();

    let mut registry = AssetRegistry::new();
    assert_eq!(registry.register(assets), 2);

    let loader = FsModuleLoader::new(dir.path());
    let source = registry.load_module("chart", &loader).unwrap();
    assert_eq!(source, "export const chart = 1;");

    // The cache answers even after the file is gone
    fs::remove_file(plugin_dir.join("chart.js")).unwrap();
    assert!(registry.load_module("chart.js", &loader).is_ok());

    assert!(matches!(
        registry.load_module("missing", &loader),
        Err(RuntimeError::AssetNotFound(name)) if name == "missing.js"
    ));
}
