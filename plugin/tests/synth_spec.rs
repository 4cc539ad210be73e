use bindle_plugin::synth::synthesize;
use bindle_plugin::{BundleDeclaration, BundlePlugin, PluginOptions, RefSpec};
use std::fs;
use tempfile::TempDir;

fn declaration(refs: Vec<RefSpec>) -> BundleDeclaration {
    BundleDeclaration {
        refs,
        ..Default::default()
    }
}

#[test]
fn test_global_with_named_exports() {
    let decl = BundleDeclaration {
        global: Some("Lib".to_string()),
        exports: vec!["foo".to_string(), "bar".to_string()],
        ..declaration(vec!["vendor/lib.js".into()])
    };

    let code = synthesize("X", &decl).unwrap();

    assert!(code.contains("export { default } from \"\0extern-bundle:X\";"));
    assert!(code.contains("export { foo, bar } from \"\0extern-bundle:X\";"));
    assert!(!code.contains("import '"));
}

#[test]
fn test_side_effect_imports_precede_exports_in_order() {
    let decl = BundleDeclaration {
        global: Some("Widgets".to_string()),
        imports: vec!["./theme.css".to_string(), "./reset.css".to_string()],
        ..declaration(vec!["dist/widgets.js".into()])
    };

    let code = synthesize("widgets", &decl).unwrap();

    let theme = code.find("import './theme.css';").unwrap();
    let reset = code.find("import './reset.css';").unwrap();
    let default_export = code.find("export { default }").unwrap();
    assert!(theme < reset);
    assert!(reset < default_export);
}

#[test]
fn test_bundle_without_global_is_a_single_side_effect_import() {
    let decl = declaration(vec!["dist/styles.css".into()]);

    let code = synthesize("styles", &decl).unwrap();

    assert_eq!(code, "import '\0extern-bundle:styles';\n");
}

#[test]
fn test_empty_refs_yield_no_module() {
    let decl = declaration(Vec::new());

    assert!(synthesize("empty", &decl).is_none());
}

#[tokio::test]
async fn test_load_registers_global_binding() {
    let tmp = TempDir::new().unwrap();
    let pkg_dir = tmp.path().join("node_modules").join("charts");
    fs::create_dir_all(&pkg_dir).unwrap();
    fs::write(
        pkg_dir.join("package.json"),
        r#"{ "bundles": { "refs": ["dist/charts.js"], "global": "Charts" } }"#,
    )
    .unwrap();

    let options = PluginOptions::new().with_node_modules_path(tmp.path().join("node_modules"));
    let plugin = BundlePlugin::new(options).unwrap();

    let resolved = plugin.resolve_id("charts", None).await.unwrap();
    let code = plugin.load(&resolved.id).unwrap();

    assert!(code.contains("export { default } from \"\0extern-bundle:charts\";"));
    assert_eq!(
        plugin.output_globals().get("\0extern-bundle:charts"),
        Some(&"Charts".to_string())
    );
}

#[tokio::test]
async fn test_load_of_real_module_yields_nothing() {
    let tmp = TempDir::new().unwrap();
    let options = PluginOptions::new().with_node_modules_path(tmp.path().join("node_modules"));
    let plugin = BundlePlugin::new(options).unwrap();

    assert!(plugin.load("src/main.js").is_none());
    assert!(plugin.load("\0bundle:unregistered").is_none());
}
