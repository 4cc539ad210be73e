use bindle_plugin::package::PackageCache;
use bindle_plugin::{BundlePlugin, PluginOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_package(root: &Path, name: &str, manifest: &str) -> PathBuf {
    let pkg_dir = root.join("node_modules").join(name);
    fs::create_dir_all(&pkg_dir).unwrap();
    fs::write(pkg_dir.join("package.json"), manifest).unwrap();
    pkg_dir
}

fn plugin_for(root: &Path) -> BundlePlugin {
    let options = PluginOptions::new().with_node_modules_path(root.join("node_modules"));
    BundlePlugin::new(options).unwrap()
}

#[tokio::test]
async fn test_resolves_bundle_specifier() {
    let tmp = TempDir::new().unwrap();
    write_package(
        tmp.path(),
        "widgets",
        r#"{ "name": "widgets", "bundles": { "refs": ["dist/widgets.js"] } }"#,
    );

    let plugin = plugin_for(tmp.path());
    let resolved = plugin.resolve_id("widgets", None).await.unwrap();

    assert_eq!(resolved.id, "\0bundle:widgets");
    assert!(!resolved.external);
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_package(
        tmp.path(),
        "widgets",
        r#"{ "bundles": { "refs": ["dist/widgets.js"] } }"#,
    );

    let plugin = plugin_for(tmp.path());
    let first = plugin.resolve_id("widgets", None).await.unwrap();
    let second = plugin.resolve_id("widgets", Some("src/main.js")).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_extern_id_resolves_external() {
    let tmp = TempDir::new().unwrap();
    let plugin = plugin_for(tmp.path());

    let resolved = plugin
        .resolve_id("\0extern-bundle:widgets", Some("src/main.js"))
        .await
        .unwrap();

    assert_eq!(resolved.id, "\0extern-bundle:widgets");
    assert!(resolved.external);
}

#[tokio::test]
async fn test_missing_package_is_not_a_bundle() {
    let tmp = TempDir::new().unwrap();
    let plugin = plugin_for(tmp.path());

    assert!(plugin.resolve_id("nonexistent", None).await.is_none());
}

#[tokio::test]
async fn test_malformed_manifest_is_not_a_bundle() {
    let tmp = TempDir::new().unwrap();
    write_package(tmp.path(), "broken", "{ not json ");

    let plugin = plugin_for(tmp.path());

    assert!(plugin.resolve_id("broken", None).await.is_none());
}

#[tokio::test]
async fn test_accepts_bundle_field_alias() {
    let tmp = TempDir::new().unwrap();
    write_package(
        tmp.path(),
        "aliased",
        r#"{ "bundle": { "refs": ["dist/aliased.js"] } }"#,
    );

    let plugin = plugin_for(tmp.path());
    let resolved = plugin.resolve_id("aliased", None).await.unwrap();

    assert_eq!(resolved.id, "\0bundle:aliased");
}

#[tokio::test]
async fn test_array_bundle_field_is_not_a_bundle() {
    let tmp = TempDir::new().unwrap();
    write_package(tmp.path(), "arrayish", r#"{ "bundles": ["dist/a.js"] }"#);

    let plugin = plugin_for(tmp.path());

    assert!(plugin.resolve_id("arrayish", None).await.is_none());
}

#[tokio::test]
async fn test_declaration_without_refs_is_not_a_bundle() {
    let tmp = TempDir::new().unwrap();
    write_package(
        tmp.path(),
        "norefs",
        r#"{ "bundles": { "global": "NoRefs" } }"#,
    );
    write_package(tmp.path(), "emptyrefs", r#"{ "bundles": { "refs": [] } }"#);

    let plugin = plugin_for(tmp.path());

    assert!(plugin.resolve_id("norefs", None).await.is_none());
    assert!(plugin.resolve_id("emptyrefs", None).await.is_none());
}

#[tokio::test]
async fn test_relative_specifier_resolves_against_importer() {
    let tmp = TempDir::new().unwrap();
    let widget_dir = tmp.path().join("vendor").join("widget");
    fs::create_dir_all(&widget_dir).unwrap();
    fs::write(
        widget_dir.join("package.json"),
        r#"{ "bundles": { "refs": ["dist/widget.js"] } }"#,
    )
    .unwrap();

    let plugin = plugin_for(tmp.path());
    let importer = tmp.path().join("vendor").join("main.js");
    let resolved = plugin
        .resolve_id("./widget", Some(importer.to_str().unwrap()))
        .await
        .unwrap();

    let expected = widget_dir.to_str().unwrap().replace('\\', "/");
    assert_eq!(resolved.id, format!("\0bundle:{}", expected));
}

#[tokio::test]
async fn test_package_lookup_is_memoized() {
    let tmp = TempDir::new().unwrap();
    let pkg_dir = write_package(tmp.path(), "stable", r#"{ "name": "stable" }"#);

    let cache = PackageCache::new(tmp.path().join("node_modules"));
    let first = cache.lookup("stable", None).await.unwrap();

    // Later disk changes must not be observed within one session.
    fs::write(pkg_dir.join("package.json"), "{ garbage ").unwrap();
    let second = cache.lookup("stable", None).await.unwrap();

    assert_eq!(first.manifest, second.manifest);
    assert_eq!(first.root, second.root);
}
