use crate::id::ModuleId;
use crate::registry::BundleDeclaration;

/// Produces the ES-module shim text standing in for a registered bundle.
///
/// The shim carries no logic, only import/export wiring against the
/// bundle's external placeholder module. A declaration without refs yields
/// no module at all, letting the host fail resolution by normal means.
pub fn synthesize(id: &str, decl: &BundleDeclaration) -> Option<String> {
    if decl.refs.is_empty() {
        return None;
    }

    let extern_id = ModuleId::Extern(id.to_string()).to_string();

    // Without a global the bundle is asset-only: a single side-effect
    // import contributing no bindings to the consuming module.
    if decl.global.is_none() {
        return Some(format!("import '{}';\n", extern_id));
    }

    let mut code = String::new();
    for import in &decl.imports {
        code.push_str(&format!("import '{}';\n", import));
    }

    code.push_str(&format!("export {{ default }} from \"{}\";\n", extern_id));
    if !decl.exports.is_empty() {
        let inner = decl.exports.join(", ");
        code.push_str(&format!("export {{ {} }} from \"{}\";\n", inner, extern_id));
    }

    Some(code)
}
