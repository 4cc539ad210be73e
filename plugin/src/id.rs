use std::fmt;

const BUNDLE_PREFIX: &str = "\0bundle:";
const EXTERN_PREFIX: &str = "\0extern-bundle:";

/// Module identifier namespace shared with the host bundler.
///
/// Synthetic ids are namespaced with a private `\0` prefix so the host never
/// confuses them with real file paths. `parse` and `Display` round-trip
/// through the host-facing string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleId {
    /// A plain specifier or file path owned by the host.
    Real(String),
    /// A virtual bundle module backed by synthesized shim source.
    Bundle(String),
    /// The external placeholder standing in for a bundle's prebuilt output.
    Extern(String),
}

impl ModuleId {
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix(BUNDLE_PREFIX) {
            ModuleId::Bundle(rest.to_string())
        } else if let Some(rest) = raw.strip_prefix(EXTERN_PREFIX) {
            ModuleId::Extern(rest.to_string())
        } else {
            ModuleId::Real(raw.to_string())
        }
    }

    /// The un-namespaced module name.
    pub fn name(&self) -> &str {
        match self {
            ModuleId::Real(name) | ModuleId::Bundle(name) | ModuleId::Extern(name) => name,
        }
    }

    /// External placeholder id for the same bundle.
    pub fn to_extern(&self) -> ModuleId {
        ModuleId::Extern(self.name().to_string())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleId::Real(name) => write!(f, "{}", name),
            ModuleId::Bundle(name) => write!(f, "{}{}", BUNDLE_PREFIX, name),
            ModuleId::Extern(name) => write!(f, "{}{}", EXTERN_PREFIX, name),
        }
    }
}
