//! Formulink Formulary
//!
//! A plasma physics formulary whose functions carry unit annotations and
//! numpydoc-style documentation. Modules are addressed by dotted paths under
//! `plasma.formulary`; each exports its functions followed by short aliases
//! ending in `_`.

mod args;
pub mod constants;
pub mod functions;
pub mod particles;

use formulink_core::{SourceLibrary, SourceModule};

pub use particles::Particle;

/// A set of source modules keyed by path
#[derive(Debug, Clone, Default)]
pub struct Formulary {
    modules: Vec<SourceModule>,
}

impl Formulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every module of the built-in formulary
    pub fn standard() -> Self {
        Self::new()
            .with_module(functions::collisions::module())
            .with_module(functions::dimensionless::module())
            .with_module(functions::ionization::module())
            .with_module(functions::parameters::module())
            .with_module(functions::quantum::module())
            .with_module(functions::relativity::module())
            .with_module(functions::mathematics::module())
    }

    /// Add a module, replacing one with the same path
    pub fn with_module(mut self, module: SourceModule) -> Self {
        self.modules.retain(|m| m.path() != module.path());
        self.modules.push(module);
        self
    }
}

impl SourceLibrary for Formulary {
    fn module(&self, path: &str) -> Option<&SourceModule> {
        self.modules.iter().find(|m| m.path() == path)
    }

    fn modules(&self) -> Vec<&SourceModule> {
        self.modules.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_modules() {
        let lib = Formulary::standard();
        assert_eq!(lib.modules().len(), 7);
        assert!(lib.module("plasma.formulary.parameters").is_some());
        assert!(lib.module("plasma.formulary.magnetostatics").is_none());
    }

    #[test]
    fn test_aliases_follow_canonical_names() {
        let lib = Formulary::standard();
        for module in lib.modules() {
            for name in module.exports() {
                let f = module.get(name).unwrap();
                if let Some(canonical) = name.strip_suffix('_') {
                    assert_ne!(f.descriptor().name, canonical, "{} should be an alias", name);
                } else {
                    assert_eq!(f.descriptor().name, name);
                }
            }
        }
    }

    #[test]
    fn test_every_function_is_documented() {
        let lib = Formulary::standard();
        for module in lib.modules() {
            for name in module.exports().filter(|n| !n.ends_with('_')) {
                let doc = &module.get(name).unwrap().descriptor().doc;
                assert!(doc.contains("Returns"), "{} lacks a Returns section", name);
            }
        }
    }

    #[test]
    fn test_with_module_replaces_same_path() {
        let lib = Formulary::standard().with_module(SourceModule::new("plasma.formulary.quantum"));
        assert_eq!(lib.modules().len(), 7);
        assert_eq!(lib.module("plasma.formulary.quantum").unwrap().exports().count(), 0);
    }
}
