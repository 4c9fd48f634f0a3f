//! Batch import drivers
//!
//! Two ways in: every eligible function of the allow-listed modules, or an
//! explicit list of qualified names. Both run each function through the same
//! pipeline (name, units, wrap, insert) against one shared name counter. No
//! single failure stops a batch; each one becomes a `Diagnostic`.

use crate::config::BridgeConfig;
use crate::naming::{resolve_name, NameCounter};
use crate::resolve::arg_units;
use crate::wrap::{prepare_entries, PreparedEntry};
use crate::BridgeError;
use formulink_core::{Callable, SourceFunction, SourceLibrary};
use formulink_registry::{EntryMeta, Registry, RegistryError};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How much progress an import reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Start and finish only
    Quiet,
    /// Per-module progress
    #[default]
    Normal,
    /// Every registered entry
    Detailed,
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Detailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ModuleNotAllowed,
    Denied,
    ModuleMissing,
    FunctionMissing,
    MultiValue,
    NoArgUnits,
    InsertFailed,
}

impl From<&BridgeError> for DiagnosticKind {
    fn from(err: &BridgeError) -> Self {
        match err {
            BridgeError::ModuleNotAllowed { .. } => DiagnosticKind::ModuleNotAllowed,
            BridgeError::Denied { .. } => DiagnosticKind::Denied,
            BridgeError::ModuleMissing { .. } => DiagnosticKind::ModuleMissing,
            BridgeError::FunctionMissing { .. } => DiagnosticKind::FunctionMissing,
            BridgeError::MultiValue { .. } => DiagnosticKind::MultiValue,
            BridgeError::Insert { .. } => DiagnosticKind::InsertFailed,
        }
    }
}

/// A skipped function or a note about an imported one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Function (or module) the diagnostic is about
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, subject: subject.into(), message: message.into() }
    }

    pub fn from_error(subject: impl Into<String>, err: &BridgeError) -> Self {
        Self::new(DiagnosticKind::from(err), subject, err.to_string())
    }

    /// Whether the diagnostic means nothing was registered for its subject
    pub fn is_skip(&self) -> bool {
        self.kind != DiagnosticKind::NoArgUnits
    }
}

/// Outcome of one batch
#[derive(Debug)]
pub struct ImportReport {
    pub registry: Registry,
    /// Keys added by this batch, in insertion order
    pub imported: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ImportReport {
    pub fn skipped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_skip()).count()
    }
}

/// Imports functions of a source library into a registry
pub struct Importer<'a, L: SourceLibrary + ?Sized> {
    library: &'a L,
    config: BridgeConfig,
    verbosity: Verbosity,
}

impl<'a, L: SourceLibrary + ?Sized> Importer<'a, L> {
    pub fn new(library: &'a L) -> Self {
        Self {
            library,
            config: BridgeConfig::default(),
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Import every eligible function of every allow-listed module.
    ///
    /// Exports ending in the internal-copy marker are skipped silently;
    /// deny-listed names are skipped with a diagnostic.
    pub fn import_all(&self, registry: Option<Registry>) -> ImportReport {
        let mut batch = Batch::new(&self.config, self.verbosity, registry);
        info!(modules = self.config.modules.len(), "Importing formulary");

        for path in &self.config.modules {
            let Some(module) = self.library.module(path) else {
                batch.reject(path, BridgeError::ModuleMissing { module: path.clone() });
                continue;
            };
            if self.verbosity >= Verbosity::Normal {
                info!(module = %path, "Importing module");
            }

            for name in module.exports() {
                if self.config.is_internal_copy(name) {
                    debug!(module = %path, function = name, "Skipping internal copy");
                    continue;
                }
                if self.config.denies(name) {
                    batch.reject(name, BridgeError::Denied { function: name.to_string() });
                    continue;
                }
                match module.get(name) {
                    Some(function) => batch.import_function(function),
                    None => batch.reject(name, BridgeError::FunctionMissing {
                        module: path.clone(),
                        function: name.to_string(),
                    }),
                }
            }
        }

        batch.finish()
    }

    /// Import the named functions, each given as `module.path.function`.
    ///
    /// A name without a dot is taken as both module and function, which
    /// no allow-list accepts.
    pub fn import_list<S: AsRef<str>>(&self, names: &[S], registry: Option<Registry>) -> ImportReport {
        let mut batch = Batch::new(&self.config, self.verbosity, registry);
        info!(functions = names.len(), "Importing selected functions");

        for qualified in names {
            let qualified = qualified.as_ref();
            let (path, name) = qualified.rsplit_once('.').unwrap_or((qualified, qualified));

            if !self.config.allows_module(path) {
                batch.reject(qualified, BridgeError::ModuleNotAllowed { module: path.to_string() });
                continue;
            }
            if self.config.denies(name) {
                batch.reject(qualified, BridgeError::Denied { function: name.to_string() });
                continue;
            }
            let Some(module) = self.library.module(path) else {
                batch.reject(qualified, BridgeError::ModuleMissing { module: path.to_string() });
                continue;
            };
            match module.get(name) {
                Some(function) => batch.import_function(function),
                None => batch.reject(qualified, BridgeError::FunctionMissing {
                    module: path.to_string(),
                    function: name.to_string(),
                }),
            }
        }

        batch.finish()
    }

    /// Import a single qualified function name
    pub fn import_one(&self, qualified: &str, registry: Option<Registry>) -> ImportReport {
        self.import_list(&[qualified], registry)
    }
}

/// State of one running batch
struct Batch<'c> {
    config: &'c BridgeConfig,
    verbosity: Verbosity,
    registry: Registry,
    counter: NameCounter,
    claimed: HashSet<String>,
    imported: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> Batch<'c> {
    fn new(config: &'c BridgeConfig, verbosity: Verbosity, registry: Option<Registry>) -> Self {
        Self {
            config,
            verbosity,
            registry: registry.unwrap_or_default(),
            counter: NameCounter::new(),
            claimed: HashSet::new(),
            imported: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn reject(&mut self, subject: &str, err: BridgeError) {
        warn!(subject, "{}", err);
        self.diagnostics.push(Diagnostic::from_error(subject, &err));
    }

    fn import_function(&mut self, function: &Arc<SourceFunction>) {
        let desc = function.descriptor();

        let registry = &self.registry;
        let claimed = &self.claimed;
        let resolved = resolve_name(desc, &mut self.counter, &self.config.container_marker, |name| {
            registry.contains_key(name) || claimed.contains(name)
        });
        let key = match resolved {
            Ok(key) => key,
            Err(err) => {
                self.reject(&desc.name, err);
                return;
            }
        };
        self.claimed.insert(key.clone());

        let units = arg_units(desc);
        if units.is_empty() {
            let message = format!("{} has no arguments to annotate", desc.name);
            warn!(function = %desc.name, "{}", message);
            self.diagnostics.push(Diagnostic::new(DiagnosticKind::NoArgUnits, &desc.name, message));
        }

        let callable: Arc<dyn Callable> = function.clone();
        let entries = prepare_entries(callable, desc, &key, &units, &self.config.citation);
        match insert_all(&mut self.registry, &desc.name, entries) {
            Ok(keys) => {
                for key in keys {
                    if self.verbosity >= Verbosity::Detailed {
                        let output = self.registry.get(&key).map(|e| e.meta().units.as_str()).unwrap_or_default();
                        debug!(function = %desc.name, key = %key, units = output, "Registered");
                    }
                    self.imported.push(key);
                }
            }
            Err(err) => self.reject(&desc.name, err),
        }
    }

    fn finish(self) -> ImportReport {
        let report = ImportReport {
            registry: self.registry,
            imported: self.imported,
            diagnostics: self.diagnostics,
        };
        info!(imported = report.imported.len(), skipped = report.skipped(), "Done");
        report
    }
}

/// Insert all entries of one function, or none of them
fn insert_all(registry: &mut Registry, function: &str, entries: Vec<PreparedEntry>) -> Result<Vec<String>, BridgeError> {
    let insert_error = |key: &str, meta: &EntryMeta, source: RegistryError| BridgeError::Insert {
        function: function.to_string(),
        key: key.to_string(),
        units: meta.units.clone(),
        arg_units: meta.arg_units.clone(),
        source,
    };

    for entry in &entries {
        registry
            .check(&entry.key, entry.callable.as_ref(), &entry.meta)
            .map_err(|source| insert_error(&entry.key, &entry.meta, source))?;
    }

    let mut keys = Vec::with_capacity(entries.len());
    for PreparedEntry { key, callable, meta } in entries {
        let checked = meta.clone();
        registry
            .insert(&key, callable, meta)
            .map_err(|source| insert_error(&key, &checked, source))?;
        keys.push(key);
    }
    Ok(keys)
}

/// Import every eligible function with the default configuration
pub fn import_all<L: SourceLibrary + ?Sized>(
    library: &L,
    verbosity: Verbosity,
    registry: Option<Registry>,
) -> Registry {
    Importer::new(library).with_verbosity(verbosity).import_all(registry).registry
}

/// Import the named functions with the default configuration
pub fn import_list<L: SourceLibrary + ?Sized, S: AsRef<str>>(
    library: &L,
    names: &[S],
    verbosity: Verbosity,
    registry: Option<Registry>,
) -> Registry {
    Importer::new(library).with_verbosity(verbosity).import_list(names, registry).registry
}
