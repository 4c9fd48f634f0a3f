//! Registry of unit-annotated callables

use crate::{Entry, EntryMeta, RegistryError};
use formulink_core::{CallError, Callable, Value};
use formulink_units::validate_target;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Keyed store of callables with their unit metadata.
///
/// Entries are never replaced: a second insertion under the same key fails.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a callable after checking its key and units
    pub fn insert(&mut self, key: &str, callable: Arc<dyn Callable>, meta: EntryMeta) -> Result<(), RegistryError> {
        self.check(key, callable.as_ref(), &meta)?;
        self.entries.insert(key.to_string(), Entry { callable, meta });
        Ok(())
    }

    /// Whether `insert` would accept the entry. Nothing is stored.
    pub fn check(&self, key: &str, callable: &dyn Callable, meta: &EntryMeta) -> Result<(), RegistryError> {
        if !is_identifier(key) {
            return Err(RegistryError::InvalidKey(key.to_string()));
        }
        if self.entries.contains_key(key) {
            return Err(RegistryError::DuplicateKey(key.to_string()));
        }

        validate_target(&meta.units).map_err(|source| RegistryError::InvalidUnits {
            key: key.to_string(),
            units: meta.units.clone(),
            source,
        })?;

        let exposed: HashSet<&str> = callable.params().iter().map(|p| p.name.as_str()).collect();
        for (arg, units) in &meta.arg_units {
            if !exposed.contains(arg.as_str()) && !meta.is_hidden(arg) {
                return Err(RegistryError::UnknownArgument { key: key.to_string(), arg: arg.clone() });
            }
            validate_target(units).map_err(|source| RegistryError::InvalidArgUnits {
                key: key.to_string(),
                arg: arg.clone(),
                units: units.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke a registered callable
    pub fn call(&self, key: &str, args: &[Value]) -> Value {
        match self.entries.get(key) {
            Some(entry) => entry.call(args),
            None => {
                let similar = self.find_similar(key);
                let mut err = CallError::undefined_func(key);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use list for the full set.",
                        suggestions.join(", ")
                    ));
                }
                Value::Error(err)
            }
        }
    }

    /// Keys similar to the given name, best match first
    fn find_similar(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.entries.keys()
            .filter_map(|key| {
                let score = Self::similarity_score(&name_lower, &key.to_lowercase());
                (score > 0).then(|| (key.clone(), score))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Score a key against a lowercased query.
    ///
    /// Keys are compared without their counter suffix, so `omega_p` finds
    /// `omega_p1` and `omega_p2` first. Shared `_`-separated parts of a
    /// symbol (`lambda` in `lambda_D` and `lambda_TF`) count as partial hits.
    fn similarity_score(query: &str, candidate: &str) -> usize {
        let stem = candidate.trim_end_matches(|c: char| c.is_ascii_digit());
        if stem.is_empty() || query.is_empty() {
            return 0;
        }

        let mut score = if stem == query {
            200
        } else if candidate.starts_with(query) {
            100
        } else if candidate.contains(query) {
            50
        } else if query.contains(stem) {
            30
        } else {
            0
        };

        let parts: HashSet<&str> = stem.split('_').filter(|p| !p.is_empty()).collect();
        score += query.split('_').filter(|p| parts.contains(p)).count() * 20;
        score
    }

    /// One summary line per entry
    pub fn list(&self) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = self.entries.iter()
            .map(|(key, entry)| json!({
                "name": key,
                "args": entry.arg_names(),
                "units": entry.meta.units,
            }))
            .collect();
        json!({ "count": entries.len(), "functions": entries })
    }

    /// Full metadata of one entry
    pub fn describe(&self, key: &str) -> Option<serde_json::Value> {
        let entry = self.entries.get(key)?;
        let args: Vec<serde_json::Value> = entry.params().iter()
            .map(|p| json!({
                "name": p.name,
                "units": entry.meta.arg_units.get(&p.name),
                "default": p.default,
            }))
            .collect();
        Some(json!({
            "name": key,
            "function": entry.callable.name(),
            "args": args,
            "meta": entry.meta,
        }))
    }
}

/// ASCII letter or underscore first, then letters, digits and underscores
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
