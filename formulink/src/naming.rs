//! Registry names for formulary functions
//!
//! A function's registry name is the symbol its documentation gives the
//! returned value (`omega_p` for `plasma_frequency`), else its short alias,
//! else its own identifier. Names that clash with the registry or with a
//! reserved identifier get the next value of a counter shared by the batch.

use crate::BridgeError;
use formulink_core::FunctionDescriptor;
use formulink_registry::is_reserved;

/// Monotonic suffix source shared by every name resolved in one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCounter {
    next: u64,
}

impl NameCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Value the next disambiguation will use
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Take the current value and move past it
    pub fn advance(&mut self) -> u64 {
        let value = self.next;
        self.next += 1;
        value
    }
}

impl Default for NameCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// What the "Returns" section of a docstring names
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReturnsName {
    Absent,
    Single(String),
    Multiple(String),
}

/// Lines following a numpydoc section header.
///
/// The header must be a line of its own, underlined by a dash rule. A word
/// that merely appears in prose does not open a section.
fn section<'d>(doc: &'d str, header: &str) -> Option<impl Iterator<Item = &'d str>> {
    let mut lines = doc.lines();
    loop {
        if lines.next()?.trim() != header {
            continue;
        }
        let mut rest = lines.clone();
        let rule = rest.next().map(str::trim).unwrap_or_default();
        if !rule.is_empty() && rule.chars().all(|c| c == '-') {
            return Some(rest);
        }
    }
}

/// Read the name line of the "Returns" section.
///
/// The section is laid out as a header, a dash rule, then `name : type`.
/// A layout too short to hold that line is treated as no section at all.
fn returns_name(doc: &str) -> ReturnsName {
    let Some(line) = section(doc, "Returns").and_then(|mut rest| rest.next()) else {
        return ReturnsName::Absent;
    };
    let head = line.split_once(':').map_or(line, |(head, _)| head);
    let name: String = head.chars().filter(|c| !c.is_whitespace()).collect();

    if name.is_empty() {
        ReturnsName::Absent
    } else if name.contains(',') {
        ReturnsName::Multiple(name)
    } else {
        ReturnsName::Single(name)
    }
}

/// First alias in the "Aliases" section, without its trailing marker.
///
/// `betaH_` becomes `beta_H`: a lowercase-to-uppercase step at the end is
/// split with an underscore.
fn alias_name(doc: &str) -> Option<String> {
    let listed = section(doc, "Aliases")?.map(str::trim).find(|line| !line.is_empty())?;
    let mut quoted = listed.split('`');
    quoted.next()?;
    let alias = quoted.next()?;

    let mut chars: Vec<char> = alias.chars().collect();
    chars.pop()?;
    let n = chars.len();
    if n >= 2 && chars[n - 2].is_lowercase() && chars[n - 1].is_uppercase() {
        chars.insert(n - 1, '_');
    }
    Some(chars.into_iter().collect())
}

/// ASCII letter or underscore, then letters, digits and underscores
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Candidate name for a function, before collision checks.
///
/// Fails only when the function returns several values.
pub fn derive_name(desc: &FunctionDescriptor, container_marker: &str) -> Result<String, BridgeError> {
    let mut name = match returns_name(&desc.doc) {
        ReturnsName::Multiple(returns) => {
            return Err(BridgeError::MultiValue { function: desc.name.clone(), returns });
        }
        ReturnsName::Single(name) if !name.contains(container_marker) && is_identifier(&name) => name,
        _ => String::new(),
    };

    if name.is_empty() {
        name = alias_name(&desc.doc).filter(|alias| is_identifier(alias)).unwrap_or_default();
    }
    if name.is_empty() || name.len() > desc.name.len() {
        name = desc.name.clone();
    }
    Ok(name)
}

/// Append counter values to `candidate` until it is free.
///
/// A dual-mode function occupies `name1` and `name2` as well, so those must
/// be free too.
pub fn disambiguate<F>(candidate: &str, dual: bool, counter: &mut NameCounter, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let clashes = |name: &str| {
        if is_reserved(name) || is_taken(name) {
            return true;
        }
        dual && ["1", "2"].iter().any(|suffix| is_taken(&format!("{}{}", name, suffix)))
    };

    let mut name = candidate.to_string();
    while clashes(&name) {
        name = format!("{}{}", candidate, counter.advance());
    }
    name
}

/// Collision-free registry name for a function
pub fn resolve_name<F>(
    desc: &FunctionDescriptor,
    counter: &mut NameCounter,
    container_marker: &str,
    is_taken: F,
) -> Result<String, BridgeError>
where
    F: Fn(&str) -> bool,
{
    let candidate = derive_name(desc, container_marker)?;
    Ok(disambiguate(&candidate, desc.is_dual_mode(), counter, is_taken))
}
