use std::collections::BTreeSet;
use std::path::Path;

use crate::io::{self, IoError};

/// Looks up the canonical spelling of a documented name.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

impl<F> NameResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// The set of names that can be cross-referenced, usually the stems of the
/// source files in a toolbox.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameRegistry {
    names: BTreeSet<String>,
}

impl NameRegistry {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Collects the file stems of every source file below `root`.
    pub fn scan(root: &Path) -> Result<Self, IoError> {
        let files = io::scan_source_files(root)?;
        let registry = Self::from_names(
            files
                .iter()
                .filter_map(|f| f.file_stem())
                .map(|s| s.to_string_lossy().into_owned()),
        );
        log::debug!("registry: {} names under {}", registry.len(), root.display());
        Ok(registry)
    }

    pub fn extend(&mut self, other: NameRegistry) {
        self.names.extend(other.names);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameResolver for NameRegistry {
    /// Exact match first, then the lowercase spelling, then any spelling that
    /// differs only in case.
    fn resolve(&self, name: &str) -> Option<String> {
        if self.names.contains(name) {
            return Some(name.to_string());
        }
        let lower = name.to_lowercase();
        if self.names.contains(&lower) {
            return Some(lower);
        }
        self.names
            .iter()
            .find(|n| n.to_lowercase() == lower)
            .cloned()
    }
}
