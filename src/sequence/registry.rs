//! Sequence registry for named sequence lookup.

use heapless::{FnvIndexMap, String};

use crate::config::{SequenceConfig, SystemConfig};
use crate::error::{short_name, Error, Result, SequenceError};

/// Maximum number of sequences in the registry.
pub const MAX_SEQUENCES: usize = 16;

/// Registry for named command sequences.
#[derive(Debug)]
pub struct SequenceRegistry {
    sequences: FnvIndexMap<String<32>, SequenceConfig, MAX_SEQUENCES>,
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sequences: FnvIndexMap::new(),
        }
    }

    /// Load every sequence of a SystemConfig.
    pub fn from_config(config: &SystemConfig) -> Self {
        let mut registry = Self::new();
        for (name, sequence) in &config.sequences {
            // Same capacity as SystemConfig, so this cannot fill up
            let _ = registry.sequences.insert(name.clone(), sequence.clone());
        }
        registry
    }

    /// Register a sequence with a name, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is full.
    pub fn register(&mut self, name: &str, sequence: SequenceConfig) -> Result<()> {
        self.sequences
            .insert(short_name(name), sequence)
            .map_err(|_| Error::Sequence(SequenceError::RegistryFull))?;
        Ok(())
    }

    /// Get a sequence by name.
    pub fn get(&self, name: &str) -> Option<&SequenceConfig> {
        let name_str = String::try_from(name).ok()?;
        self.sequences.get(&name_str)
    }

    /// Get a sequence by name, or a `NotFound` error.
    pub fn get_or_error(&self, name: &str) -> Result<&SequenceConfig> {
        self.get(name)
            .ok_or_else(|| Error::Sequence(SequenceError::NotFound(short_name(name))))
    }

    /// Check if a sequence exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a sequence by name.
    pub fn remove(&mut self, name: &str) -> Option<SequenceConfig> {
        let name_str = String::try_from(name).ok()?;
        self.sequences.remove(&name_str)
    }

    /// Get the number of registered sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Get an iterator over sequence names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(|s| s.as_str())
    }
}
