// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Strategy registry.
//!
//! Maps strategy names to shared [`Strategy`] instances and resolves a
//! [`RetryPolicy`] into the ordered list a session consults. Registration
//! order is priority order for automatic selection.
//!
//! The process-wide registry is set at most once, before the first call to
//! [`StrategyRegistry::global`], and is read-only afterwards.

use crate::command::program_basename;
use crate::strategy::{AlwaysRetry, PatternStrategy, Strategy, TimeoutRetry};
use crate::{ConfigError, RetryPolicy};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<StrategyRegistry> = OnceLock::new();

/// Immutable name → strategy mapping.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding the built-in strategies: `network`, `timeout`, `always`.
    pub fn builtin() -> Self {
        Self {
            strategies: builtin_strategies(),
        }
    }

    /// The process-wide registry, holding the built-ins unless
    /// [`install_global`](Self::install_global) ran first.
    pub fn global() -> &'static StrategyRegistry {
        get_or_builtin(&GLOBAL)
    }

    /// Install the process-wide registry. Only succeeds before anything has
    /// read or installed it.
    pub fn install_global(registry: StrategyRegistry) -> Result<(), ConfigError> {
        install(&GLOBAL, registry)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Strategy>> {
        self.strategies.iter().find(|s| s.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Strategy>> {
        self.strategies.iter()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Resolve `policy` for a run of `program`.
    ///
    /// - `Disabled` resolves to nothing.
    /// - `Auto` picks every strategy applicable to the program's basename, in
    ///   registry order. Finding none is not an error.
    /// - `Named` looks up each name; any unknown name fails the whole
    ///   resolution. Repeated names are resolved once.
    pub fn resolve(
        &self,
        policy: &RetryPolicy,
        program: &str,
    ) -> Result<Vec<Arc<dyn Strategy>>, ConfigError> {
        match policy {
            RetryPolicy::Disabled => Ok(Vec::new()),
            RetryPolicy::Auto => {
                let basename = program_basename(program);
                let picked: Vec<_> = self
                    .strategies
                    .iter()
                    .filter(|s| s.applies_to(basename))
                    .cloned()
                    .collect();
                tracing::debug!(
                    basename,
                    strategies = ?picked.iter().map(|s| s.name()).collect::<Vec<_>>(),
                    "auto-selected retry strategies"
                );
                Ok(picked)
            }
            RetryPolicy::Named(names) => {
                let mut resolved: Vec<Arc<dyn Strategy>> = Vec::with_capacity(names.len());
                for name in names {
                    let strategy = self
                        .get(name)
                        .ok_or_else(|| ConfigError::UnknownStrategy { name: name.clone() })?;
                    if !resolved.iter().any(|s| s.name() == name) {
                        resolved.push(Arc::clone(strategy));
                    }
                }
                Ok(resolved)
            }
        }
    }
}

fn get_or_builtin(cell: &OnceLock<StrategyRegistry>) -> &StrategyRegistry {
    cell.get_or_init(StrategyRegistry::builtin)
}

fn install(
    cell: &OnceLock<StrategyRegistry>,
    registry: StrategyRegistry,
) -> Result<(), ConfigError> {
    cell.set(registry)
        .map_err(|_| ConfigError::RegistryInitialized)
}

fn builtin_strategies() -> Vec<Arc<dyn Strategy>> {
    vec![
        Arc::new(PatternStrategy::network()),
        Arc::new(TimeoutRetry),
        Arc::new(AlwaysRetry),
    ]
}

/// Collects strategies before freezing them into a [`StrategyRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl RegistryBuilder {
    /// Start from the built-in strategies.
    pub fn with_builtins(mut self) -> Self {
        self.strategies = builtin_strategies();
        self
    }

    /// Add a strategy. Names must be unique.
    pub fn register(mut self, strategy: impl Strategy + 'static) -> Result<Self, ConfigError> {
        if self.strategies.iter().any(|s| s.name() == strategy.name()) {
            return Err(ConfigError::DuplicateStrategy(strategy.name().to_string()));
        }
        self.strategies.push(Arc::new(strategy));
        Ok(self)
    }

    pub fn build(self) -> StrategyRegistry {
        StrategyRegistry {
            strategies: self.strategies,
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
