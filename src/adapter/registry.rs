// src/adapter/registry.rs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::adapter::LanguageAdapter;
use crate::adapter::languages::builtin_adapter;
use crate::config::EngineConfig;
use crate::errors::{ExeczoneError, Result};
use crate::types::Language;

/// Maps a language to the adapter that knows how to build and run it.
///
/// Adding a language means registering an adapter here; the runner and the
/// engine never branch on the language themselves.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<Language, Arc<dyn LanguageAdapter>>,
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

impl AdapterRegistry {
    /// Registry with no languages at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in language that `config` leaves enabled.
    pub fn with_builtins(config: &EngineConfig) -> Self {
        let mut registry = Self::empty();
        for language in Language::ALL {
            let settings = config.settings_for(language);
            if !settings.enabled {
                debug!(%language, "language disabled by config; not registering");
                continue;
            }
            registry.register(language, builtin_adapter(language, &settings));
        }
        registry
    }

    /// Register (or replace) the adapter for `language`.
    pub fn register(&mut self, language: Language, adapter: impl LanguageAdapter + 'static) {
        self.adapters.insert(language, Arc::new(adapter));
    }

    /// Look up the adapter for `language`.
    pub fn resolve(&self, language: Language) -> Result<Arc<dyn LanguageAdapter>> {
        self.adapters.get(&language).cloned().ok_or_else(|| {
            ExeczoneError::UnsupportedLanguage(format!("{language} is not supported"))
        })
    }

    /// Registered languages in a stable order.
    pub fn languages(&self) -> Vec<Language> {
        self.adapters.keys().copied().collect()
    }
}
