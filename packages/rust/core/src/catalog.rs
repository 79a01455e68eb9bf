//! Named converter factories for assembling a registry from configuration.

use std::collections::HashMap;
use std::fmt;

use customsplit_shared::{RegistryConfig, Result, SplitConversionError};
use tracing::info;

use crate::converter::CustomSplitConverter;
use crate::registry::ConverterRegistry;

type ConverterFactory = Box<dyn Fn() -> Box<dyn CustomSplitConverter> + Send + Sync>;

/// The converters an application knows how to build, keyed by config name.
///
/// Which of them are active, and in what order, comes from [`RegistryConfig`].
#[derive(Default)]
pub struct ConverterCatalog {
    factories: HashMap<String, ConverterFactory>,
}

impl ConverterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<F, C>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: CustomSplitConverter + 'static,
    {
        self.factories.insert(
            name.into(),
            Box::new(move || -> Box<dyn CustomSplitConverter> { Box::new(factory()) }),
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the configured converters in configured order.
    pub fn build_registry(&self, config: &RegistryConfig) -> Result<ConverterRegistry> {
        config.validate()?;

        let mut builder = ConverterRegistry::builder().unclaimed_info(config.unclaimed_info);
        for name in &config.converters {
            let factory = self
                .factories
                .get(name)
                .ok_or_else(|| SplitConversionError::UnknownConverter { name: name.clone() })?;
            builder = builder.register_boxed(factory());
        }

        let registry = builder.build();
        info!(
            converters = ?registry.converter_names(),
            unclaimed_info = ?registry.unclaimed_info_policy(),
            "converter registry assembled"
        );
        Ok(registry)
    }
}

impl fmt::Debug for ConverterCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterCatalog")
            .field("names", &self.names())
            .finish()
    }
}
