//! # Provider Registry
//!
//! Ordered, immutable set of configured providers.
//!
//! Registration order matters: it is the order providers are queried in,
//! the tie-break order for equally priced quotes, and the order of
//! [`ProviderRegistry::eligible`].

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::value_objects::{Corridor, ProviderName};
use crate::infrastructure::providers::traits::RemittanceProvider;
use std::collections::HashSet;
use std::sync::Arc;

/// Returns true if `provider` can serve at least one end of `corridor`.
///
/// A provider is eligible when it supports the source or target currency
/// and the source or target country.
#[must_use]
pub fn is_eligible(provider: &dyn RemittanceProvider, corridor: &Corridor) -> bool {
    let currencies = provider.supported_currencies();
    let countries = provider.supported_countries();

    let currency_ok = currencies.contains(&corridor.source_currency())
        || currencies.contains(&corridor.target_currency());
    let country_ok = countries.contains(corridor.source_country())
        || countries.contains(corridor.target_country());

    currency_ok && country_ok
}

/// Registered providers in registration order.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn RemittanceProvider>>,
}

impl ProviderRegistry {
    /// Creates a registry from already-configured providers.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::DuplicateProvider` if two providers share
    /// a name.
    pub fn new(providers: Vec<Arc<dyn RemittanceProvider>>) -> ApplicationResult<Self> {
        let mut seen = HashSet::with_capacity(providers.len());
        for provider in &providers {
            if !seen.insert(provider.name().clone()) {
                return Err(ApplicationError::DuplicateProvider(provider.name().clone()));
            }
        }

        tracing::debug!(providers = providers.len(), "provider registry initialized");
        Ok(Self { providers })
    }

    /// Providers eligible for `corridor`, in registration order.
    #[must_use]
    pub fn eligible(&self, corridor: &Corridor) -> Vec<Arc<dyn RemittanceProvider>> {
        self.providers
            .iter()
            .filter(|p| is_eligible(p.as_ref(), corridor))
            .cloned()
            .collect()
    }

    /// Looks up a provider by exact name.
    #[must_use]
    pub fn find(&self, name: &ProviderName) -> Option<&Arc<dyn RemittanceProvider>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    /// Names of every registered provider.
    #[must_use]
    pub fn names(&self) -> Vec<&ProviderName> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Iterates over the providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RemittanceProvider>> {
        self.providers.iter()
    }

    /// Returns the number of registered providers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
