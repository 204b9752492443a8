//! Provider abstraction.
//!
//! # Responsibilities
//! - Represent a single upstream DoH resolver with its selection weight
//! - Hold the ordered, immutable provider list a pool draws from
//! - Enforce list invariants at construction: non-empty, positive weights,
//!   unique URLs (failover excludes the failed provider by URL)

use url::Url;

use crate::config::ProviderConfig;

/// Errors raised while building providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider list is empty")]
    Empty,

    #[error("provider '{name}' has weight 0; weights must be positive")]
    ZeroWeight { name: String },

    #[error("provider '{name}' has invalid url '{url}': {source}")]
    InvalidUrl {
        name: String,
        url: String,
        source: url::ParseError,
    },

    #[error("provider '{name}' uses unsupported scheme '{scheme}'")]
    UnsupportedScheme { name: String, scheme: String },

    #[error("duplicate provider url '{url}'")]
    DuplicateUrl { url: String },
}

/// A single upstream DoH endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Display name used in logs.
    pub name: String,
    /// Absolute endpoint URL; the inbound query string is appended to it.
    pub url: Url,
    /// Relative selection weight, always positive.
    pub weight: u32,
}

impl Provider {
    /// Create a provider, validating its URL and weight.
    pub fn new(name: impl Into<String>, url: &str, weight: u32) -> Result<Self, ProviderError> {
        let name = name.into();

        if weight == 0 {
            return Err(ProviderError::ZeroWeight { name });
        }

        let parsed = Url::parse(url).map_err(|source| ProviderError::InvalidUrl {
            name: name.clone(),
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "https" | "http" => {}
            other => {
                return Err(ProviderError::UnsupportedScheme {
                    name,
                    scheme: other.to_string(),
                })
            }
        }

        Ok(Self {
            name,
            url: parsed,
            weight,
        })
    }
}

/// An ordered, non-empty list of providers.
///
/// Order only matters for failover: the sweep tries providers first-to-last.
#[derive(Debug, Clone)]
pub struct ProviderList {
    providers: Vec<Provider>,
}

impl ProviderList {
    /// Build a list, asserting the invariants the selector and sweep rely on.
    pub fn new(providers: Vec<Provider>) -> Result<Self, ProviderError> {
        if providers.is_empty() {
            return Err(ProviderError::Empty);
        }

        for (i, provider) in providers.iter().enumerate() {
            if providers[..i].iter().any(|p| p.url == provider.url) {
                return Err(ProviderError::DuplicateUrl {
                    url: provider.url.to_string(),
                });
            }
        }

        Ok(Self { providers })
    }

    /// Build a list from configuration entries.
    pub fn from_configs(configs: &[ProviderConfig]) -> Result<Self, ProviderError> {
        let providers = configs
            .iter()
            .map(|c| Provider::new(c.name.clone(), &c.url, c.weight))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(providers)
    }

    /// Iterate providers in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, Provider> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The first provider in list order.
    pub fn first(&self) -> &Provider {
        &self.providers[0]
    }

    /// Sum of all weights. Positive for every constructed list.
    pub fn total_weight(&self) -> u64 {
        self.providers.iter().map(|p| u64::from(p.weight)).sum()
    }

    /// Every provider except `excluded`, in original order.
    pub fn others<'a>(&'a self, excluded: &'a Provider) -> impl Iterator<Item = &'a Provider> + 'a {
        self.providers.iter().filter(move |p| p.url != excluded.url)
    }
}

impl<'a> IntoIterator for &'a ProviderList {
    type Item = &'a Provider;
    type IntoIter = std::slice::Iter<'a, Provider>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}
