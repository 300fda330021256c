#![forbid(unsafe_code)]

//! Registry configuration.

/// Environment variable overriding [`RegistryConfig::prune_every`].
pub const PRUNE_EVERY_ENV: &str = "COMPANION_PRUNE_EVERY";

/// Configuration for an [`InstanceRegistry`](crate::InstanceRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Sweep reclaimed instances after this many new instance entries
    /// (0 = never sweep automatically).
    pub prune_every: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { prune_every: 64 }
    }
}

impl RegistryConfig {
    /// Set the automatic sweep cadence.
    #[must_use]
    pub fn with_prune_every(mut self, prune_every: usize) -> Self {
        self.prune_every = prune_every;
        self
    }

    /// Disable automatic sweeps; callers prune explicitly.
    #[must_use]
    pub fn manual() -> Self {
        Self { prune_every: 0 }
    }

    /// Read overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable lookup.
    ///
    /// Unparseable values fall back to the default.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(n) = get_env(PRUNE_EVERY_ENV).and_then(|v| v.trim().parse::<usize>().ok()) {
            config.prune_every = n;
        }
        config
    }
}
