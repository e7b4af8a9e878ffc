//! Dataset identifier -> resampling strategy lookups

// standard library
use std::collections::HashMap;
use std::sync::OnceLock;

// crate modules
use crate::config::SamplerConfig;
use crate::grid::{GridSampler, ResamplingStrategy};
use crate::sampler::Sampler;

/// Function creating a fresh resampling strategy
pub type StrategyFactory = fn() -> Box<dyn ResamplingStrategy>;

/// Maps dataset identifiers to the strategy used to sample them
///
/// Any identifier without a registered strategy uses the [GridSampler]. Looking
/// up an unregistered identifier never adds it to the registry.
///
/// ```rust
/// # use quicklook_sampler::{GridSampler, SamplerRegistry};
/// let registry = SamplerRegistry::new();
/// let strategy = registry.lookup("anything")();
/// assert_eq!(strategy.name(), GridSampler::NAME);
/// assert!(!registry.is_registered("anything"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SamplerRegistry {
    entries: HashMap<String, StrategyFactory>,
}

impl SamplerRegistry {
    /// An empty registry, every lookup gives the default
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `factory` for datasets named `identifier`
    pub fn register(&mut self, identifier: impl Into<String>, factory: StrategyFactory) {
        self.entries.insert(identifier.into(), factory);
    }

    /// True if `identifier` has its own strategy
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Strategy factory for `identifier`, or the grid default
    pub fn lookup(&self, identifier: &str) -> StrategyFactory {
        self.entries
            .get(identifier)
            .copied()
            .unwrap_or(default_strategy)
    }

    /// Build a [Sampler] with the strategy registered for the configured dataset
    pub fn build(&self, config: SamplerConfig) -> Sampler {
        let strategy = self.lookup(&config.sample_name)();
        Sampler::new(config, strategy)
    }
}

fn default_strategy() -> Box<dyn ResamplingStrategy> {
    Box::new(GridSampler)
}

// Fixed at first use, nothing is registered by default
static SAMPLERS: OnceLock<SamplerRegistry> = OnceLock::new();

/// The process-wide registry used by [sample_a_ds()](crate::sample_a_ds)
pub fn samplers() -> &'static SamplerRegistry {
    SAMPLERS.get_or_init(SamplerRegistry::new)
}
