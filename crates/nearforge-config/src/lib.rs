//! Configuration system for nearforge.
//!
//! Load nearby selection configuration from TOML or YAML to control the
//! selection order, the self-exclusion policy and the index distribution
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use nearforge_config::{NearbyDistributionConfig, NearbySelectionConfig, SelectionOrder};
//!
//! let config = NearbySelectionConfig::from_toml_str(r#"
//!     selection_order = "random"
//!     random_seed = 7
//!
//!     [distribution]
//!     type = "parabolic"
//!     size_maximum = 40
//! "#).unwrap();
//!
//! assert_eq!(config.selection_order, SelectionOrder::Random);
//! assert!(config.discard_nearby_index_zero);
//! assert!(matches!(config.distribution, NearbyDistributionConfig::Parabolic(_)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use nearforge_config::NearbySelectionConfig;
//!
//! let config = NearbySelectionConfig::load("nearby.toml").unwrap_or_default();
//! assert!(config.is_random_selection());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Nearby value selection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NearbySelectionConfig {
    /// Order in which nearby values are selected.
    #[serde(default)]
    pub selection_order: SelectionOrder,

    /// Whether row position 0 (the origin itself) is never selected.
    #[serde(default = "default_discard_nearby_index_zero")]
    pub discard_nearby_index_zero: bool,

    /// Distribution used to draw row positions in random selection.
    #[serde(default)]
    pub distribution: NearbyDistributionConfig,

    /// Random seed for reproducible sampling.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_discard_nearby_index_zero() -> bool {
    true
}

impl Default for NearbySelectionConfig {
    fn default() -> Self {
        Self {
            selection_order: SelectionOrder::default(),
            discard_nearby_index_zero: default_discard_nearby_index_zero(),
            distribution: NearbyDistributionConfig::default(),
            random_seed: None,
        }
    }
}

impl NearbySelectionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the selection order.
    pub fn with_selection_order(mut self, selection_order: SelectionOrder) -> Self {
        self.selection_order = selection_order;
        self
    }

    /// Sets whether row position 0 is discarded.
    pub fn with_discard_nearby_index_zero(mut self, discard: bool) -> Self {
        self.discard_nearby_index_zero = discard;
        self
    }

    /// Sets the distribution.
    pub fn with_distribution(mut self, distribution: NearbyDistributionConfig) -> Self {
        self.distribution = distribution;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Returns true if the resolved selection order is random.
    pub fn is_random_selection(&self) -> bool {
        self.selection_order.resolve(SelectionOrder::Inherit) == SelectionOrder::Random
    }

    /// Checks parameter ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.distribution.validate()
    }
}

/// Defines the order in which nearby values are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Inherit the selection order from the parent configuration.
    ///
    /// If there is no parent, defaults to `Random`.
    #[default]
    Inherit,

    /// Walk each origin's row in distance order.
    Original,

    /// Draw row positions from the distribution, forever.
    Random,
}

impl SelectionOrder {
    /// Resolves the selection order by inheriting from a parent if necessary.
    ///
    /// The result is never `Inherit`.
    pub fn resolve(self, inherited: SelectionOrder) -> SelectionOrder {
        match self {
            SelectionOrder::Inherit => {
                if inherited == SelectionOrder::Inherit {
                    SelectionOrder::Random
                } else {
                    inherited
                }
            }
            other => other,
        }
    }
}

/// Distribution of row positions for random nearby selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NearbyDistributionConfig {
    /// Probability decreases linearly with the row position.
    Linear(LinearDistributionConfig),

    /// Probability decreases quadratically with the row position.
    Parabolic(ParabolicDistributionConfig),

    /// Uniform over a block of the nearest positions.
    Block(BlockDistributionConfig),
}

impl Default for NearbyDistributionConfig {
    fn default() -> Self {
        NearbyDistributionConfig::Linear(LinearDistributionConfig::default())
    }
}

impl NearbyDistributionConfig {
    /// Checks the distribution parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            NearbyDistributionConfig::Linear(c) => {
                validate_size_maximum("linear", c.size_maximum)
            }
            NearbyDistributionConfig::Parabolic(c) => {
                validate_size_maximum("parabolic", c.size_maximum)
            }
            NearbyDistributionConfig::Block(c) => c.validate(),
        }
    }
}

fn validate_size_maximum(kind: &str, size_maximum: Option<usize>) -> Result<(), ConfigError> {
    match size_maximum {
        Some(0) => Err(ConfigError::Invalid(format!(
            "the {kind} distribution's size_maximum (0) must be at least 1"
        ))),
        _ => Ok(()),
    }
}

/// Linear distribution configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LinearDistributionConfig {
    /// Only the nearest `size_maximum` positions can be drawn.
    pub size_maximum: Option<usize>,
}

/// Parabolic distribution configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ParabolicDistributionConfig {
    /// Only the nearest `size_maximum` positions can be drawn.
    pub size_maximum: Option<usize>,
}

/// Block distribution configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BlockDistributionConfig {
    /// Smallest block size, used when the ratio yields fewer positions.
    pub size_minimum: Option<usize>,

    /// Largest block size.
    pub size_maximum: Option<usize>,

    /// Share of the row that forms the block, in `(0, 1]`.
    pub size_ratio: Option<f64>,

    /// Probability of drawing uniformly from the whole row instead.
    pub uniform_distribution_probability: Option<f64>,
}

impl BlockDistributionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let minimum = self.size_minimum.unwrap_or(1);
        let maximum = self.size_maximum.unwrap_or(usize::MAX);
        if minimum < 1 {
            return Err(ConfigError::Invalid(format!(
                "the block distribution's size_minimum ({minimum}) must be at least 1"
            )));
        }
        if maximum < minimum {
            return Err(ConfigError::Invalid(format!(
                "the block distribution's size_maximum ({maximum}) must be at least size_minimum ({minimum})"
            )));
        }
        if let Some(ratio) = self.size_ratio {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "the block distribution's size_ratio ({ratio}) must be in (0, 1]"
                )));
            }
        }
        if let Some(p) = self.uniform_distribution_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "the block distribution's uniform_distribution_probability ({p}) must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}
