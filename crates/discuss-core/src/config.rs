//! Configuration management for discuss

use serde::{Deserialize, Serialize};

/// Main store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Reaction and flag kind enumerations
    pub kinds: KindConfig,
    /// Content pipeline settings
    pub content: ContentConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kinds: KindConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

/// Closed enumerations of reaction and flag kinds
///
/// Adjustable per deployment, closed at runtime: a kind outside these lists
/// is rejected by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KindConfig {
    /// Allowed reaction kinds
    pub reactions: Vec<String>,
    /// Allowed flag kinds
    pub flags: Vec<String>,
}

impl Default for KindConfig {
    fn default() -> Self {
        Self {
            reactions: vec![
                "like".to_string(),
                "love".to_string(),
                "laugh".to_string(),
            ],
            flags: vec![
                "spam".to_string(),
                "hoax".to_string(),
                "bullying".to_string(),
            ],
        }
    }
}

/// Content pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Maximum comment content length
    pub max_length: usize,
    /// Words replaced by the profanity filter
    pub censored_words: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_length: 10000,
            censored_words: Vec::new(),
        }
    }
}
