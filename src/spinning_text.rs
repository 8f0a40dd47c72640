//! Presets for the text that spins around the public avatar.
//!
//! Each preset is three phrases separated by `•`. Profiles store the preset
//! key; keys written by older releases are mapped once, when read.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpinningTextSet {
    Set1,
    Set2,
}

/// Keys stored by earlier releases and the preset they now mean.
const LEGACY_KEYS: &[(&str, SpinningTextSet)] = &[
    ("spanish", SpinningTextSet::Set1),
    ("es", SpinningTextSet::Set1),
    ("english", SpinningTextSet::Set2),
    ("en", SpinningTextSet::Set2),
];

impl SpinningTextSet {
    pub const ALL: [SpinningTextSet; 2] = [SpinningTextSet::Set1, SpinningTextSet::Set2];

    pub fn key(&self) -> &'static str {
        match self {
            SpinningTextSet::Set1 => "set1",
            SpinningTextSet::Set2 => "set2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpinningTextSet::Set1 => "Set 1 (Spanish)",
            SpinningTextSet::Set2 => "Set 2 (English)",
        }
    }

    pub fn content(&self) -> &'static str {
        match self {
            SpinningTextSet::Set1 => "aprende más • crece más • comparte más •",
            SpinningTextSet::Set2 => "learn more • earn more • grow more •",
        }
    }

    /// Current or legacy key → preset. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|set| set.key() == key)
            .or_else(|| {
                LEGACY_KEYS
                    .iter()
                    .find(|(legacy, _)| *legacy == key)
                    .map(|(_, set)| *set)
            })
    }
}

/// Text to display for a stored key, if any.
pub fn spinning_text_content(key: Option<&str>) -> Option<&'static str> {
    key.and_then(SpinningTextSet::from_key)
        .map(|set| set.content())
}
