//! Durable cross-session player state.

use super::skins::{self, DEFAULT_SKIN_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a skin in the catalog (e.g. `"blue_jay"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkinId(String);

impl SkinId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SKIN_ID
    }
}

impl Default for SkinId {
    fn default() -> Self {
        Self::new(DEFAULT_SKIN_ID)
    }
}

impl fmt::Display for SkinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// High score, wallet and unlocked skins.
///
/// Invariants (restored by [`PersistentProfile::repair`]):
/// - the default skin is always owned
/// - every owned skin exists in the catalog
/// - `current_skin` is owned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentProfile {
    pub high_score: u32,
    pub owned_skins: BTreeSet<SkinId>,
    pub saved_coins: u64,
    pub current_skin: SkinId,
}

impl Default for PersistentProfile {
    fn default() -> Self {
        Self {
            high_score: 0,
            owned_skins: BTreeSet::from([SkinId::default()]),
            saved_coins: 0,
            current_skin: SkinId::default(),
        }
    }
}

impl PersistentProfile {
    pub fn owns(&self, skin: &SkinId) -> bool {
        skin.is_default() || self.owned_skins.contains(skin)
    }

    /// Raise the high score if `score` beats it. Returns true when it did.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn deposit(&mut self, coins: u64) {
        self.saved_coins = self.saved_coins.saturating_add(coins);
    }

    /// Fix anything a stale or hand-edited save could break. Returns true if
    /// the profile changed.
    pub fn repair(&mut self) -> bool {
        let before = self.clone();

        self.owned_skins.retain(|id| skins::find(id).is_some());
        self.owned_skins.insert(SkinId::default());
        if skins::find(&self.current_skin).is_none() || !self.owns(&self.current_skin) {
            self.current_skin = SkinId::default();
        }

        *self != before
    }
}
