//! In-process profile store.

use super::{ProfileStore, StoreError};
use crate::profile::PersistentProfile;

/// Keeps the last saved profile in memory.
///
/// Used when no data directory exists, and by tests. A failing store
/// rejects every call, standing in for a dead disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    profile: Option<PersistentProfile>,
    failing: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: PersistentProfile) -> Self {
        Self {
            profile: Some(profile),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn stored(&self) -> Option<&PersistentProfile> {
        self.profile.as_ref()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<PersistentProfile, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        self.profile.clone().ok_or(StoreError::NotFound)
    }

    fn save(&mut self, profile: &PersistentProfile) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        self.profile = Some(profile.clone());
        self.saves += 1;
        Ok(())
    }
}
