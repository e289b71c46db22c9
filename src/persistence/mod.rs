//! Profile storage.
//!
//! Backends implement [`ProfileStore`] and report every failure as a
//! [`StoreError`]. Gameplay code never sees those errors: it goes through
//! [`load_profile`] and [`save_profile`], which log and fall back so a broken
//! disk can never stop a run.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::profile::PersistentProfile;
use std::io;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no saved profile")]
    NotFound,
    #[error("save data is corrupt: {0}")]
    Corrupt(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// A durable home for one profile record.
pub trait ProfileStore {
    fn load(&self) -> Result<PersistentProfile, StoreError>;
    fn save(&mut self, profile: &PersistentProfile) -> Result<(), StoreError>;
}

impl<S: ProfileStore + ?Sized> ProfileStore for Box<S> {
    fn load(&self) -> Result<PersistentProfile, StoreError> {
        (**self).load()
    }

    fn save(&mut self, profile: &PersistentProfile) -> Result<(), StoreError> {
        (**self).save(profile)
    }
}

/// Load the profile, or the default profile if the store cannot provide one.
///
/// A loaded profile is repaired before it is returned, so the skin invariants
/// hold no matter what was on disk.
pub fn load_profile<S: ProfileStore + ?Sized>(store: &S) -> PersistentProfile {
    match store.load() {
        Ok(mut profile) => {
            if profile.repair() {
                warn!("saved profile had invalid skins, reset to defaults");
            }
            debug!(
                high_score = profile.high_score,
                coins = profile.saved_coins,
                "profile loaded"
            );
            profile
        }
        Err(StoreError::NotFound) => {
            debug!("no saved profile, starting fresh");
            PersistentProfile::default()
        }
        Err(e) => {
            warn!(error = %e, "could not load profile, starting fresh");
            PersistentProfile::default()
        }
    }
}

/// Save the profile. Returns false on failure; the caller carries on.
pub fn save_profile<S: ProfileStore + ?Sized>(store: &mut S, profile: &PersistentProfile) -> bool {
    match store.save(profile) {
        Ok(()) => {
            debug!(high_score = profile.high_score, coins = profile.saved_coins, "profile saved");
            true
        }
        Err(e) => {
            warn!(error = %e, "could not save profile");
            false
        }
    }
}
