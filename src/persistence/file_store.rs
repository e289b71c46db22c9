use super::{ProfileStore, StoreError};
use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::profile::PersistentProfile;
use crate::utils::persistence::data_dir;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

const CHECKSUM_LEN: usize = 32;

/// Stores one profile in a checksummed binary file.
pub struct FileStore {
    save_path: PathBuf,
}

impl FileStore {
    /// Store for `profile` under the platform data directory
    /// (`<data_dir>/profiles/<profile>.sav`).
    pub fn new(profile: &str) -> io::Result<Self> {
        let dir = data_dir()?.join("profiles");
        fs::create_dir_all(&dir)?;
        Ok(Self::at(dir.join(format!("{}.sav", sanitize_name(profile)))))
    }

    /// Store backed by an explicit file path.
    pub fn at(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }
}

/// Keep profile names safe to use as file names.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "player".to_string()
    } else {
        cleaned
    }
}

impl ProfileStore for FileStore {
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode-serialized profile (variable length)
    /// - SHA256 over everything before it (32 bytes)
    fn save(&mut self, profile: &PersistentProfile) -> Result<(), StoreError> {
        let data = bincode::serialize(profile).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let data_len = u32::try_from(data.len())
            .map_err(|_| StoreError::Corrupt("profile too large".into()))?;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target and rename so a crash mid-write leaves the
        // previous save intact.
        let tmp_path = self.save_path.with_extension("sav.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
            file.write_all(&data_len.to_le_bytes())?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.save_path)?;

        Ok(())
    }

    fn load(&self) -> Result<PersistentProfile, StoreError> {
        let mut file = match fs::File::open(&self.save_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode(&bytes)
    }
}

fn decode(bytes: &[u8]) -> Result<PersistentProfile, StoreError> {
    const HEADER_LEN: usize = 8 + 4;

    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(StoreError::Corrupt("file truncated".into()));
    }

    let (version_bytes, rest) = bytes.split_at(8);
    let version = u64::from_le_bytes(version_bytes.try_into().unwrap_or_default());
    if version != SAVE_VERSION_MAGIC {
        return Err(StoreError::Corrupt(format!(
            "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
            SAVE_VERSION_MAGIC, version
        )));
    }

    let (length_bytes, rest) = rest.split_at(4);
    let data_len = u32::from_le_bytes(length_bytes.try_into().unwrap_or_default()) as usize;
    let expected_len = data_len
        .checked_add(CHECKSUM_LEN)
        .ok_or_else(|| StoreError::Corrupt("declared length too large".into()))?;
    if rest.len() != expected_len {
        return Err(StoreError::Corrupt("length does not match file size".into()));
    }

    let (data, stored_checksum) = rest.split_at(data_len);

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(data);
    let computed_checksum = hasher.finalize();

    if stored_checksum != computed_checksum.as_slice() {
        return Err(StoreError::Corrupt("Checksum verification failed".into()));
    }

    bincode::deserialize(data).map_err(|e| StoreError::Corrupt(e.to_string()))
}
