//! Persistence for the color table.
//!
//! Container layout, all integers little-endian:
//!
//! ```text
//! offset  size  field
//!      0     8  magic "GLBYLUT1"
//!      8     4  levels (u32)
//!     12     8  rows (u64) = levels³
//!     20     4  cols (u32) = 3
//!     24    32  SHA-256 of the payload
//!     56     …  payload: rows × cols f32 (J', a', b')
//! ```

use crate::error::CacheError;
use crate::services::color_table::{expected_len, valid_levels, ColorTable};
use cam02_ucs::Ucs;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const MAGIC: &[u8; 8] = b"GLBYLUT1";
const COLS: u32 = 3;
const DIGEST_OFFSET: usize = 24;
const HEADER_LEN: usize = 56;
const ENTRY_BYTES: usize = COLS as usize * 4;

/// Trait for color table storage
pub trait TableStore {
    /// Read a previously saved table
    fn load(&self) -> Result<ColorTable, CacheError>;

    /// Persist a full, unfiltered table
    fn save(&self, table: &ColorTable) -> Result<(), CacheError>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Serialize a table into the cache container
pub fn encode(table: &ColorTable) -> Vec<u8> {
    let rows = table.len();
    let mut bytes = Vec::with_capacity(HEADER_LEN + rows * ENTRY_BYTES);

    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&(table.levels() as u32).to_le_bytes());
    bytes.extend_from_slice(&(rows as u64).to_le_bytes());
    bytes.extend_from_slice(&COLS.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 32]);

    for color in table.as_slice() {
        for value in color.to_array() {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    let digest = Sha256::digest(&bytes[HEADER_LEN..]);
    bytes[DIGEST_OFFSET..HEADER_LEN].copy_from_slice(&digest);
    bytes
}

/// Parse and verify a cache container
pub fn decode(bytes: &[u8]) -> Result<ColorTable, CacheError> {
    if bytes.len() < HEADER_LEN {
        return Err(CacheError::Corrupt(format!(
            "truncated header ({} bytes)",
            bytes.len()
        )));
    }
    if &bytes[..8] != MAGIC {
        return Err(CacheError::Corrupt("bad magic".to_string()));
    }

    let levels = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let rows = u64::from_le_bytes([
        bytes[12], bytes[13], bytes[14], bytes[15], bytes[16], bytes[17], bytes[18], bytes[19],
    ]);
    let cols = u32::from_le_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);

    if cols != COLS {
        return Err(CacheError::Corrupt(format!("expected 3 columns, found {cols}")));
    }
    let levels = u16::try_from(levels)
        .ok()
        .filter(|&l| valid_levels(l))
        .ok_or_else(|| CacheError::Corrupt(format!("invalid depth {levels}")))?;
    let expected = expected_len(levels);
    if rows != expected as u64 {
        return Err(CacheError::ShapeMismatch {
            expected,
            found: rows as usize,
        });
    }

    let payload = &bytes[HEADER_LEN..];
    if payload.len() != expected * ENTRY_BYTES {
        return Err(CacheError::Corrupt(format!(
            "payload is {} bytes, expected {}",
            payload.len(),
            expected * ENTRY_BYTES
        )));
    }

    let stored = &bytes[DIGEST_OFFSET..HEADER_LEN];
    let actual = Sha256::digest(payload);
    if stored != actual.as_slice() {
        tracing::debug!(
            stored = %hex::encode(stored),
            actual = %hex::encode(actual),
            "Cache checksum mismatch"
        );
        return Err(CacheError::Corrupt("checksum mismatch".to_string()));
    }

    let colors = payload
        .chunks_exact(ENTRY_BYTES)
        .map(|entry| {
            let value = |at: usize| {
                f32::from_le_bytes([entry[at], entry[at + 1], entry[at + 2], entry[at + 3]])
            };
            Ucs::new(value(0), value(4), value(8))
        })
        .collect();

    ColorTable::from_colors(levels, colors)
        .ok_or_else(|| CacheError::Corrupt("entry count does not match depth".to_string()))
}

/// Hex SHA-256 of an encoded container's payload, for logging
pub fn payload_digest(bytes: &[u8]) -> Option<String> {
    bytes
        .get(DIGEST_OFFSET..HEADER_LEN)
        .map(hex::encode)
}

/// Table cache on the local filesystem
pub struct FileTableStore {
    path: PathBuf,
}

impl FileTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TableStore for FileTableStore {
    fn load(&self) -> Result<ColorTable, CacheError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(CacheError::Missing),
            Err(e) => return Err(CacheError::Io(e)),
        };
        decode(&bytes)
    }

    fn save(&self, table: &ColorTable) -> Result<(), CacheError> {
        let bytes = encode(table);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Rename over the target so readers never see a partial file
        let temp = self.temp_path();
        std::fs::write(&temp, &bytes)?;
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            sha256 = %payload_digest(&bytes).unwrap_or_default(),
            "Wrote color table cache"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory table cache
pub struct MemoryTableStore {
    bytes: Mutex<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self {
            bytes: Mutex::new(None),
            saves: AtomicUsize::new(0),
        }
    }

    /// Start from an existing container, valid or not
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        self.bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore for MemoryTableStore {
    fn load(&self) -> Result<ColorTable, CacheError> {
        match self.lock().as_deref() {
            Some(bytes) => decode(bytes),
            None => Err(CacheError::Missing),
        }
    }

    fn save(&self, table: &ColorTable) -> Result<(), CacheError> {
        *self.lock() = Some(encode(table));
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
