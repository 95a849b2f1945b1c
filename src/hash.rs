//! BLAKE3 hashing utilities

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{InstallerError, Result};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Length of the digest prefix used in profile directory names
const SHORT_DIGEST_LEN: usize = 8;

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let read_failed = |e: std::io::Error| InstallerError::IoError {
        message: format!("Failed to read {}: {}", path.display(), e),
    };

    let file = File::open(path).map_err(read_failed)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(read_failed)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Short stable digest of a string, for naming directories
pub fn short_digest(text: &str) -> String {
    let hex = blake3::hash(text.as_bytes()).to_hex();
    hex.as_str()[..SHORT_DIGEST_LEN].to_string()
}
