//! Content digests for stored blobs.

use clipvault_core::constants::{FILE_HASH_LEN, HASH_CHUNK_SIZE};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Truncated SHA-256 of a file, read back in fixed-size chunks.
pub async fn file_hash(path: &Path) -> std::io::Result<String> {
    let mut file = fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(truncate(hex::encode(hasher.finalize())))
}

fn truncate(mut digest: String) -> String {
    digest.truncate(FILE_HASH_LEN);
    digest
}
