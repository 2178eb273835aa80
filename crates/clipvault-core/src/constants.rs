//! Service-wide constants.

/// Human-readable service name reported by the index endpoint.
pub const SERVICE_NAME: &str = "Screen Clip Storage Server";

/// Version reported by the index endpoint.
pub const SERVICE_VERSION: &str = "1.0";

/// Length of a generated clip identifier.
pub const CLIP_ID_LEN: usize = 8;

/// Number of hex characters kept from the SHA-256 digest of a blob.
pub const FILE_HASH_LEN: usize = 16;

/// Chunk size used when re-reading a stored blob to compute its digest.
pub const HASH_CHUNK_SIZE: usize = 4096;

/// Extensions accepted by the upload endpoint unless overridden by configuration.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".mkv", ".webm"];
