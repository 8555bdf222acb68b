//! # Security
//!
//! Helpers the demo and CLI surfaces call; the grid core never embeds secrets.
//!
//! Responsibilities:
//! - SHA-256 digests
//! - AES-256-GCM symmetric encryption (nonce-prefixed tokens)
//! - Filename sanitization and safe per-sensor log paths

mod crypto;
mod error;
mod hashing;
mod paths;

pub use crypto::{decrypt, encrypt, generate_key, KEY_LEN, NONCE_LEN};
pub use error::{Result, SecurityError};
pub use hashing::sha256_hex;
pub use paths::{safe_log_path, sanitize_filename};
