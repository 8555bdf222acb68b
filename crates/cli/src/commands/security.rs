//! `security` command implementation.

use anyhow::{Context, Result};
use security::{decrypt, encrypt, generate_key, safe_log_path, sha256_hex};
use tracing::info;

use crate::cli::SecurityArgs;

/// Execute the `security` command
pub fn run_security(args: &SecurityArgs) -> Result<()> {
    let digest = sha256_hex(args.payload.as_bytes());
    println!("[Security] SHA-256 digest: {digest}");

    let key = generate_key();
    let token = encrypt(args.secret.as_bytes(), &key).context("Encryption failed")?;
    let recovered = decrypt(&token, &key).context("Decryption failed")?;
    println!("[Security] Encrypted token length: {} bytes", token.len());
    println!(
        "[Security] Decrypted data: {}",
        String::from_utf8_lossy(&recovered)
    );

    let log_path = safe_log_path(&args.log_dir, &args.sensor_name)
        .with_context(|| format!("Refusing sensor name {:?}", args.sensor_name))?;
    println!("[Security] Safe log path: {}", log_path.display());

    for hostile in ["../../etc/passwd", ".."] {
        if let Err(e) = safe_log_path(&args.log_dir, hostile) {
            info!(name = hostile, error = %e, "Rejected unsafe sensor name");
            println!("[Security] Rejected {hostile:?}");
        }
    }

    Ok(())
}
