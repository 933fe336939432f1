//! Short code generation.
//!
//! Codes are random bytes from the operating system, encoded as URL-safe
//! base64 without padding so they can sit in a path segment unescaped.

use base64::Engine as _;

/// Random bytes behind a regular short code (64 bits, 11 characters).
pub const CODE_LENGTH_BYTES: usize = 8;

/// Random bytes behind a widened code (128 bits, 22 characters), used once
/// regular codes keep colliding.
pub const WIDE_CODE_LENGTH_BYTES: usize = 16;

/// Generates a random short code from `width` random bytes.
///
/// # Errors
///
/// Returns the random source error if the system generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(CODE_LENGTH_BYTES)?;
/// assert_eq!(code.len(), 11);
/// assert!(code.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code(width: usize) -> Result<String, getrandom::Error> {
    let mut buffer = vec![0u8; width];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
