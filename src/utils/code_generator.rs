//! Short code generation and validation utilities.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;

/// Length of auto-generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

const GENERATED_CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,20}$").expect("valid code regex"));

/// Source of candidate short codes.
///
/// Uniqueness is not the generator's job; the allocator retries when the
/// store reports a collision.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random lowercase alphanumeric codes backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random 6-character code from `[a-z0-9]`.
///
/// # Examples
///
/// ```
/// use snaplink::utils::code_generator::generate_code;
///
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..GENERATED_CODE_CHARSET.len());
            GENERATED_CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is 2-20 characters from `[A-Za-z0-9_-]`.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a caller-supplied short code.
///
/// # Errors
///
/// Returns [`AppError::CodeFormatInvalid`] if the code does not match
/// `^[A-Za-z0-9_-]{2,20}$`.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(AppError::CodeFormatInvalid)
    }
}
