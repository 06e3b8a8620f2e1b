//! Secure random password generation.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use secrecy::SecretString;
use thiserror::Error;

pub const MAX_GENERATED_LENGTH: usize = 1024;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid generator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Length and character classes of a generated password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub length: usize,
    pub include_upper: bool,
    pub include_lower: bool,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            length: 16,
            include_upper: true,
            include_lower: true,
            include_digits: true,
            include_symbols: true,
        }
    }
}

impl GeneratorConfig {
    /// Union of the selected classes; every class when none is selected.
    pub fn charset(&self) -> Vec<u8> {
        let classes = [
            (self.include_upper, UPPERCASE),
            (self.include_lower, LOWERCASE),
            (self.include_digits, DIGITS),
            (self.include_symbols, SYMBOLS),
        ];

        let mut charset: Vec<u8> = classes
            .iter()
            .filter(|(selected, _)| *selected)
            .flat_map(|(_, chars)| chars.iter().copied())
            .collect();

        if charset.is_empty() {
            charset = classes.iter().flat_map(|(_, chars)| chars.iter().copied()).collect();
        }
        charset
    }
}

/// Generates a password with every character drawn uniformly from the
/// configured charset using the operating system RNG.
pub fn generate_password(config: &GeneratorConfig) -> Result<SecretString, GeneratorError> {
    if config.length == 0 || config.length > MAX_GENERATED_LENGTH {
        return Err(GeneratorError::InvalidConfiguration(format!(
            "length must be between 1 and {}, got {}",
            MAX_GENERATED_LENGTH, config.length
        )));
    }

    let charset = config.charset();
    let dist = Uniform::from(0..charset.len());
    let mut rng = OsRng;

    let password: String = (0..config.length)
        .map(|_| charset[dist.sample(&mut rng)] as char)
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Generated password: length {}, charset size {}",
        config.length,
        charset.len()
    );

    Ok(SecretString::new(password.into()))
}
