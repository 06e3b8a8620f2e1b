//! Password strength estimator - orchestrates matching, parsing and scoring.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::dictionary::DictionaryStore;
use crate::feedback::feedback_for;
use crate::matching::{sort_matches, MatchContext, Matcher};
use crate::scoring::most_guessable_match_sequence;
use crate::time_estimates::{crack_times, score_from_log10};
use crate::types::StrengthResult;

/// Default cap on the password length, in characters.
pub const DEFAULT_MAX_PASSWORD_LENGTH: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("Password too long: {length} characters (max {max})")]
    InputTooLong { length: usize, max: usize },

    #[error("Estimation cancelled")]
    Cancelled,
}

/// Estimator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Longer passwords are rejected with [`EstimateError::InputTooLong`].
    pub max_password_length: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            max_password_length: DEFAULT_MAX_PASSWORD_LENGTH,
        }
    }
}

impl EstimatorConfig {
    /// Reads `PWD_MAX_PASSWORD_LENGTH`; missing, invalid or zero values keep
    /// the default.
    pub fn from_env() -> Self {
        let max_password_length = std::env::var("PWD_MAX_PASSWORD_LENGTH")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_PASSWORD_LENGTH);

        EstimatorConfig { max_password_length }
    }
}

/// Estimates how many guesses an attacker needs for `password`.
///
/// # Arguments
/// * `password` - The password to estimate
/// * `dictionary` - Ranked wordlists to match against
/// * `token` - Optional cancellation token (async feature only)
pub fn estimate_password_strength(
    password: &SecretString,
    dictionary: &DictionaryStore,
    #[cfg(feature = "async")] token: Option<CancellationToken>,
) -> Result<StrengthResult, EstimateError> {
    let config = EstimatorConfig::default();

    #[cfg(feature = "async")]
    let result = estimate_password_strength_with(password, dictionary, &config, token);

    #[cfg(not(feature = "async"))]
    let result = estimate_password_strength_with(password, dictionary, &config);

    result
}

/// Same as [`estimate_password_strength`] with explicit settings.
pub fn estimate_password_strength_with(
    password: &SecretString,
    dictionary: &DictionaryStore,
    config: &EstimatorConfig,
    #[cfg(feature = "async")] token: Option<CancellationToken>,
) -> Result<StrengthResult, EstimateError> {
    let pwd: Vec<char> = password.expose_secret().chars().collect();

    if pwd.len() > config.max_password_length {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Rejected password of length {} (max {})",
            pwd.len(),
            config.max_password_length
        );
        return Err(EstimateError::InputTooLong {
            length: pwd.len(),
            max: config.max_password_length,
        });
    }

    let mut ctx = MatchContext::new(dictionary);
    let mut candidates = Vec::new();
    for matcher in Matcher::ALL {
        // Check cancellation before each matcher (async only)
        #[cfg(feature = "async")]
        if token.as_ref().is_some_and(|t| t.is_cancelled()) {
            #[cfg(feature = "tracing")]
            tracing::debug!("Estimation cancelled before {} matcher", matcher.name());
            return Err(EstimateError::Cancelled);
        }
        candidates.extend(matcher.produce(&pwd, &mut ctx));
    }
    sort_matches(&mut candidates);

    #[cfg(feature = "tracing")]
    let candidate_count = candidates.len();

    let sequence = most_guessable_match_sequence(&pwd, candidates);
    let score = score_from_log10(sequence.guesses_log10);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Estimated password: length {}, {} candidates, {} matches, log10 guesses {:.2}, score {}",
        pwd.len(),
        candidate_count,
        sequence.matches.len(),
        sequence.guesses_log10,
        score.value()
    );

    Ok(StrengthResult {
        score,
        guesses: sequence.guesses,
        guesses_log10: sequence.guesses_log10,
        crack_times: crack_times(sequence.guesses),
        feedback: feedback_for(score, &sequence),
        sequence,
    })
}

/// Async version that debounces, then sends the result via channel.
#[cfg(feature = "async")]
pub async fn estimate_password_strength_tx(
    password: &SecretString,
    dictionary: &DictionaryStore,
    token: CancellationToken,
    tx: mpsc::Sender<Result<StrengthResult, EstimateError>>,
) {
    use std::time::Duration;

    #[cfg(feature = "tracing")]
    tracing::info!("estimation is about to start...");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let result = estimate_password_strength(password, dictionary, Some(token));

    if let Err(e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password estimation result: {}", e);
    }
}
