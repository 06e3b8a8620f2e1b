//! Password strength estimation library
//!
//! Estimates how many guesses an attacker needs to find a password by
//! splitting it into recognizable patterns (common passwords, words, l33t
//! speak, keyboard walks, sequences, repeats, dates) and brute-force
//! segments, then choosing the cheapest explanation. Also provides a secure
//! password generator.
//!
//! # Features
//!
//! - `async` (default): Enables cancellation support and a debounced
//!   channel-based estimator
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_DICTIONARY_PATH`: Extra ranked wordlist loaded by [`init_dictionary`]
//! - `PWD_MAX_PASSWORD_LENGTH`: Estimation length cap read by
//!   [`EstimatorConfig::from_env`] (default: 256)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_guess::{init_dictionary, estimate_password_strength};
//! use secrecy::SecretString;
//!
//! // Initialize dictionary (call once at startup)
//! let dictionary = init_dictionary().expect("Failed to load dictionary");
//!
//! // Estimate a password
//! let password = SecretString::new("Tr0ub4dor&3".to_string().into());
//!
//! #[cfg(feature = "async")]
//! let result = estimate_password_strength(&password, &dictionary, None);
//!
//! #[cfg(not(feature = "async"))]
//! let result = estimate_password_strength(&password, &dictionary);
//!
//! let result = result.expect("Password too long");
//! println!("Score: {}", result.score.value());
//! println!("Strength: {}", result.strength());
//! ```

mod dictionary;
mod evaluator;
mod feedback;
mod generator;
mod guesses;
mod matching;
mod requirements;
mod scoring;
mod time_estimates;
mod types;

// Public API
pub use dictionary::{
    get_dictionary_path, init_dictionary, init_dictionary_from_path, shared_dictionary,
    DictionaryError, DictionaryStore, RankedList, USER_LIST_NAME,
};
pub use evaluator::{
    estimate_password_strength, estimate_password_strength_with, EstimateError, EstimatorConfig,
    DEFAULT_MAX_PASSWORD_LENGTH,
};
pub use generator::{generate_password, GeneratorConfig, GeneratorError, MAX_GENERATED_LENGTH};
pub use matching::{graph, omnimatch, AdjacencyGraph, Matcher};
pub use requirements::{check_requirements, Requirements, MIN_LENGTH};
pub use scoring::most_guessable_match_sequence;
pub use time_estimates::{crack_times, display_time, score_from_log10, SCORE_THRESHOLDS};
pub use types::{
    AttackScenario, CrackTime, Feedback, KeyboardGraph, Match, ParseResult, PasswordStrength,
    Pattern, PatternKind, Score, SequenceSpace, StrengthResult,
};

#[cfg(feature = "async")]
pub use evaluator::estimate_password_strength_tx;
