//! Core result types shared by matchers, the parse selector and the evaluator.

use std::collections::BTreeMap;
use std::fmt;

/// Closed set of pattern kinds a [`Match`] can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    Dictionary,
    ReversedDictionary,
    L33tDictionary,
    Repeat,
    Sequence,
    KeyboardAdjacency,
    Date,
    BruteForce,
}

impl PatternKind {
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Dictionary => "dictionary",
            PatternKind::ReversedDictionary => "reversed_dictionary",
            PatternKind::L33tDictionary => "l33t_dictionary",
            PatternKind::Repeat => "repeat",
            PatternKind::Sequence => "sequence",
            PatternKind::KeyboardAdjacency => "keyboard_adjacency",
            PatternKind::Date => "date",
            PatternKind::BruteForce => "bruteforce",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Character class a sequence run lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceSpace {
    Lower,
    Upper,
    Digits,
}

/// Keyboard layout a spatial run was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardGraph {
    Qwerty,
    Keypad,
}

/// Pattern metadata, one variant per [`PatternKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Dictionary {
        matched_word: String,
        rank: usize,
        dictionary_name: String,
    },
    ReversedDictionary {
        matched_word: String,
        rank: usize,
        dictionary_name: String,
    },
    L33tDictionary {
        matched_word: String,
        rank: usize,
        dictionary_name: String,
        /// `(l33t character, letter)` pairs actually used in the token.
        substitutions: Vec<(char, char)>,
    },
    Repeat {
        base_token: String,
        base_guesses: f64,
        repeat_count: usize,
    },
    Sequence {
        space: SequenceSpace,
        ascending: bool,
    },
    KeyboardAdjacency {
        graph: KeyboardGraph,
        turns: usize,
        shifted_count: usize,
    },
    Date {
        separator: Option<char>,
        year: i32,
        month: u32,
        day: u32,
    },
    BruteForce,
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Dictionary { .. } => PatternKind::Dictionary,
            Pattern::ReversedDictionary { .. } => PatternKind::ReversedDictionary,
            Pattern::L33tDictionary { .. } => PatternKind::L33tDictionary,
            Pattern::Repeat { .. } => PatternKind::Repeat,
            Pattern::Sequence { .. } => PatternKind::Sequence,
            Pattern::KeyboardAdjacency { .. } => PatternKind::KeyboardAdjacency,
            Pattern::Date { .. } => PatternKind::Date,
            Pattern::BruteForce => PatternKind::BruteForce,
        }
    }
}

/// A candidate explanation for `password[i..=j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub pattern: Pattern,
    pub i: usize,
    pub j: usize,
    pub token: String,
    pub guesses: f64,
}

#[allow(clippy::len_without_is_empty)]
impl Match {
    pub fn kind(&self) -> PatternKind {
        self.pattern.kind()
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.j + 1 - self.i
    }

    pub fn guesses_log10(&self) -> f64 {
        self.guesses.log10()
    }
}

/// The minimum-guesses partition of a password into matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub matches: Vec<Match>,
    pub guesses: f64,
    pub guesses_log10: f64,
}

/// Strength score on the 0..=4 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Self {
        Score(value.min(Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn strength(&self) -> PasswordStrength {
        match self.0 {
            0 => PasswordStrength::VeryWeak,
            1 => PasswordStrength::Weak,
            2 => PasswordStrength::Medium,
            3 => PasswordStrength::Strong,
            _ => PasswordStrength::VeryStrong,
        }
    }
}

/// Display label for a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PasswordStrength::VeryWeak => "Very Weak",
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Medium => "Medium",
            PasswordStrength::Strong => "Strong",
            PasswordStrength::VeryStrong => "Very Strong",
        };
        f.write_str(label)
    }
}

/// Named attacker speed assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttackScenario {
    OnlineThrottling,
    OnlineNoThrottling,
    OfflineSlowHashing,
    OfflineFastHashing,
}

impl AttackScenario {
    pub const ALL: [AttackScenario; 4] = [
        AttackScenario::OnlineThrottling,
        AttackScenario::OnlineNoThrottling,
        AttackScenario::OfflineSlowHashing,
        AttackScenario::OfflineFastHashing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttackScenario::OnlineThrottling => "online_throttling_100_per_hour",
            AttackScenario::OnlineNoThrottling => "online_no_throttling_10_per_second",
            AttackScenario::OfflineSlowHashing => "offline_slow_hashing_1e4_per_second",
            AttackScenario::OfflineFastHashing => "offline_fast_hashing_1e10_per_second",
        }
    }

    pub fn guesses_per_second(&self) -> f64 {
        match self {
            AttackScenario::OnlineThrottling => 100.0 / 3600.0,
            AttackScenario::OnlineNoThrottling => 10.0,
            AttackScenario::OfflineSlowHashing => 1e4,
            AttackScenario::OfflineFastHashing => 1e10,
        }
    }
}

/// Crack time under one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct CrackTime {
    pub seconds: f64,
    pub display: String,
}

/// Warning and suggestions derived from the parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

/// Full estimation result for one password.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthResult {
    pub score: Score,
    pub guesses: f64,
    pub guesses_log10: f64,
    pub crack_times: BTreeMap<AttackScenario, CrackTime>,
    pub feedback: Feedback,
    pub sequence: ParseResult,
}

impl StrengthResult {
    pub fn strength(&self) -> PasswordStrength {
        self.score.strength()
    }

    pub fn crack_time(&self, scenario: AttackScenario) -> Option<&CrackTime> {
        self.crack_times.get(&scenario)
    }
}
