//! Pattern matchers
//!
//! Each matcher scans the password for one pattern kind and returns every
//! candidate match, overlapping or not. The parse selector picks among them.

mod date;
mod dictionary;
pub(crate) mod l33t;
mod repeat;
mod sequence;
mod spatial;

pub use spatial::{graph, AdjacencyGraph};

use crate::dictionary::DictionaryStore;
use crate::types::Match;
use std::collections::HashMap;

/// Per-estimation state shared by matchers. Holds the repeat-unit cache.
pub(crate) struct MatchContext<'a> {
    pub dictionary: &'a DictionaryStore,
    pub base_guesses_cache: HashMap<String, f64>,
}

impl<'a> MatchContext<'a> {
    pub fn new(dictionary: &'a DictionaryStore) -> Self {
        MatchContext {
            dictionary,
            base_guesses_cache: HashMap::new(),
        }
    }
}

/// Closed set of matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Matcher {
    Dictionary,
    ReversedDictionary,
    L33tDictionary,
    Repeat,
    Sequence,
    KeyboardAdjacency,
    Date,
}

impl Matcher {
    /// Every matcher, in the order candidates are collected.
    pub const ALL: [Matcher; 7] = [
        Matcher::Dictionary,
        Matcher::ReversedDictionary,
        Matcher::L33tDictionary,
        Matcher::KeyboardAdjacency,
        Matcher::Repeat,
        Matcher::Sequence,
        Matcher::Date,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Matcher::Dictionary => "dictionary",
            Matcher::ReversedDictionary => "reversed_dictionary",
            Matcher::L33tDictionary => "l33t_dictionary",
            Matcher::Repeat => "repeat",
            Matcher::Sequence => "sequence",
            Matcher::KeyboardAdjacency => "keyboard_adjacency",
            Matcher::Date => "date",
        }
    }

    /// Produces all candidate matches of this kind.
    pub fn produce_matches(&self, password: &[char], dictionary: &DictionaryStore) -> Vec<Match> {
        let mut ctx = MatchContext::new(dictionary);
        self.produce(password, &mut ctx)
    }

    pub(crate) fn produce(&self, password: &[char], ctx: &mut MatchContext<'_>) -> Vec<Match> {
        match self {
            Matcher::Dictionary => dictionary::dictionary_matches(password, ctx.dictionary),
            Matcher::ReversedDictionary => {
                dictionary::reversed_dictionary_matches(password, ctx.dictionary)
            }
            Matcher::L33tDictionary => l33t::l33t_matches(password, ctx.dictionary),
            Matcher::Repeat => repeat::repeat_matches(password, ctx),
            Matcher::Sequence => sequence::sequence_matches(password),
            Matcher::KeyboardAdjacency => spatial::spatial_matches(password),
            Matcher::Date => date::date_matches(password),
        }
    }
}

/// Runs every matcher and returns candidates ordered by `(i, j)`.
pub fn omnimatch(password: &[char], dictionary: &DictionaryStore) -> Vec<Match> {
    let mut ctx = MatchContext::new(dictionary);
    omnimatch_with(password, &mut ctx)
}

pub(crate) fn omnimatch_with(password: &[char], ctx: &mut MatchContext<'_>) -> Vec<Match> {
    let mut matches = Vec::new();
    for matcher in Matcher::ALL {
        matches.extend(matcher.produce(password, ctx));
    }
    sort_matches(&mut matches);
    matches
}

pub(crate) fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(|a, b| (a.i, a.j).cmp(&(b.i, b.j)));
}

/// Lowercases one character without changing the character count.
pub(crate) fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

pub(crate) fn token(password: &[char], i: usize, j: usize) -> String {
    password[i..=j].iter().collect()
}
