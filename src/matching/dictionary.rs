//! Dictionary and reversed-dictionary matching.

use super::{fold_char, token};
use crate::dictionary::DictionaryStore;
use crate::guesses::{dictionary_guesses, reversed_dictionary_guesses};
use crate::types::{Match, Pattern};

/// A raw hit of a (possibly translated) substring against one list.
pub(crate) struct DictionaryHit<'a> {
    pub i: usize,
    pub j: usize,
    pub word: String,
    pub rank: usize,
    pub list: &'a str,
}

/// Looks up every case-folded substring up to the longest dictionary word.
pub(crate) fn dictionary_hits<'a>(
    password: &[char],
    dictionary: &'a DictionaryStore,
) -> Vec<DictionaryHit<'a>> {
    let n = password.len();
    let max_len = dictionary.max_word_len();
    let folded: Vec<char> = password.iter().map(|c| fold_char(*c)).collect();
    let mut hits = Vec::new();

    for i in 0..n {
        let mut word = String::new();
        for j in i..n.min(i + max_len) {
            word.push(folded[j]);
            for (list, rank) in dictionary.lookup(&word) {
                hits.push(DictionaryHit {
                    i,
                    j,
                    word: word.clone(),
                    rank,
                    list,
                });
            }
        }
    }

    hits
}

pub fn dictionary_matches(password: &[char], dictionary: &DictionaryStore) -> Vec<Match> {
    dictionary_hits(password, dictionary)
        .into_iter()
        .map(|hit| {
            let token = token(password, hit.i, hit.j);
            Match {
                guesses: dictionary_guesses(hit.rank, &token),
                pattern: Pattern::Dictionary {
                    matched_word: hit.word,
                    rank: hit.rank,
                    dictionary_name: hit.list.to_string(),
                },
                i: hit.i,
                j: hit.j,
                token,
            }
        })
        .collect()
}

/// Matches words typed backwards. Palindromes are left to the forward matcher.
pub fn reversed_dictionary_matches(password: &[char], dictionary: &DictionaryStore) -> Vec<Match> {
    let n = password.len();
    let reversed: Vec<char> = password.iter().rev().copied().collect();

    dictionary_hits(&reversed, dictionary)
        .into_iter()
        .filter_map(|hit| {
            let (i, j) = (n - 1 - hit.j, n - 1 - hit.i);
            let token = token(password, i, j);
            let reversed_token: String = token.chars().rev().collect();
            if reversed_token == token {
                return None;
            }
            Some(Match {
                guesses: reversed_dictionary_guesses(hit.rank, &token),
                pattern: Pattern::ReversedDictionary {
                    matched_word: hit.word,
                    rank: hit.rank,
                    dictionary_name: hit.list.to_string(),
                },
                i,
                j,
                token,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::RankedList;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn store(words: &[&str]) -> DictionaryStore {
        DictionaryStore::from_lists(vec![RankedList::new("test", words.iter()).unwrap()])
    }

    #[test]
    fn test_matches_every_substring() {
        let store = store(&["mother", "moth", "her", "other"]);
        let matches = dictionary_matches(&chars("mother"), &store);
        let words: Vec<_> = matches.iter().map(|m| m.token.as_str()).collect();
        assert_eq!(words, vec!["moth", "mother", "other", "her"]);
    }

    #[test]
    fn test_case_insensitive_with_capitalization_penalty() {
        let store = store(&["alpha", "password"]);
        let matches = dictionary_matches(&chars("PassWord"), &store);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.token, "PassWord");
        assert!(matches!(&m.pattern, Pattern::Dictionary { rank: 2, matched_word, .. } if matched_word == "password"));
        assert!(m.guesses > 2.0);
    }

    #[test]
    fn test_guesses_equal_rank_for_lowercase() {
        let store = store(&["alpha", "beta", "gamma"]);
        let matches = dictionary_matches(&chars("gamma"), &store);
        assert_eq!(matches[0].guesses, 3.0);
    }

    #[test]
    fn test_reversed_matches() {
        let store = store(&["password"]);
        let matches = reversed_dictionary_matches(&chars("123drowssap"), &store);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (3, 10));
        assert_eq!(matches[0].token, "drowssap");
        assert_eq!(matches[0].guesses, 2.0);
    }

    #[test]
    fn test_reversed_skips_palindromes() {
        let store = store(&["level"]);
        assert!(reversed_dictionary_matches(&chars("level"), &store).is_empty());
    }

    #[test]
    fn test_matches_words_with_wide_lowercase_forms() {
        let store = store(&["İstanbul"]);
        let matches = dictionary_matches(&chars("xİstanbul"), &store);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (1, 8));
        assert_eq!(matches[0].token, "İstanbul");
    }

    #[test]
    fn test_empty_dictionary_matches_nothing() {
        let store = DictionaryStore::empty();
        assert!(dictionary_matches(&chars("password"), &store).is_empty());
    }
}
