//! L33t-substitution dictionary matching.

use super::dictionary::dictionary_hits;
use super::token;
use crate::dictionary::DictionaryStore;
use crate::guesses::l33t_dictionary_guesses;
use crate::types::{Match, Pattern};
use std::collections::HashSet;

/// Letter to the characters commonly typed in its place.
const L33T_TABLE: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!', '|']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

/// L33t forms of `letter`, empty if it has none.
pub fn alternatives(letter: char) -> &'static [char] {
    L33T_TABLE
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, subs)| *subs)
        .unwrap_or(&[])
}

/// Letters a l33t character may stand for.
fn readings(c: char) -> Vec<char> {
    L33T_TABLE
        .iter()
        .filter(|(_, subs)| subs.contains(&c))
        .map(|(letter, _)| *letter)
        .collect()
}

/// Every way of reading the l33t characters present in the password. Each
/// map assigns one letter per l33t character.
fn enumerate_substitutions(password: &[char]) -> Vec<Vec<(char, char)>> {
    let mut present: Vec<char> = Vec::new();
    for c in password {
        if !present.contains(c) && !readings(*c).is_empty() {
            present.push(*c);
        }
    }

    let mut maps: Vec<Vec<(char, char)>> = vec![Vec::new()];
    for c in present {
        let mut next = Vec::new();
        for map in &maps {
            for letter in readings(c) {
                let mut extended = map.clone();
                extended.push((c, letter));
                next.push(extended);
            }
        }
        maps = next;
    }

    maps.retain(|m| !m.is_empty());
    maps
}

pub fn l33t_matches(password: &[char], dictionary: &DictionaryStore) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut seen: HashSet<(usize, usize, String, String)> = HashSet::new();

    for map in enumerate_substitutions(password) {
        let translated: Vec<char> = password
            .iter()
            .map(|c| {
                map.iter()
                    .find(|(sub, _)| sub == c)
                    .map(|(_, letter)| *letter)
                    .unwrap_or(*c)
            })
            .collect();

        for hit in dictionary_hits(&translated, dictionary) {
            if hit.i == hit.j {
                continue;
            }
            let token = token(password, hit.i, hit.j);
            let substitutions: Vec<(char, char)> = map
                .iter()
                .filter(|(sub, _)| token.contains(*sub))
                .copied()
                .collect();
            if substitutions.is_empty() {
                continue;
            }
            if !seen.insert((hit.i, hit.j, hit.list.to_string(), hit.word.clone())) {
                continue;
            }

            matches.push(Match {
                guesses: l33t_dictionary_guesses(hit.rank, &token, &hit.word),
                pattern: Pattern::L33tDictionary {
                    matched_word: hit.word,
                    rank: hit.rank,
                    dictionary_name: hit.list.to_string(),
                    substitutions,
                },
                i: hit.i,
                j: hit.j,
                token,
            });
        }
    }

    matches
}
