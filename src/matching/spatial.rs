//! Keyboard adjacency matching on QWERTY and numeric keypad layouts.

use super::token;
use crate::guesses::spatial_guesses;
use crate::types::{KeyboardGraph, Match, Pattern};
use std::collections::HashMap;
use std::sync::LazyLock;

const MIN_SPATIAL_LEN: usize = 3;

const QWERTY: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \|
     aA sS dD fF gG hH jJ kK lL ;: '"
      zZ xX cC vV bB nN mM ,< .> /?
"#;

const KEYPAD: &str = r#"
  / * -
7 8 9 +
4 5 6
1 2 3
  0 .
"#;

static QWERTY_GRAPH: LazyLock<AdjacencyGraph> =
    LazyLock::new(|| AdjacencyGraph::build(KeyboardGraph::Qwerty, QWERTY, true));
static KEYPAD_GRAPH: LazyLock<AdjacencyGraph> =
    LazyLock::new(|| AdjacencyGraph::build(KeyboardGraph::Keypad, KEYPAD, false));

/// Returns the adjacency graph for a layout.
pub fn graph(kind: KeyboardGraph) -> &'static AdjacencyGraph {
    match kind {
        KeyboardGraph::Qwerty => &QWERTY_GRAPH,
        KeyboardGraph::Keypad => &KEYPAD_GRAPH,
    }
}

/// Neighbour keys of every character, in a fixed direction order. A key is
/// the string of characters it produces (unshifted first).
#[derive(Debug)]
pub struct AdjacencyGraph {
    kind: KeyboardGraph,
    neighbours: HashMap<char, Vec<Option<&'static str>>>,
    shifted: Vec<char>,
    starting_positions: f64,
    average_degree: f64,
}

impl AdjacencyGraph {
    fn build(kind: KeyboardGraph, layout: &'static str, slanted: bool) -> Self {
        let token_size = layout.split_whitespace().next().map_or(1, |t| t.chars().count());
        let x_unit = token_size as i32 + 1;

        let mut positions: HashMap<(i32, i32), &'static str> = HashMap::new();
        for (y, line) in layout.split('\n').enumerate() {
            let y = y as i32;
            let slant = if slanted { y - 1 } else { 0 };
            let mut offset = 0;
            for key in line.split(' ') {
                if !key.is_empty() {
                    let x = (offset as i32 - slant).div_euclid(x_unit);
                    positions.insert((x, y), key);
                }
                offset += key.len() + 1;
            }
        }

        let mut neighbours = HashMap::new();
        let mut shifted = Vec::new();
        for (&(x, y), key) in &positions {
            let coords: Vec<(i32, i32)> = if slanted {
                vec![(x - 1, y), (x, y - 1), (x + 1, y - 1), (x + 1, y), (x, y + 1), (x - 1, y + 1)]
            } else {
                vec![
                    (x - 1, y),
                    (x - 1, y - 1),
                    (x, y - 1),
                    (x + 1, y - 1),
                    (x + 1, y),
                    (x + 1, y + 1),
                    (x, y + 1),
                    (x - 1, y + 1),
                ]
            };
            let adjacent: Vec<Option<&'static str>> =
                coords.iter().map(|c| positions.get(c).copied()).collect();

            for (index, c) in key.chars().enumerate() {
                if index == 1 {
                    shifted.push(c);
                }
                neighbours.insert(c, adjacent.clone());
            }
        }

        let keys = neighbours.len() as f64;
        let degree_sum: usize = neighbours
            .values()
            .map(|adj| adj.iter().filter(|a| a.is_some()).count())
            .sum();

        AdjacencyGraph {
            kind,
            average_degree: if keys > 0.0 { degree_sum as f64 / keys } else { 0.0 },
            starting_positions: keys,
            neighbours,
            shifted,
        }
    }

    pub fn kind(&self) -> KeyboardGraph {
        self.kind
    }

    pub fn starting_positions(&self) -> f64 {
        self.starting_positions
    }

    pub fn average_degree(&self) -> f64 {
        self.average_degree
    }

    pub fn is_shifted(&self, c: char) -> bool {
        self.shifted.contains(&c)
    }

    /// Direction index and shift state of `next` relative to `prev`.
    fn step(&self, prev: char, next: char) -> Option<(usize, bool)> {
        let adjacent = self.neighbours.get(&prev)?;
        adjacent.iter().enumerate().find_map(|(direction, key)| {
            let position = (*key)?.chars().position(|c| c == next)?;
            Some((direction, position == 1))
        })
    }
}

pub fn spatial_matches(password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    for kind in [KeyboardGraph::Qwerty, KeyboardGraph::Keypad] {
        matches.extend(graph_matches(password, graph(kind)));
    }
    matches
}

fn graph_matches(password: &[char], graph: &AdjacencyGraph) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    let mut i = 0;

    while i + 1 < n {
        let mut j = i + 1;
        let mut last_direction = None;
        let mut turns = 0;
        let mut shifted_count = usize::from(graph.is_shifted(password[i]));

        while j < n {
            match graph.step(password[j - 1], password[j]) {
                Some((direction, shifted)) => {
                    if shifted {
                        shifted_count += 1;
                    }
                    if last_direction != Some(direction) {
                        turns += 1;
                        last_direction = Some(direction);
                    }
                    j += 1;
                }
                None => break,
            }
        }

        if j - i >= MIN_SPATIAL_LEN {
            let token = token(password, i, j - 1);
            matches.push(Match {
                guesses: spatial_guesses(
                    j - i,
                    turns,
                    shifted_count,
                    graph.starting_positions(),
                    graph.average_degree(),
                ),
                pattern: Pattern::KeyboardAdjacency {
                    graph: graph.kind(),
                    turns,
                    shifted_count,
                },
                i,
                j: j - 1,
                token,
            });
        }
        i = j;
    }

    matches
}
