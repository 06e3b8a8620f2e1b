//! Warning and suggestions for weak passwords.

use crate::types::{Feedback, Match, ParseResult, Pattern, Score};

const EXTRA_WORD: &str = "Add another word or two. Uncommon words are better.";

/// Builds feedback from the score and the chosen parse.
///
/// Passwords scoring above 2 get none. Otherwise the longest match in the
/// parse decides the warning.
pub fn feedback_for(score: Score, parse: &ParseResult) -> Feedback {
    if parse.matches.is_empty() {
        return Feedback {
            warning: None,
            suggestions: vec![
                "Use a few words, avoid common phrases".to_string(),
                "No need for symbols, digits, or uppercase letters".to_string(),
            ],
        };
    }
    if score.value() > 2 {
        return Feedback::default();
    }

    let mut longest = &parse.matches[0];
    for m in &parse.matches[1..] {
        if m.len() > longest.len() {
            longest = m;
        }
    }

    let whole = parse.matches.len() == 1;
    let mut feedback = match_feedback(longest, whole);
    feedback.suggestions.insert(0, EXTRA_WORD.to_string());
    feedback
}

fn match_feedback(m: &Match, whole: bool) -> Feedback {
    match &m.pattern {
        Pattern::Dictionary { rank, dictionary_name, .. } => {
            dictionary_feedback(m, *rank, dictionary_name, whole, &[])
        }
        Pattern::ReversedDictionary { rank, dictionary_name, .. } => dictionary_feedback(
            m,
            *rank,
            dictionary_name,
            whole,
            &["Reversed words aren't much harder to guess"],
        ),
        Pattern::L33tDictionary { rank, dictionary_name, .. } => dictionary_feedback(
            m,
            *rank,
            dictionary_name,
            whole,
            &["Predictable substitutions like '@' instead of 'a' don't help very much"],
        ),
        Pattern::KeyboardAdjacency { turns, .. } => {
            let warning = if *turns == 1 {
                "Straight rows of keys are easy to guess"
            } else {
                "Short keyboard patterns are easy to guess"
            };
            Feedback {
                warning: Some(warning.to_string()),
                suggestions: vec!["Use a longer keyboard pattern with more turns".to_string()],
            }
        }
        Pattern::Repeat { base_token, .. } => {
            let warning = if base_token.chars().count() == 1 {
                "Repeats like \"aaa\" are easy to guess"
            } else {
                "Repeats like \"abcabcabc\" are only slightly harder to guess than \"abc\""
            };
            Feedback {
                warning: Some(warning.to_string()),
                suggestions: vec!["Avoid repeated words and characters".to_string()],
            }
        }
        Pattern::Sequence { .. } => Feedback {
            warning: Some("Sequences like abc or 6543 are easy to guess".to_string()),
            suggestions: vec!["Avoid sequences".to_string()],
        },
        Pattern::Date { .. } => Feedback {
            warning: Some("Dates are often easy to guess".to_string()),
            suggestions: vec!["Avoid dates and years that are associated with you".to_string()],
        },
        Pattern::BruteForce => Feedback::default(),
    }
}

fn dictionary_feedback(
    m: &Match,
    rank: usize,
    list: &str,
    whole: bool,
    extra: &[&str],
) -> Feedback {
    let warning = match list {
        "passwords" if whole && rank <= 10 => Some("This is a top-10 common password"),
        "passwords" if whole && rank <= 100 => Some("This is a top-100 common password"),
        "passwords" if whole => Some("This is a very common password"),
        "passwords" => Some("This is similar to a commonly used password"),
        "english" if whole => Some("A word by itself is easy to guess"),
        "names" if whole => Some("Names and surnames by themselves are easy to guess"),
        "names" => Some("Common names and surnames are easy to guess"),
        _ => None,
    };

    let mut suggestions = Vec::new();
    let token = &m.token;
    let has_upper = token.chars().any(char::is_uppercase);
    let first_upper = token.chars().next().is_some_and(char::is_uppercase);
    if has_upper && token.chars().all(|c| !c.is_lowercase()) {
        suggestions.push("All-uppercase is almost as easy to guess as all-lowercase".to_string());
    } else if first_upper {
        suggestions.push("Capitalization doesn't help very much".to_string());
    }
    suggestions.extend(extra.iter().map(|s| s.to_string()));

    Feedback {
        warning: warning.map(str::to_string),
        suggestions,
    }
}
