//! Composition checklist - length, uppercase, lowercase, digits, symbols.
//!
//! Independent of the guess estimate; useful for UI hints next to the score.

use secrecy::{ExposeSecret, SecretString};

pub const MIN_LENGTH: usize = 8;

/// Which composition rules a password meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    /// Length in characters.
    pub length: usize,
    pub min_length_met: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl Requirements {
    pub fn is_satisfied(&self) -> bool {
        self.missing().is_empty()
    }

    /// Human readable names of the unmet rules.
    pub fn missing(&self) -> Vec<String> {
        let mut missing: Vec<String> = [
            (!self.has_uppercase, "uppercase"),
            (!self.has_lowercase, "lowercase"),
            (!self.has_digit, "numbers"),
            (!self.has_symbol, "special characters"),
        ]
        .into_iter()
        .filter_map(|(unmet, name)| unmet.then(|| name.to_string()))
        .collect();

        if !self.min_length_met {
            missing.insert(0, format!("at least {} characters", MIN_LENGTH));
        }
        missing
    }
}

pub fn check_requirements(password: &SecretString) -> Requirements {
    let pwd = password.expose_secret();
    let length = pwd.chars().count();

    Requirements {
        length,
        min_length_met: length >= MIN_LENGTH,
        has_uppercase: pwd.chars().any(|c| c.is_uppercase()),
        has_lowercase: pwd.chars().any(|c| c.is_lowercase()),
        has_digit: pwd.chars().any(|c| c.is_ascii_digit()),
        has_symbol: pwd.chars().any(|c| !c.is_alphanumeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(s: &str) -> Requirements {
        check_requirements(&SecretString::new(s.to_string().into()))
    }

    #[test]
    fn test_too_short() {
        let req = check("Short1!");
        assert!(!req.min_length_met);
        assert_eq!(req.missing(), vec!["at least 8 characters".to_string()]);
    }

    #[test]
    fn test_exactly_minimum() {
        let req = check("12345678");
        assert!(req.min_length_met);
        assert!(!req.is_satisfied());
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(check("päßwörd").length, 7);
    }

    #[test]
    fn test_missing_uppercase() {
        let missing = check("lowercase123!").missing();
        assert_eq!(missing, vec!["uppercase".to_string()]);
    }

    #[test]
    fn test_missing_numbers_and_special() {
        let missing = check("NoNumbersHere").missing();
        assert!(missing.contains(&"numbers".to_string()));
        assert!(missing.contains(&"special characters".to_string()));
    }

    #[test]
    fn test_all_categories() {
        let req = check("HasAll123!@#");
        assert!(req.is_satisfied());
        assert!(req.missing().is_empty());
    }
}
