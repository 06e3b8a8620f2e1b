//! Date matching - "19901231", "1/1/91", "31-12-1990" and similar.

use super::token;
use crate::guesses::{date_guesses, REFERENCE_YEAR};
use crate::types::{Match, Pattern};

pub const DATE_MIN_YEAR: i32 = 1900;
pub const DATE_MAX_YEAR: i32 = 2099;

const SEPARATORS: &[char] = &[' ', '/', '\\', '_', '.', '-'];

/// Candidate split points for separator-free digit runs, by token length.
fn splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dmy {
    year: i32,
    month: u32,
    day: u32,
}

pub fn date_matches(password: &[char]) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();

    for i in 0..n {
        for len in 4..=8 {
            let j = i + len - 1;
            if j >= n {
                break;
            }
            let digits = &password[i..=j];
            if !digits.iter().all(|c| c.is_ascii_digit()) {
                continue;
            }

            let best = splits(len)
                .iter()
                .filter_map(|&(k, l)| {
                    map_ints_to_dmy([
                        parse(&digits[..k])?,
                        parse(&digits[k..l])?,
                        parse(&digits[l..])?,
                    ])
                })
                .min_by_key(|dmy| (dmy.year - REFERENCE_YEAR).abs());

            if let Some(dmy) = best {
                matches.push(date_match(password, i, j, None, dmy));
            }
        }
    }

    for i in 0..n {
        for len in 6..=10 {
            let j = i + len - 1;
            if j >= n {
                break;
            }
            if let Some((separator, dmy)) = separated_date(&password[i..=j]) {
                matches.push(date_match(password, i, j, Some(separator), dmy));
            }
        }
    }

    // drop dates strictly inside another date
    let spans: Vec<(usize, usize)> = matches.iter().map(|m| (m.i, m.j)).collect();
    matches.retain(|m| {
        !spans
            .iter()
            .any(|&(i, j)| (i, j) != (m.i, m.j) && i <= m.i && j >= m.j)
    });
    matches
}

fn date_match(password: &[char], i: usize, j: usize, separator: Option<char>, dmy: Dmy) -> Match {
    Match {
        guesses: date_guesses(dmy.year, separator),
        pattern: Pattern::Date {
            separator,
            year: dmy.year,
            month: dmy.month,
            day: dmy.day,
        },
        i,
        j,
        token: token(password, i, j),
    }
}

fn parse(digits: &[char]) -> Option<i32> {
    if digits.is_empty() || digits.len() > 4 {
        return None;
    }
    digits.iter().collect::<String>().parse().ok()
}

/// Parses `d{1,4} sep d{1,2} sep d{1,4}` with one consistent separator.
fn separated_date(token: &[char]) -> Option<(char, Dmy)> {
    let separator = *token.iter().find(|c| !c.is_ascii_digit())?;
    if !SEPARATORS.contains(&separator) {
        return None;
    }

    let parts: Vec<&[char]> = token.split(|c| *c == separator).collect();
    if parts.len() != 3 {
        return None;
    }
    let (a, b, c) = (parts[0], parts[1], parts[2]);
    if !(1..=4).contains(&a.len()) || !(1..=2).contains(&b.len()) || !(1..=4).contains(&c.len()) {
        return None;
    }
    if parts.iter().any(|p| !p.iter().all(|ch| ch.is_ascii_digit())) {
        return None;
    }

    let dmy = map_ints_to_dmy([parse(a)?, parse(b)?, parse(c)?])?;
    Some((separator, dmy))
}

fn map_ints_to_dmy(ints: [i32; 3]) -> Option<Dmy> {
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }

    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for &int in &ints {
        if (99 < int && int < DATE_MIN_YEAR) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    let year_splits = [(ints[2], [ints[0], ints[1]]), (ints[0], [ints[1], ints[2]])];

    for (year, rest) in year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            return map_ints_to_dm(rest).and_then(|(day, month)| valid(year, month, day));
        }
    }

    for (year, rest) in year_splits {
        if let Some((day, month)) = map_ints_to_dm(rest) {
            let year = two_to_four_digit_year(year);
            if let Some(dmy) = valid(year, month, day) {
                return Some(dmy);
            }
        }
    }

    None
}

fn map_ints_to_dm(ints: [i32; 2]) -> Option<(i32, i32)> {
    [(ints[0], ints[1]), (ints[1], ints[0])]
        .into_iter()
        .find(|&(d, m)| (1..=31).contains(&d) && (1..=12).contains(&m))
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}

fn valid(year: i32, month: i32, day: i32) -> Option<Dmy> {
    if !(DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) || day > days_in_month(year, month) {
        return None;
    }
    Some(Dmy {
        year,
        month: month as u32,
        day: day as u32,
    })
}

fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str) -> Vec<Match> {
        date_matches(&s.chars().collect::<Vec<_>>())
    }

    fn ymd(m: &Match) -> (i32, u32, u32) {
        match m.pattern {
            Pattern::Date { year, month, day, .. } => (year, month, day),
            _ => panic!("not a date"),
        }
    }

    #[test]
    fn test_eight_digit_dates() {
        let matches = run("19901231");
        assert_eq!(matches.len(), 1);
        assert_eq!(ymd(&matches[0]), (1990, 12, 31));

        let matches = run("31121990");
        assert_eq!(ymd(&matches[0]), (1990, 12, 31));
    }

    #[test]
    fn test_short_dates_use_two_digit_years() {
        let matches = run("010191");
        assert_eq!(matches.len(), 1);
        assert_eq!(ymd(&matches[0]), (1991, 1, 1));

        // the reading closest to the reference year wins
        assert_eq!(ymd(&run("1191")[0]), (2001, 9, 11));
    }

    #[test]
    fn test_separated_dates() {
        let matches = run("12/25/1984");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(ymd(m), (1984, 12, 25));
        assert!(matches!(m.pattern, Pattern::Date { separator: Some('/'), .. }));
        assert_eq!(m.token, "12/25/1984");
    }

    #[test]
    fn test_inconsistent_separators_are_rejected() {
        assert!(run("12/25-1984").iter().all(|m| m.token != "12/25-1984"));
    }

    #[test]
    fn test_impossible_dates() {
        for token in ["31021990", "13131313", "18001231"] {
            assert!(run(token).iter().all(|m| m.token != token), "{}", token);
        }
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(ymd(&run("29022000")[0]), (2000, 2, 29));
        assert!(run("29021999").iter().all(|m| m.token != "29021999"));
    }

    #[test]
    fn test_uncommon_separator_costs_more() {
        let slash = &run("1/1/1991")[0];
        let underscore = &run("1_1_1991")[0];
        assert!(underscore.guesses > slash.guesses);
    }

    #[test]
    fn test_common_format_costs_less_than_bare_digits() {
        let formatted = &run("1991/12/31")[0];
        let bare = &run("19911231")[0];
        assert_eq!(ymd(formatted), ymd(bare));
        assert!(formatted.guesses < bare.guesses);
    }

    #[test]
    fn test_nested_dates_are_dropped() {
        let matches = run("19901231");
        assert!(matches.iter().all(|m| m.token == "19901231"));
    }
}
