//! Dictionary store
//!
//! Ranked wordlists used by the dictionary matchers. A store is immutable
//! once built and is shared between estimations through an `Arc`.

use crate::matching::fold_char;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

static SHARED_DICTIONARY: RwLock<Option<Arc<DictionaryStore>>> = RwLock::new(None);

const PASSWORDS: &str = include_str!("../assets/passwords.txt");
const ENGLISH: &str = include_str!("../assets/english.txt");
const NAMES: &str = include_str!("../assets/names.txt");

/// Name given to the list loaded from `PWD_DICTIONARY_PATH`.
pub const USER_LIST_NAME: &str = "user";

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary list '{0}' is empty")]
    EmptyList(String),
}

/// One ranked wordlist. Rank is the 1-based position of the word.
#[derive(Debug, Clone)]
pub struct RankedList {
    name: String,
    ranks: HashMap<String, usize>,
    max_word_len: usize,
}

impl RankedList {
    /// Builds a list from words in rank order. Words are lowercased one
    /// character at a time and the first occurrence of a duplicate keeps its
    /// rank.
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut ranks = HashMap::new();
        let mut max_word_len = 0;
        let mut rank = 0;

        for word in words {
            let word: String = word.as_ref().trim().chars().map(fold_char).collect();
            if word.is_empty() {
                continue;
            }
            rank += 1;
            if ranks.contains_key(&word) {
                continue;
            }
            max_word_len = max_word_len.max(word.chars().count());
            ranks.insert(word, rank);
        }

        if ranks.is_empty() {
            return Err(DictionaryError::EmptyList(name));
        }

        Ok(RankedList {
            name,
            ranks,
            max_word_len,
        })
    }

    /// Parses newline separated text, one word per line.
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self, DictionaryError> {
        Self::new(name, content.lines())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranks.get(word).copied()
    }

    /// Entries ordered by rank.
    pub fn entries(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.ranks.iter().map(|(w, r)| (w.as_str(), *r)).collect();
        entries.sort_by_key(|(_, r)| *r);
        entries
    }
}

/// Immutable set of ranked lists.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    lists: Vec<RankedList>,
    max_word_len: usize,
}

impl DictionaryStore {
    /// A valid store with no lists. Only brute-force and structural patterns
    /// will match.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_lists(lists: Vec<RankedList>) -> Self {
        let max_word_len = lists.iter().map(|l| l.max_word_len).max().unwrap_or(0);
        DictionaryStore {
            lists,
            max_word_len,
        }
    }

    /// The lists bundled with the crate: `passwords`, `english`, `names`.
    pub fn builtin() -> Result<Self, DictionaryError> {
        let lists = vec![
            RankedList::parse("passwords", PASSWORDS)?,
            RankedList::parse("english", ENGLISH)?,
            RankedList::parse("names", NAMES)?,
        ];

        let store = Self::from_lists(lists);

        #[cfg(feature = "tracing")]
        for list in &store.lists {
            tracing::debug!("Loaded dictionary '{}': {} words", list.name(), list.len());
        }

        Ok(store)
    }

    /// Returns a new store with an extra list read from `path`.
    pub fn with_list_from_path<P: AsRef<Path>>(
        mut self,
        name: impl Into<String>,
        path: P,
    ) -> Result<Self, DictionaryError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Dictionary load FAILED: FileNotFound {:?}", path);
            return Err(DictionaryError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let list = RankedList::parse(name, &content)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Dictionary '{}' loaded: {} words from {:?}",
            list.name(),
            list.len(),
            path
        );

        self.max_word_len = self.max_word_len.max(list.max_word_len);
        self.lists.push(list);
        Ok(self)
    }

    pub fn lists(&self) -> &[RankedList] {
        &self.lists
    }

    pub fn list(&self, name: &str) -> Option<&RankedList> {
        self.lists.iter().find(|l| l.name == name)
    }

    /// Length in characters of the longest word over all lists.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// All `(list name, rank)` hits for an already lowercased word, in list order.
    pub fn lookup<'a, 'w>(
        &'a self,
        word: &'w str,
    ) -> impl Iterator<Item = (&'a str, usize)> + use<'a, 'w> {
        self.lists
            .iter()
            .filter_map(move |l| l.rank(word).map(|r| (l.name.as_str(), r)))
    }
}

/// Returns the optional user wordlist path from `PWD_DICTIONARY_PATH`.
pub fn get_dictionary_path() -> Option<PathBuf> {
    std::env::var("PWD_DICTIONARY_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

/// Initializes the process-wide dictionary.
///
/// Loads the bundled lists and, when `PWD_DICTIONARY_PATH` is set, the user
/// list at that path. Idempotent: once initialized the existing store is
/// returned.
///
/// # Errors
///
/// Returns error if the user list does not exist, cannot be read or is empty.
pub fn init_dictionary() -> Result<Arc<DictionaryStore>, DictionaryError> {
    match get_dictionary_path() {
        Some(path) => init_dictionary_from_path(path),
        None => install(DictionaryStore::builtin),
    }
}

/// Initializes the process-wide dictionary with an explicit user list path.
pub fn init_dictionary_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Arc<DictionaryStore>, DictionaryError> {
    let path = path.as_ref();
    install(|| DictionaryStore::builtin()?.with_list_from_path(USER_LIST_NAME, path))
}

fn install<F>(build: F) -> Result<Arc<DictionaryStore>, DictionaryError>
where
    F: FnOnce() -> Result<DictionaryStore, DictionaryError>,
{
    if let Some(existing) = shared_dictionary() {
        return Ok(existing);
    }

    let store = Arc::new(build()?);

    let mut guard = SHARED_DICTIONARY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Ok(guard.get_or_insert_with(|| store).clone())
}

/// Returns the process-wide dictionary, or `None` before initialization.
pub fn shared_dictionary() -> Option<Arc<DictionaryStore>> {
    SHARED_DICTIONARY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

#[cfg(test)]
pub fn reset_dictionary_for_testing() {
    let mut guard = SHARED_DICTIONARY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var(key, value); }
    }

    fn remove_env(key: &str) {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::remove_var(key); }
    }

    fn wordlist(words: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        for word in words {
            writeln!(file, "{}", word).expect("Failed to write");
        }
        file
    }

    #[test]
    fn test_ranks_follow_position() {
        let list = RankedList::new("t", ["Alpha", "beta", "", "alpha", "gamma"]).unwrap();
        assert_eq!(list.rank("alpha"), Some(1));
        assert_eq!(list.rank("beta"), Some(2));
        // duplicates keep their first rank but still occupy a position
        assert_eq!(list.rank("gamma"), Some(4));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let result = RankedList::parse("empty", "\n  \n");
        assert!(matches!(result, Err(DictionaryError::EmptyList(name)) if name == "empty"));
    }

    #[test]
    fn test_builtin_lists() {
        let store = DictionaryStore::builtin().unwrap();
        assert_eq!(store.lists().len(), 3);
        assert_eq!(store.list("passwords").unwrap().rank("password"), Some(2));
        assert!(store.list("english").unwrap().len() > 3000);
        assert!(store.list("names").unwrap().rank("smith").is_some());
        assert!(store.max_word_len() >= 10);
    }

    #[test]
    fn test_lookup_returns_every_list() {
        let store = DictionaryStore::builtin().unwrap();
        let hits: Vec<_> = store.lookup("jordan").collect();
        assert!(hits.iter().any(|(name, _)| *name == "passwords"));
        assert!(hits.iter().any(|(name, _)| *name == "names"));
    }

    #[test]
    fn test_lookup_names_outlive_the_word() {
        let store = DictionaryStore::builtin().unwrap();
        let names: Vec<&str> = {
            let mut word = String::from("jord");
            word.push_str("an");
            store.lookup(&word).map(|(name, _)| name).collect()
        };
        assert!(names.contains(&"names"));
    }

    #[test]
    fn test_words_fold_like_the_matchers() {
        let list = RankedList::new("t", ["İstanbul", "ANKARA"]).unwrap();
        // 'İ' has a two-character lowercase form and is kept as-is
        assert_eq!(list.rank("İstanbul"), Some(1));
        assert_eq!(list.rank("ankara"), Some(2));
        assert_eq!(list.max_word_len, 8);
    }

    #[test]
    fn test_empty_store_is_valid() {
        let store = DictionaryStore::empty();
        assert_eq!(store.max_word_len(), 0);
        assert_eq!(store.lookup("password").count(), 0);
    }

    #[test]
    fn test_list_from_missing_path() {
        let result = DictionaryStore::empty().with_list_from_path("x", "/nonexistent/words.txt");
        assert!(matches!(result, Err(DictionaryError::FileNotFound(_))));
    }

    #[test]
    fn test_list_from_path() {
        let file = wordlist(&["Zyzzyva", "quokka"]);
        let store = DictionaryStore::empty()
            .with_list_from_path("custom", file.path())
            .unwrap();
        assert_eq!(store.list("custom").unwrap().rank("zyzzyva"), Some(1));
        assert_eq!(store.max_word_len(), 7);
    }

    #[test]
    #[serial]
    fn test_get_dictionary_path_from_env() {
        remove_env("PWD_DICTIONARY_PATH");
        assert_eq!(get_dictionary_path(), None);

        set_env("PWD_DICTIONARY_PATH", "/custom/words.txt");
        assert_eq!(get_dictionary_path(), Some(PathBuf::from("/custom/words.txt")));

        remove_env("PWD_DICTIONARY_PATH");
    }

    #[test]
    #[serial]
    fn test_init_dictionary_with_user_list() {
        reset_dictionary_for_testing();
        let file = wordlist(&["hunter2", "tr0ub4dor"]);
        set_env("PWD_DICTIONARY_PATH", file.path().to_str().unwrap());

        let store = init_dictionary().unwrap();
        assert_eq!(store.list(USER_LIST_NAME).unwrap().rank("hunter2"), Some(1));

        // second call returns the same instance
        let again = init_dictionary().unwrap();
        assert!(Arc::ptr_eq(&store, &again));

        remove_env("PWD_DICTIONARY_PATH");
        reset_dictionary_for_testing();
    }

    #[test]
    #[serial]
    fn test_init_dictionary_file_not_found() {
        reset_dictionary_for_testing();
        set_env("PWD_DICTIONARY_PATH", "/nonexistent/path/words.txt");

        let result = init_dictionary();
        assert!(matches!(result, Err(DictionaryError::FileNotFound(_))));
        assert!(shared_dictionary().is_none());

        remove_env("PWD_DICTIONARY_PATH");
    }

    #[test]
    #[serial]
    fn test_init_dictionary_empty_file() {
        reset_dictionary_for_testing();
        let file = wordlist(&[]);

        let result = init_dictionary_from_path(file.path());
        assert!(matches!(result, Err(DictionaryError::EmptyList(_))));
    }
}
