use crate::alphabet::Alphabet;
use crate::codec::RadixCodec;
use crate::errors::{AlphabetNotFoundError, CodecError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Configuration for a single named alphabet loaded from TOML.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AlphabetConfig {
    /// The symbols in digit order (explicit list)
    #[serde(default)]
    pub chars: String,
    /// First symbol of a range-based alphabet; use with `length`
    #[serde(default)]
    pub start: Option<String>,
    /// Number of symbols in a range-based alphabet; use with `start`
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub description: Option<String>,
}

impl AlphabetConfig {
    /// Builds the alphabet this entry describes.
    ///
    /// Explicit `chars` take priority over a `start` + `length` range.
    pub fn build_alphabet(&self) -> Result<Alphabet, CodecError> {
        if !self.chars.is_empty() {
            return Alphabet::from_str(&self.chars);
        }

        match (&self.start, self.length) {
            (Some(start), Some(length)) => {
                let start = start.chars().next().ok_or_else(|| {
                    CodecError::invalid_alphabet("start must contain at least one character")
                })?;
                Alphabet::from_range(start, length)
            }
            _ => Err(CodecError::invalid_alphabet(
                "entry defines neither chars nor start + length",
            )),
        }
    }

    /// Number of symbols, without building the alphabet.
    pub fn declared_len(&self) -> usize {
        if self.chars.is_empty() {
            self.length.unwrap_or(0)
        } else {
            self.chars.chars().count()
        }
    }
}

/// Global settings.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Alphabet used when a command does not name one
    #[serde(default)]
    pub default_alphabet: Option<String>,
}

/// Named alphabets loaded from TOML files.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AlphabetRegistry {
    /// Map of alphabet names to their configurations
    #[serde(default)]
    pub alphabets: HashMap<String, AlphabetConfig>,
    #[serde(default)]
    pub settings: Settings,
}

impl AlphabetRegistry {
    /// Parses alphabet configurations from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in alphabets bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../alphabets.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in alphabets (from library)
    /// 2. `<config dir>/radix-codec/alphabets.toml` (user overrides)
    /// 3. `./alphabets.toml` (project-local overrides)
    ///
    /// Later configurations override earlier ones for matching names. An
    /// override file that fails to load is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("radix-codec").join("alphabets.toml");
            config.merge_file_if_present(&user_config_path);
        }

        config.merge_file_if_present(Path::new("alphabets.toml"));

        Ok(config)
    }

    fn merge_file_if_present(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }

        match Self::load_from_file(path) {
            Ok(overrides) => {
                debug!(path = %path.display(), count = overrides.alphabets.len(), "merging alphabet overrides");
                self.merge(overrides);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load alphabet overrides");
            }
        }
    }

    /// Merges another configuration into this one.
    ///
    /// Alphabets from `other` replace same-named ones in `self`; a default
    /// alphabet set in `other` wins.
    pub fn merge(&mut self, other: AlphabetRegistry) {
        for (name, alphabet) in other.alphabets {
            self.alphabets.insert(name, alphabet);
        }
        if other.settings.default_alphabet.is_some() {
            self.settings.default_alphabet = other.settings.default_alphabet;
        }
    }

    /// Retrieves an alphabet configuration by name.
    pub fn get_alphabet(&self, name: &str) -> Option<&AlphabetConfig> {
        self.alphabets.get(name)
    }

    /// Alphabet names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.alphabets.keys().cloned().collect();
        names.sort();
        names
    }

    /// Builds a codec for the named alphabet.
    ///
    /// # Errors
    ///
    /// [`AlphabetNotFoundError`] (with a close-match suggestion) for unknown
    /// names, [`CodecError::InvalidAlphabet`] for malformed entries.
    pub fn build_codec(&self, name: &str) -> Result<RadixCodec, Box<dyn std::error::Error>> {
        let alphabet_config = self.get_alphabet(name).ok_or_else(|| {
            let suggestion = find_closest_alphabet(name, &self.names());
            AlphabetNotFoundError::new(name, suggestion)
        })?;

        let alphabet = alphabet_config.build_alphabet()?;
        Ok(RadixCodec::new(alphabet))
    }
}

/// Number of single-symbol insertions, deletions and substitutions
/// separating two names.
fn edit_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    // row[j] = distance between the prefix of `a` seen so far and target[..j]
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in target.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[target.len()]
}

/// The registered alphabet name nearest to a mistyped `name`.
///
/// Short names tolerate two edits, longer ones three; ties go to the
/// earliest candidate.
pub fn find_closest_alphabet(name: &str, available: &[String]) -> Option<String> {
    let tolerance = if name.chars().count() < 5 { 2 } else { 3 };

    available
        .iter()
        .map(|candidate| (edit_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= tolerance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.clone())
}
