//! Shared key generation for storage objects.
//!
//! Key format: `{folder}/{unix_millis}_{disambiguator}{.ext}`. The random
//! disambiguator keeps keys distinct for uploads landing in the same
//! millisecond; no unguessability is claimed for it.

use std::path::Path;

use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};

const DISAMBIGUATOR_LEN: usize = 6;

/// Components recovered from a generated object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParts {
    pub folder: String,
    pub timestamp_millis: i64,
    pub disambiguator: String,
    pub extension: Option<String>,
}

/// Generate an object key for an upload of `original_filename` under
/// `folder`.
///
/// The extension is taken from the original filename and lower-cased; a
/// filename without an extension produces a key without a trailing
/// dot-extension.
pub fn generate_object_key(folder: &str, original_filename: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let disambiguator: String = (0..DISAMBIGUATOR_LEN)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect();

    match extension_of(original_filename) {
        Some(ext) => format!("{}/{}_{}.{}", folder, timestamp, disambiguator, ext),
        None => format!("{}/{}_{}", folder, timestamp, disambiguator),
    }
}

/// Parse a key produced by [`generate_object_key`] back into its parts.
///
/// Returns `None` for keys not matching the generated format.
pub fn parse_object_key(key: &str) -> Option<KeyParts> {
    let (folder, rest) = key.split_once('/')?;
    if folder.is_empty() {
        return None;
    }

    let (stem, extension) = match rest.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => (stem, Some(ext.to_string())),
        _ => (rest, None),
    };

    let (timestamp, disambiguator) = stem.split_once('_')?;
    let timestamp_millis = timestamp.parse::<i64>().ok()?;
    if disambiguator.len() != DISAMBIGUATOR_LEN
        || !disambiguator.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(KeyParts {
        folder: folder.to_string(),
        timestamp_millis,
        disambiguator: disambiguator.to_string(),
        extension,
    })
}

/// Lower-cased extension of a filename, if it has one.
fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
