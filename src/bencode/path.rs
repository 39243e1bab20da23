//! Slash-delimited lookups into nested dictionaries.
//!
//! A path such as `info/name` is split on `/` and each segment is looked up
//! verbatim in the dictionary reached so far. There is no escaping and no
//! list indexing; an empty path is a single empty key.

use super::BencodeValue;
use crate::error::{BencodeError, Result};
use std::collections::BTreeMap;

/// Resolve `path` against `value`
pub fn get<'a>(value: &'a BencodeValue, path: &str) -> Result<&'a BencodeValue> {
    let mut current = value;
    let mut consumed = 0;

    for segment in path.split('/') {
        let prefix = &path[..consumed + segment.len()];
        consumed += segment.len() + 1;

        let dict = current
            .as_dict()
            .ok_or_else(|| BencodeError::NotAMap(prefix.to_string()))?;

        current = dict
            .get(segment.as_bytes())
            .ok_or_else(|| BencodeError::KeyNotExist(prefix.to_string()))?;
    }

    Ok(current)
}

/// Resolve `path` to a byte string
pub fn get_bytes<'a>(value: &'a BencodeValue, path: &str) -> Result<&'a [u8]> {
    let found = get(value, path)?;
    found
        .as_bytes()
        .ok_or_else(|| mismatch(path, "byte string", found))
}

/// Resolve `path` to a UTF-8 string
pub fn get_str<'a>(value: &'a BencodeValue, path: &str) -> Result<&'a str> {
    let bytes = get_bytes(value, path)?;
    std::str::from_utf8(bytes).map_err(|_| BencodeError::TypeMismatch {
        path: path.to_string(),
        expected: "UTF-8 string",
        found: "non-UTF-8 byte string",
    })
}

/// Resolve `path` to an integer
pub fn get_int(value: &BencodeValue, path: &str) -> Result<i64> {
    let found = get(value, path)?;
    found
        .as_integer()
        .ok_or_else(|| mismatch(path, "integer", found))
}

pub fn get_list<'a>(value: &'a BencodeValue, path: &str) -> Result<&'a [BencodeValue]> {
    let found = get(value, path)?;
    found.as_list().ok_or_else(|| mismatch(path, "list", found))
}

pub fn get_dict<'a>(
    value: &'a BencodeValue,
    path: &str,
) -> Result<&'a BTreeMap<Vec<u8>, BencodeValue>> {
    let found = get(value, path)?;
    found
        .as_dict()
        .ok_or_else(|| mismatch(path, "dictionary", found))
}

fn mismatch(path: &str, expected: &'static str, found: &BencodeValue) -> BencodeError {
    BencodeError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.type_name(),
    }
}

impl BencodeValue {
    /// Get a nested value by slash-delimited path
    pub fn get_path(&self, path: &str) -> Result<&BencodeValue> {
        get(self, path)
    }

    pub fn get_path_str(&self, path: &str) -> Result<&str> {
        get_str(self, path)
    }

    pub fn get_path_int(&self, path: &str) -> Result<i64> {
        get_int(self, path)
    }
}
