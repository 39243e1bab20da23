use crate::error::{BencodeError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Represents a bencoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BencodeValue {
    /// Integer: i<number>e
    Integer(i64),
    /// Byte string: <length>:<contents>
    String(Vec<u8>),
    /// List: l<values>e
    List(Vec<BencodeValue>),
    /// Dictionary: d<key-value pairs>e
    Dict(BTreeMap<Vec<u8>, BencodeValue>),
}

impl BencodeValue {
    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            BencodeValue::Integer(_) => "integer",
            BencodeValue::String(_) => "byte string",
            BencodeValue::List(_) => "list",
            BencodeValue::Dict(_) => "dictionary",
        }
    }

    /// Try to get this value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BencodeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a byte string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BencodeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UTF-8 string
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes()
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Try to get this value as a list
    pub fn as_list(&self) -> Option<&[BencodeValue]> {
        match self {
            BencodeValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Try to get this value as a dictionary
    pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, BencodeValue>> {
        match self {
            BencodeValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Get a value from a dictionary by key
    pub fn dict_get(&self, key: &[u8]) -> Option<&BencodeValue> {
        self.as_dict()?.get(key)
    }

    /// Get a string value from a dictionary by key
    pub fn dict_get_str(&self, key: &[u8]) -> Option<&str> {
        self.dict_get(key)?.as_str()
    }

    /// Get an integer value from a dictionary by key
    pub fn dict_get_int(&self, key: &[u8]) -> Option<i64> {
        self.dict_get(key)?.as_integer()
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            BencodeValue::Integer(i) => write!(f, "{}", i),
            BencodeValue::String(s) => fmt_bytes(f, s),
            BencodeValue::List(list) if list.is_empty() => write!(f, "[]"),
            BencodeValue::List(list) => {
                writeln!(f, "[")?;
                for item in list {
                    write!(f, "{:width$}", "", width = (indent + 1) * 2)?;
                    item.fmt_indented(f, indent + 1)?;
                    writeln!(f)?;
                }
                write!(f, "{:width$}]", "", width = indent * 2)
            }
            BencodeValue::Dict(dict) if dict.is_empty() => write!(f, "{{}}"),
            BencodeValue::Dict(dict) => {
                writeln!(f, "{{")?;
                for (key, value) in dict {
                    write!(f, "{:width$}", "", width = (indent + 1) * 2)?;
                    fmt_bytes(f, key)?;
                    write!(f, ": ")?;
                    value.fmt_indented(f, indent + 1)?;
                    writeln!(f)?;
                }
                write!(f, "{:width$}}}", "", width = indent * 2)
            }
        }
    }
}

/// Quoted text when the bytes are UTF-8, hex otherwise
fn fmt_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    match std::str::from_utf8(bytes) {
        Ok(s) => write!(f, "{:?}", s),
        Err(_) => write!(f, "<{} bytes: {}>", bytes.len(), hex::encode(bytes)),
    }
}

impl fmt::Display for BencodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl From<i64> for BencodeValue {
    fn from(i: i64) -> Self {
        BencodeValue::Integer(i)
    }
}

impl From<i32> for BencodeValue {
    fn from(i: i32) -> Self {
        BencodeValue::Integer(i64::from(i))
    }
}

impl From<u32> for BencodeValue {
    fn from(i: u32) -> Self {
        BencodeValue::Integer(i64::from(i))
    }
}

impl TryFrom<u64> for BencodeValue {
    type Error = BencodeError;

    fn try_from(i: u64) -> Result<Self> {
        i64::try_from(i).map(BencodeValue::Integer).map_err(|_| {
            BencodeError::UnsupportedType(format!("integer {} exceeds the signed 64-bit range", i))
        })
    }
}

impl TryFrom<usize> for BencodeValue {
    type Error = BencodeError;

    fn try_from(i: usize) -> Result<Self> {
        BencodeValue::try_from(i as u64)
    }
}

impl From<&str> for BencodeValue {
    fn from(s: &str) -> Self {
        BencodeValue::String(s.as_bytes().to_vec())
    }
}

impl From<String> for BencodeValue {
    fn from(s: String) -> Self {
        BencodeValue::String(s.into_bytes())
    }
}

impl From<&[u8]> for BencodeValue {
    fn from(b: &[u8]) -> Self {
        BencodeValue::String(b.to_vec())
    }
}

impl From<Vec<u8>> for BencodeValue {
    fn from(b: Vec<u8>) -> Self {
        BencodeValue::String(b)
    }
}

impl From<Vec<BencodeValue>> for BencodeValue {
    fn from(list: Vec<BencodeValue>) -> Self {
        BencodeValue::List(list)
    }
}

impl From<BTreeMap<Vec<u8>, BencodeValue>> for BencodeValue {
    fn from(dict: BTreeMap<Vec<u8>, BencodeValue>) -> Self {
        BencodeValue::Dict(dict)
    }
}

impl<K: Into<Vec<u8>>> FromIterator<(K, BencodeValue)> for BencodeValue {
    /// Builds a dictionary; a repeated key keeps its last value
    fn from_iter<I: IntoIterator<Item = (K, BencodeValue)>>(iter: I) -> Self {
        BencodeValue::Dict(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
