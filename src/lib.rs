//! Bencode encoding, decoding and path lookups.
//!
//! ```
//! use bencode_rs::bencode::{decode, encode, get_str};
//!
//! let value = decode(b"d4:infod4:name1:xee").unwrap();
//! assert_eq!(get_str(&value, "info/name").unwrap(), "x");
//! assert_eq!(encode(&value).unwrap(), b"d4:infod4:name1:xee");
//! ```

pub mod bencode;
pub mod cli;
pub mod error;
pub mod torrent;

pub use bencode::{decode, encode, BencodeValue, Decoder};
pub use error::{BencodeError, Result};
