use super::BencodeValue;
use crate::error::{BencodeError, Result};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Default nesting cap for lists and dictionaries
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Decode bencoded data into a BencodeValue
///
/// Bytes after the first complete value are ignored.
pub fn decode(data: &[u8]) -> Result<BencodeValue> {
    Decoder::new().decode(data)
}

/// Decode one value starting at `offset`, returning it together with the
/// number of bytes it occupied
pub fn decode_item(data: &[u8], offset: usize) -> Result<(BencodeValue, usize)> {
    Decoder::new().decode_item(data, offset)
}

/// Configurable bencode decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    /// Maximum list/dictionary nesting, `None` for no limit
    max_depth: Option<usize>,
    /// Reject bytes left over after the top-level value
    strict: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            strict: false,
        }
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit list/dictionary nesting to `depth` levels
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the nesting limit
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Fail on trailing bytes instead of ignoring them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn decode(&self, data: &[u8]) -> Result<BencodeValue> {
        trace!("Decoding {} bytes", data.len());

        let (value, consumed) = self.decode_item(data, 0)?;

        if consumed < data.len() {
            if self.strict {
                return Err(BencodeError::bad_format(consumed, "trailing data after value"));
            }
            debug!(
                "Ignoring {} trailing bytes after bencoded value",
                data.len() - consumed
            );
        }

        Ok(value)
    }

    pub fn decode_item(&self, data: &[u8], offset: usize) -> Result<(BencodeValue, usize)> {
        let mut pos = offset;
        let value = self.decode_value(data, &mut pos, 0)?;
        Ok((value, pos - offset))
    }

    fn decode_value(&self, data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue> {
        if *pos >= data.len() {
            return Err(BencodeError::bad_format(*pos, "unexpected end of input"));
        }

        match data[*pos] {
            b'i' => decode_integer(data, pos),
            b'l' => self.decode_list(data, pos, self.enter(depth)?),
            b'd' => self.decode_dict(data, pos, self.enter(depth)?),
            _ => decode_string(data, pos).map(BencodeValue::String),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        match self.max_depth {
            Some(limit) if depth > limit => Err(BencodeError::NestingTooDeep(limit)),
            _ => Ok(depth),
        }
    }

    fn decode_list(&self, data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue> {
        *pos += 1; // Skip 'l'

        let mut list = Vec::new();

        while *pos < data.len() && data[*pos] != b'e' {
            list.push(self.decode_value(data, pos, depth)?);
        }

        if *pos >= data.len() {
            return Err(BencodeError::bad_format(*pos, "unterminated list"));
        }

        *pos += 1; // Skip 'e'

        Ok(BencodeValue::List(list))
    }

    fn decode_dict(&self, data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue> {
        *pos += 1; // Skip 'd'

        let mut dict = BTreeMap::new();

        while *pos < data.len() && data[*pos] != b'e' {
            let key = decode_string(data, pos)?;
            let value = self.decode_value(data, pos, depth)?;
            // Duplicate keys: the last occurrence wins
            dict.insert(key, value);
        }

        if *pos >= data.len() {
            return Err(BencodeError::bad_format(*pos, "unterminated dictionary"));
        }

        *pos += 1; // Skip 'e'

        Ok(BencodeValue::Dict(dict))
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<BencodeValue> {
    let start = *pos;
    *pos += 1; // Skip 'i'

    let digits_start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::bad_format(start, "unterminated integer"));
    }

    let num = std::str::from_utf8(&data[digits_start..*pos])
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| BencodeError::bad_format(digits_start, "invalid integer"))?;

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::Integer(num))
}

fn decode_string(data: &[u8], pos: &mut usize) -> Result<Vec<u8>> {
    let start = *pos;
    if start >= data.len() {
        return Err(BencodeError::bad_format(start, "unexpected end of input"));
    }

    let colon = data[start..]
        .iter()
        .position(|&b| b == b':')
        .map(|i| start + i)
        .ok_or_else(|| BencodeError::bad_format(start, "missing ':' after string length"))?;

    let len_digits = &data[start..colon];
    if len_digits.is_empty() || !len_digits.iter().all(u8::is_ascii_digit) {
        return Err(BencodeError::bad_format(start, "invalid string length"));
    }

    let len = std::str::from_utf8(len_digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| BencodeError::bad_format(start, "invalid string length"))?;

    let payload_start = colon + 1;
    let remaining = data.len() - payload_start;
    if len > remaining {
        return Err(BencodeError::bad_format(
            payload_start,
            format!("string length {} exceeds remaining {} bytes", len, remaining),
        ));
    }

    *pos = payload_start + len;
    Ok(data[payload_start..*pos].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &str) -> BencodeValue {
        BencodeValue::from(s)
    }

    fn assert_bad_format(data: &[u8]) {
        match decode(data) {
            Err(BencodeError::BadFormat { .. }) => {}
            other => panic!("expected bad format for {:?}, got {:?}", data, other),
        }
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(decode(b"i0e").unwrap(), BencodeValue::Integer(0));
        assert_eq!(decode(b"i42e").unwrap(), BencodeValue::Integer(42));
        assert_eq!(decode(b"i-5e").unwrap(), BencodeValue::Integer(-5));
        assert_eq!(
            decode(b"i9223372036854775807e").unwrap(),
            BencodeValue::Integer(i64::MAX)
        );
    }

    #[test]
    fn test_decode_integer_invalid() {
        assert_bad_format(b"i5");
        assert_bad_format(b"ie");
        assert_bad_format(b"i1x2e");
        assert_bad_format(b"i-e");
        assert_bad_format(b"i9223372036854775808e");
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode(b"4:spam").unwrap(), string("spam"));
        assert_eq!(decode(b"0:").unwrap(), string(""));
        assert_eq!(
            decode(b"3:\x00\xffe").unwrap(),
            BencodeValue::String(vec![0x00, 0xff, b'e'])
        );
    }

    #[test]
    fn test_decode_string_invalid() {
        assert_bad_format(b"4:sp");
        assert_bad_format(b"x:spam");
        assert_bad_format(b"-1:a");
        assert_bad_format(b"+4:spam");
        assert_bad_format(b":spam");
        assert_bad_format(b"4spam");
    }

    #[test]
    fn test_decode_list() {
        assert_eq!(
            decode(b"l4:spam4:eggse").unwrap(),
            BencodeValue::List(vec![string("spam"), string("eggs")])
        );
        assert_eq!(decode(b"le").unwrap(), BencodeValue::List(vec![]));
        assert_eq!(
            decode(b"lli1eeli2eee").unwrap(),
            BencodeValue::List(vec![
                BencodeValue::List(vec![BencodeValue::Integer(1)]),
                BencodeValue::List(vec![BencodeValue::Integer(2)]),
            ])
        );
    }

    #[test]
    fn test_decode_list_invalid() {
        assert_bad_format(b"l4:spam");
        assert_bad_format(b"l");
        assert_bad_format(b"li1e4:sp");
    }

    #[test]
    fn test_decode_dict() {
        let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
        let expected: BencodeValue = [("cow", string("moo")), ("spam", string("eggs"))]
            .into_iter()
            .collect();
        assert_eq!(value, expected);
        assert_eq!(decode(b"de").unwrap(), BencodeValue::Dict(BTreeMap::new()));
    }

    #[test]
    fn test_decode_dict_unsorted_and_duplicate_keys() {
        let value = decode(b"d1:bi1e1:ai2e1:bi3ee").unwrap();
        assert_eq!(value.dict_get_int(b"a"), Some(2));
        assert_eq!(value.dict_get_int(b"b"), Some(3));
        assert_eq!(value.as_dict().unwrap().len(), 2);
    }

    #[test]
    fn test_decode_dict_invalid() {
        assert_bad_format(b"d3:cow3:moo");
        assert_bad_format(b"d3:cow");
        assert_bad_format(b"di1ei2ee");
        assert_bad_format(b"dx:cow3:mooe");
    }

    #[test]
    fn test_empty_input() {
        assert_bad_format(b"");
        assert!(matches!(
            decode_item(b"i1e", 3),
            Err(BencodeError::BadFormat { offset: 3, .. })
        ));
    }

    #[test]
    fn test_trailing_data_ignored() {
        assert_eq!(decode(b"i1ei2e").unwrap(), BencodeValue::Integer(1));
        assert_eq!(decode(b"4:spamjunk").unwrap(), string("spam"));
    }

    #[test]
    fn test_strict_rejects_trailing_data() {
        let decoder = Decoder::new().strict(true);
        assert!(decoder.is_strict());
        assert!(matches!(
            decoder.decode(b"i1ei2e"),
            Err(BencodeError::BadFormat { offset: 3, .. })
        ));
        assert_eq!(decoder.decode(b"i1e").unwrap(), BencodeValue::Integer(1));
    }

    #[test]
    fn test_decode_item_reports_consumed() {
        let data = b"xxl4:spami7eei9e";
        let (value, consumed) = decode_item(data, 2).unwrap();
        assert_eq!(
            value,
            BencodeValue::List(vec![string("spam"), BencodeValue::Integer(7)])
        );
        assert_eq!(consumed, 11);

        let (next, consumed) = decode_item(data, 2 + 11).unwrap();
        assert_eq!(next, BencodeValue::Integer(9));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_error_offset() {
        match decode(b"l4:spam9:eggse") {
            Err(BencodeError::BadFormat { offset, .. }) => assert_eq!(offset, 9),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| {
            let mut data = vec![b'l'; depth];
            data.extend(std::iter::repeat(b'e').take(depth));
            data
        };

        let decoder = Decoder::new().with_max_depth(3);
        assert_eq!(decoder.max_depth(), Some(3));
        assert!(decoder.decode(&nested(3)).is_ok());
        assert!(matches!(
            decoder.decode(&nested(4)),
            Err(BencodeError::NestingTooDeep(3))
        ));

        let deep = nested(DEFAULT_MAX_DEPTH + 1);
        assert!(matches!(
            decode(&deep),
            Err(BencodeError::NestingTooDeep(DEFAULT_MAX_DEPTH))
        ));
        assert!(Decoder::new().unbounded().decode(&deep).is_ok());
    }
}
