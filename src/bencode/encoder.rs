use super::BencodeValue;
use crate::error::Result;
use bytes::BufMut;
use std::io::Write;

/// Encode a BencodeValue into its canonical byte representation
pub fn encode(value: &BencodeValue) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    encode_into(value, &mut result);
    Ok(result)
}

/// Encode a BencodeValue straight into a writer
///
/// The value is fully encoded before anything is written, so a nested
/// failure never leaves a truncated item behind.
pub fn encode_to<W: Write>(value: &BencodeValue, writer: &mut W) -> Result<()> {
    let encoded = encode(value)?;
    writer.write_all(&encoded)?;
    Ok(())
}

fn encode_into(value: &BencodeValue, output: &mut Vec<u8>) {
    match value {
        BencodeValue::Integer(i) => {
            output.put_u8(b'i');
            output.put_slice(i.to_string().as_bytes());
            output.put_u8(b'e');
        }
        BencodeValue::String(s) => encode_bytes(s, output),
        BencodeValue::List(list) => {
            output.put_u8(b'l');
            for item in list {
                encode_into(item, output);
            }
            output.put_u8(b'e');
        }
        BencodeValue::Dict(dict) => {
            // Sorted here, whatever order the map iterates in
            let mut entries: Vec<(&[u8], &BencodeValue)> =
                dict.iter().map(|(k, v)| (k.as_slice(), v)).collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

            output.put_u8(b'd');
            for (key, value) in entries {
                encode_bytes(key, output);
                encode_into(value, output);
            }
            output.put_u8(b'e');
        }
    }
}

fn encode_bytes(bytes: &[u8], output: &mut Vec<u8>) {
    output.put_slice(bytes.len().to_string().as_bytes());
    output.put_u8(b':');
    output.put_slice(bytes);
}
