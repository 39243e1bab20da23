mod decoder;
mod encoder;
mod path;
mod value;

pub use decoder::{decode, decode_item, Decoder, DEFAULT_MAX_DEPTH};
pub use encoder::{encode, encode_to};
pub use path::{get, get_bytes, get_dict, get_int, get_list, get_str};
pub use value::BencodeValue;

#[cfg(test)]
mod tests {
    use super::*;

    fn torrent_like() -> BencodeValue {
        let info: BencodeValue = [
            ("piece length", BencodeValue::Integer(16384)),
            ("name", BencodeValue::from("example.txt")),
            ("pieces", BencodeValue::String(vec![0xab; 20])),
            ("length", BencodeValue::Integer(-1)),
        ]
        .into_iter()
        .collect();

        [
            ("info", info),
            ("announce", BencodeValue::from("http://tracker.example.com/announce")),
            (
                "announce-list",
                BencodeValue::List(vec![
                    BencodeValue::List(vec![BencodeValue::from("udp://a")]),
                    BencodeValue::List(vec![]),
                ]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_roundtrip() {
        let original = torrent_like();
        let encoded = encode(&original).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_roundtrip_scalars() {
        for original in [
            BencodeValue::Integer(0),
            BencodeValue::Integer(i64::MIN),
            BencodeValue::Integer(i64::MAX),
            BencodeValue::from(""),
            BencodeValue::String((0..=255).collect()),
            BencodeValue::List(vec![]),
        ] {
            let encoded = encode(&original).unwrap();
            assert_eq!(decode(&encoded).unwrap(), original);
        }
    }

    #[test]
    fn test_canonical_input_reencodes_identically() {
        let inputs: [&[u8]; 4] = [
            b"d3:cow3:moo4:spam4:eggse",
            b"l4:spam4:eggse",
            b"d4:infod4:name1:xe4:listli-3e0:dee",
            b"i0e",
        ];
        for input in inputs {
            let value = decode(input).unwrap();
            assert_eq!(encode(&value).unwrap(), input);
        }
    }

    #[test]
    fn test_unsorted_input_is_canonicalized() {
        let value = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
        assert_eq!(encode(&value).unwrap(), b"d3:cow3:moo4:spam4:eggse");
    }

    #[test]
    fn test_path_on_decoded_value() {
        let value = decode(b"d4:infod4:name1:xee").unwrap();
        assert_eq!(get_str(&value, "info/name").unwrap(), "x");
        assert!(get(&value, "info/missing").is_err());
    }
}
