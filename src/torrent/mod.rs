use crate::bencode::{encode, get, get_dict, BencodeValue, Decoder};
use crate::error::Result;
use sha1::{Digest, Sha1};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Load and decode a bencoded file (typically a .torrent)
pub async fn load_file<P: AsRef<Path>>(path: P, decoder: &Decoder) -> Result<BencodeValue> {
    let path = path.as_ref();
    let data = fs::read(path).await?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    decoder.decode(&data)
}

/// SHA1 over the canonical encoding of the top-level `info` dictionary
pub fn info_hash(value: &BencodeValue) -> Result<[u8; 20]> {
    get_dict(value, "info")?;
    let encoded = encode(get(value, "info")?)?;

    let mut hasher = Sha1::new();
    hasher.update(&encoded);
    Ok(hasher.finalize().into())
}

/// Get the info hash as a hex string
pub fn info_hash_hex(value: &BencodeValue) -> Result<String> {
    info_hash(value).map(hex::encode)
}
