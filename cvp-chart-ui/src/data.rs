//! Embedded fixture handling.
//!
//! The dashboard embeds its snapshot CSVs and the boundary file gzipped
//! (via the app's build script) to keep the WASM binary small; this module
//! inflates them back to text on mount.

use flate2::read::GzDecoder;
use std::io::Read;

/// Gunzip an embedded fixture back to its UTF-8 text.
pub fn inflate_fixture(bytes: &[u8]) -> anyhow::Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut text = String::new();
    decoder.read_to_string(&mut text)?;
    log::debug!("inflated fixture: {} -> {} bytes", bytes.len(), text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::inflate_fixture;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_inflate_roundtrip() {
        let original = "code,name,cases\n13,Metropolitana,1554\n";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let inflated = inflate_fixture(&compressed).unwrap();
        assert_eq!(inflated, original);
    }

    #[test]
    fn test_inflate_rejects_garbage() {
        assert!(inflate_fixture(b"not gzip data").is_err());
    }
}
