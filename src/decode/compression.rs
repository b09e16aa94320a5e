use crate::error::{MapError, Result};
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;
use std::str::FromStr;

/// Compression applied to base64 layer data before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Bytes are stored as-is.
    #[default]
    None,
    /// zlib (RFC 1950) stream.
    Zlib,
    /// gzip (RFC 1952) stream.
    Gzip,
}

impl Compression {
    /// Maps the `compression` attribute; a missing or empty tag means no compression.
    pub fn from_tag(tag: Option<&str>) -> Result<Self> {
        tag.unwrap_or_default().parse()
    }
}

impl FromStr for Compression {
    type Err = MapError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "" => Ok(Compression::None),
            "zlib" => Ok(Compression::Zlib),
            "gzip" => Ok(Compression::Gzip),
            other => Err(MapError::UnsupportedFormat {
                what: "compression",
                found: other.to_owned(),
                supported: "zlib, gzip or none are",
            }),
        }
    }
}

/// Inflates `data` according to `compression`, passing uncompressed data through.
pub fn decompress(compression: Compression, data: Vec<u8>) -> Result<Vec<u8>> {
    match compression {
        Compression::None => Ok(data),
        Compression::Zlib => read_all(ZlibDecoder::new(data.as_slice()), "zlib stream"),
        Compression::Gzip => read_all(GzDecoder::new(data.as_slice()), "gzip stream"),
    }
}

fn read_all(mut decoder: impl Read, what: &'static str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| MapError::format(what, e))?;
    log::trace!("inflated {what} to {} bytes", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use std::io::Write;

    const PAYLOAD: &[u8] = &[1, 0, 0, 0, 2, 0, 0, 0, 0xff, 0xff, 0xff, 0x1f, 9, 9, 9, 9];

    fn zlib(bytes: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(bytes).unwrap();
        enc.finish().unwrap()
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(bytes).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn zlib_and_gzip_restore_original_bytes() {
        let z = decompress(Compression::Zlib, zlib(PAYLOAD)).unwrap();
        let g = decompress(Compression::Gzip, gzip(PAYLOAD)).unwrap();
        assert_eq!(z, PAYLOAD);
        assert_eq!(g, PAYLOAD);
    }

    #[test]
    fn none_passes_bytes_through() {
        let out = decompress(Compression::None, PAYLOAD.to_vec()).unwrap();
        assert_eq!(out, PAYLOAD);
    }

    #[test]
    fn malformed_stream_is_format_error() {
        let err = decompress(Compression::Zlib, vec![0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(matches!(err, MapError::Format { what: "zlib stream", .. }));

        let err = decompress(Compression::Gzip, zlib(PAYLOAD)).unwrap_err();
        assert!(matches!(err, MapError::Format { what: "gzip stream", .. }));
    }

    #[test]
    fn tags_map_to_variants() {
        assert_eq!(Compression::from_tag(None).unwrap(), Compression::None);
        assert_eq!(Compression::from_tag(Some("")).unwrap(), Compression::None);
        assert_eq!(Compression::from_tag(Some("zlib")).unwrap(), Compression::Zlib);
        assert_eq!(Compression::from_tag(Some("gzip")).unwrap(), Compression::Gzip);
    }

    #[test]
    fn unknown_tag_lists_supported_codecs() {
        let err = Compression::from_tag(Some("zstd")).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, MapError::UnsupportedFormat { ref found, .. } if found == "zstd"));
        assert!(msg.contains("zlib, gzip or none"), "{msg}");
    }
}
