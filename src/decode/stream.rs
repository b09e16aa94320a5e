use super::compression::{decompress, Compression};
use super::unpack::{unpack, TileCode};
use crate::error::{MapError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::str::FromStr;

/// How a layer's `<data>` payload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// One `<tile gid="..."/>` child per cell.
    #[default]
    Xml,
    /// Comma separated decimal ids.
    Csv,
    /// Little-endian u32 ids, optionally compressed.
    Base64,
}

impl Encoding {
    /// Maps the `encoding` attribute; a missing or empty tag means inline XML.
    pub fn from_tag(tag: Option<&str>) -> Result<Self> {
        tag.unwrap_or_default().parse()
    }
}

impl FromStr for Encoding {
    type Err = MapError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "" => Ok(Encoding::Xml),
            "csv" => Ok(Encoding::Csv),
            "base64" => Ok(Encoding::Base64),
            other => Err(MapError::UnsupportedFormat {
                what: "layer data encoding",
                found: other.to_owned(),
                supported: "base64, csv or none are",
            }),
        }
    }
}

/// The raw content of a layer's `<data>` element.
#[derive(Debug, Clone, Copy)]
pub enum LayerPayload<'a> {
    /// Text content, used by the csv and base64 encodings.
    Text(&'a str),
    /// `gid` values of the `<tile>` children, in document order.
    Tiles(&'a [u32]),
}

impl<'a> LayerPayload<'a> {
    fn text(&self, encoding: Encoding) -> Result<&'a str> {
        match *self {
            LayerPayload::Text(text) => Ok(text),
            LayerPayload::Tiles(_) => Err(mismatched_payload(encoding, "tile elements")),
        }
    }

    fn tiles(&self, encoding: Encoding) -> Result<&'a [u32]> {
        match *self {
            LayerPayload::Tiles(tiles) => Ok(tiles),
            LayerPayload::Text(_) => Err(mismatched_payload(encoding, "text")),
        }
    }
}

fn mismatched_payload(encoding: Encoding, given: &str) -> MapError {
    MapError::InvalidArgument {
        name: "payload",
        reason: format!("{encoding:?} encoding cannot decode {given}"),
    }
}

/// Decodes one layer payload into its tile code stream.
///
/// `expected` is the layer's cell count. It only constrains the base64 path,
/// where the unpacker checks the decompressed byte length; the csv and XML
/// paths are checked when the grid is assembled.
pub fn decode_layer(
    encoding: Encoding,
    compression: Compression,
    payload: LayerPayload<'_>,
    expected: usize,
    layer: &str,
) -> Result<Vec<TileCode>> {
    match encoding {
        Encoding::Base64 => {
            let bytes = decode_base64(payload.text(encoding)?)?;
            let bytes = decompress(compression, bytes)?;
            unpack(&bytes, expected, layer)
        }
        Encoding::Csv => parse_csv(payload.text(encoding)?),
        Encoding::Xml => Ok(payload
            .tiles(encoding)?
            .iter()
            .copied()
            .map(TileCode::from_raw)
            .collect()),
    }
}

fn decode_base64(text: &str) -> Result<Vec<u8>> {
    // the editor pretty-prints the payload across lines
    let compact: String = text.split_ascii_whitespace().collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| MapError::format("base64 data", e))
}

fn parse_csv(text: &str) -> Result<Vec<TileCode>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|token| parse_gid(token, "csv token").map(TileCode::from_raw))
        .collect()
}

/// Parses one decimal tile code, flip bits included.
pub(crate) fn parse_gid(token: &str, what: &'static str) -> Result<u32> {
    let token = token.trim();
    token
        .parse::<u32>()
        .map_err(|e| MapError::format(what, format!("'{token}': {e}")))
}
