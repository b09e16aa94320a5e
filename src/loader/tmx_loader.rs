use super::document::{read_map, read_root, RawLayer, RawTileSet, RootTag};
use crate::decode::{decode_layer, parse_gid, Compression, Encoding, LayerPayload};
use crate::error::{MapError, Result};
use crate::grid::cell_count;
use crate::layer::MapLayer;
use crate::map::{MapSize, TileMap};
use crate::tileset::{TileSet, TileSetImage};
use log::debug;
use std::io::Read;
use std::path::Path;

/// The only map format version the loader accepts.
pub const SUPPORTED_VERSION: &str = "1.0";
/// The only map orientation the loader accepts.
pub const SUPPORTED_ORIENTATION: &str = "orthogonal";

/// Parses a TMX document held in memory.
pub fn parse_str(xml: &str) -> Result<TileMap> {
    let root = match read_root(xml)? {
        Some(root) if root.name == "map" => root,
        _ => return Err(MapError::missing("map", None)),
    };
    check_requirements(&root)?;
    let raw = read_map(xml)?;

    let size = MapSize {
        width: raw.width,
        height: raw.height,
        tile_width: raw.tilewidth,
        tile_height: raw.tileheight,
    };
    debug!(
        "map {}x{} tiles of {}x{}px, {} tileset(s), {} layer(s)",
        size.width,
        size.height,
        size.tile_width,
        size.tile_height,
        raw.tilesets.len(),
        raw.layers.len()
    );

    let tilesets = raw
        .tilesets
        .into_iter()
        .map(tileset_from_raw)
        .collect::<Result<Vec<_>>>()?;

    let layers = raw
        .layers
        .into_iter()
        .map(layer_from_raw)
        .collect::<Result<Vec<_>>>()?;

    Ok(TileMap {
        size,
        tilesets,
        layers,
    })
}

/// Parses a UTF-8 encoded TMX document.
pub fn parse_bytes(bytes: &[u8]) -> Result<TileMap> {
    let xml = std::str::from_utf8(bytes).map_err(|e| MapError::format("document encoding", e))?;
    parse_str(xml)
}

/// Reads a TMX document to the end and parses it.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<TileMap> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| MapError::Io { path: None, source })?;
    parse_bytes(&bytes)
}

/// Loads and parses a `.tmx` file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<TileMap> {
    let p = path.as_ref();
    if p.as_os_str().is_empty() {
        return Err(MapError::InvalidArgument {
            name: "path",
            reason: "path is empty".into(),
        });
    }
    let bytes = std::fs::read(p).map_err(|source| MapError::Io {
        path: Some(p.to_path_buf()),
        source,
    })?;
    parse_bytes(&bytes)
}

fn check_requirements(root: &RootTag) -> Result<()> {
    let version = root.version.as_deref().unwrap_or_default();
    if version != SUPPORTED_VERSION {
        return Err(MapError::UnsupportedFormat {
            what: "map version",
            found: version.to_owned(),
            supported: "version '1.0' is",
        });
    }

    let orientation = root.orientation.as_deref().unwrap_or_default();
    if orientation != SUPPORTED_ORIENTATION {
        return Err(MapError::UnsupportedFormat {
            what: "orientation",
            found: orientation.to_owned(),
            supported: "'orthogonal' orientation is",
        });
    }
    Ok(())
}

fn tileset_from_raw(raw: RawTileSet) -> Result<TileSet> {
    let image = raw
        .image
        .ok_or_else(|| MapError::missing("image", Some(raw.name.clone())))?;
    Ok(TileSet {
        first_gid: raw.firstgid,
        name: raw.name,
        tile_width: raw.tilewidth,
        tile_height: raw.tileheight,
        image: TileSetImage {
            source: image.source,
            width: image.width,
            height: image.height,
        },
    })
}

fn layer_from_raw(raw: RawLayer) -> Result<MapLayer> {
    let RawLayer {
        name,
        width,
        height,
        data,
    } = raw;
    let data = data.ok_or_else(|| MapError::missing("data", Some(name.clone())))?;

    let encoding = Encoding::from_tag(data.encoding.as_deref())?;
    // only base64 payloads are ever compressed
    let compression = match encoding {
        Encoding::Base64 => Compression::from_tag(data.compression.as_deref())?,
        Encoding::Csv | Encoding::Xml => Compression::None,
    };
    debug!("layer '{name}' {width}x{height}: {encoding:?}, {compression:?}");

    let expected = cell_count(width as usize, height as usize)?;
    let gids = match encoding {
        Encoding::Xml => data
            .tiles
            .iter()
            .map(|t| t.gid.as_deref().map_or(Ok(0), |gid| parse_gid(gid, "tile gid")))
            .collect::<Result<Vec<_>>>()?,
        Encoding::Csv | Encoding::Base64 => Vec::new(),
    };
    let payload = match encoding {
        Encoding::Xml => LayerPayload::Tiles(&gids),
        Encoding::Csv | Encoding::Base64 => LayerPayload::Text(&data.text),
    };

    let codes = decode_layer(encoding, compression, payload, expected, &name)?;
    log::trace!("layer '{name}' decoded {} tile codes", codes.len());
    MapLayer::from_codes(name, width, height, codes)
}
