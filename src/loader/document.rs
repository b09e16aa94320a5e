// Serde view of the TMX document. Only the elements and attributes the
// decoder reads are declared; everything else is skipped.
use crate::error::{MapError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{DeError, Reader};
use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct RawMap {
    #[serde(rename = "@width")]
    pub width: u32,
    #[serde(rename = "@height")]
    pub height: u32,
    #[serde(rename = "@tilewidth")]
    pub tilewidth: u32,
    #[serde(rename = "@tileheight")]
    pub tileheight: u32,
    #[serde(rename = "tileset", default)]
    pub tilesets: Vec<RawTileSet>,
    #[serde(rename = "layer", default)]
    pub layers: Vec<RawLayer>,
}

#[derive(Deserialize)]
pub(crate) struct RawTileSet {
    #[serde(rename = "@firstgid")]
    pub firstgid: u32,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@tilewidth")]
    pub tilewidth: u32,
    #[serde(rename = "@tileheight")]
    pub tileheight: u32,
    pub image: Option<RawImage>,
}

#[derive(Deserialize)]
pub(crate) struct RawImage {
    #[serde(rename = "@source", default)]
    pub source: String,
    #[serde(rename = "@width")]
    pub width: u32,
    #[serde(rename = "@height")]
    pub height: u32,
}

#[derive(Deserialize)]
pub(crate) struct RawLayer {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@width")]
    pub width: u32,
    #[serde(rename = "@height")]
    pub height: u32,
    pub data: Option<RawData>,
}

#[derive(Deserialize)]
pub(crate) struct RawData {
    #[serde(rename = "@encoding")]
    pub encoding: Option<String>,
    #[serde(rename = "@compression")]
    pub compression: Option<String>,
    #[serde(rename = "$text", default)]
    pub text: String,
    #[serde(rename = "tile", default)]
    pub tiles: Vec<RawTile>,
}

#[derive(Deserialize)]
pub(crate) struct RawTile {
    // the editor writes `<tile/>` for empty cells
    #[serde(rename = "@gid")]
    pub gid: Option<String>,
}

/// Name and format attributes of the document's root element.
pub(crate) struct RootTag {
    pub name: String,
    pub version: Option<String>,
    pub orientation: Option<String>,
}

/// Reads the root start tag alone, so its format attributes can be checked
/// before the rest of the document is deserialized. `None` when there is no root.
pub(crate) fn read_root(xml: &str) -> Result<Option<RootTag>> {
    let mut reader = Reader::from_str(xml);
    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match event {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(Some(RootTag {
                    name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                    version: attribute(&e, "version")?,
                    orientation: attribute(&e, "orientation")?,
                }));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn attribute(tag: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match tag.try_get_attribute(name).map_err(xml_error)? {
        Some(attr) => Ok(Some(attr.unescape_value().map_err(xml_error)?.into_owned())),
        None => Ok(None),
    }
}

fn xml_error(e: impl Into<quick_xml::Error>) -> MapError {
    MapError::Document(DeError::from(e.into()))
}

pub(crate) fn read_map(xml: &str) -> Result<RawMap> {
    Ok(quick_xml::de::from_str(xml)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_root_after_prolog() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- exported -->
<map version="1.0"/>"#;
        let root = read_root(xml).unwrap().unwrap();
        assert_eq!(root.name, "map");
        assert_eq!(root.version.as_deref(), Some("1.0"));
        assert_eq!(root.orientation, None);
    }

    #[test]
    fn root_attributes_need_no_other_fields() {
        let root = read_root(r#"<map version="0.9" orientation="iso&amp;metric">"#)
            .unwrap()
            .unwrap();
        assert_eq!(root.version.as_deref(), Some("0.9"));
        assert_eq!(root.orientation.as_deref(), Some("iso&metric"));
    }

    #[test]
    fn empty_document_has_no_root() {
        assert!(read_root("").unwrap().is_none());
        assert!(read_root("<?xml version=\"1.0\"?>\n").unwrap().is_none());
    }

    #[test]
    fn reads_interleaved_layers_and_skips_unknown_elements() {
        let xml = r#"<map version="1.0" orientation="orthogonal" width="1" height="1" tilewidth="8" tileheight="8">
  <properties><property name="p" value="1"/></properties>
  <tileset firstgid="1" name="a" tilewidth="8" tileheight="8"><image source="a.png" width="8" height="8"/></tileset>
  <layer name="one" width="1" height="1"><data encoding="csv">1</data></layer>
  <objectgroup name="objs"/>
  <layer name="two" width="1" height="1"><data><tile gid="2"/></data></layer>
</map>"#;
        let raw = read_map(xml).unwrap();
        assert_eq!(raw.tilesets.len(), 1);
        assert_eq!(raw.layers.len(), 2);
        let one = raw.layers[0].data.as_ref().unwrap();
        assert_eq!(one.encoding.as_deref(), Some("csv"));
        assert_eq!(one.text.trim(), "1");
        let two = raw.layers[1].data.as_ref().unwrap();
        assert_eq!(two.tiles.len(), 1);
        assert_eq!(two.tiles[0].gid.as_deref(), Some("2"));
    }

    #[test]
    fn non_numeric_attribute_is_document_error() {
        let xml = r#"<map version="1.0" orientation="orthogonal" width="wide" height="1" tilewidth="8" tileheight="8"/>"#;
        assert!(matches!(read_map(xml), Err(MapError::Document(_))));
    }
}
