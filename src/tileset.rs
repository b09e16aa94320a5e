/// Image backing a tile-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSetImage {
    /// Path or URI, relative to the map file.
    pub source: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A named collection of same-sized tiles, owning global ids from `first_gid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    /// First global id owned by this tile-set.
    pub first_gid: u32,
    /// Tile-set name, empty when the document omits it.
    pub name: String,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Backing image.
    pub image: TileSetImage,
}
