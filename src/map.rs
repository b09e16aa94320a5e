use crate::layer::MapLayer;
use crate::tileset::TileSet;

/// Map dimensions in tiles, and the size of one tile in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSize {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
}

/// A decoded map: size, tile-sets and layers in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    /// Map dimensions.
    pub size: MapSize,
    /// Tile-sets in document order.
    pub tilesets: Vec<TileSet>,
    /// Layers in document order.
    pub layers: Vec<MapLayer>,
}

impl TileMap {
    /// First layer named `name`.
    pub fn layer(&self, name: &str) -> Option<&MapLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Resolves a stripped gid to its owning tile-set and the tile's local id.
    ///
    /// The owner is the tile-set with the greatest `first_gid` not above `gid`.
    /// Gid 0 is the empty cell and resolves to nothing.
    pub fn tileset_for_gid(&self, gid: u32) -> Option<(&TileSet, u32)> {
        if gid == 0 {
            return None;
        }
        self.tilesets
            .iter()
            .filter(|ts| ts.first_gid <= gid)
            .max_by_key(|ts| ts.first_gid)
            .map(|ts| (ts, gid - ts.first_gid))
    }
}
