use crate::decode::{FlipFlags, TileCode};
use crate::error::Result;
use crate::grid::{assemble, TileGrid};

/// One named grid of tile ids covering the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLayer {
    /// Layer name, empty when the document omits it.
    pub name: String,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Global tile ids with the flip bits stripped, indexed `[y][x]`.
    pub tile_ids: TileGrid<u32>,
    /// Flip bits extracted from each cell, same shape as `tile_ids`.
    pub flips: TileGrid<FlipFlags>,
}

impl MapLayer {
    /// Builds a layer from its decoded code stream, checking it covers `width x height` exactly.
    pub fn from_codes(name: String, width: u32, height: u32, codes: Vec<TileCode>) -> Result<Self> {
        let (w, h) = (width as usize, height as usize);
        let (gids, flips): (Vec<u32>, Vec<FlipFlags>) =
            codes.into_iter().map(|c| (c.gid, c.flip)).unzip();
        let tile_ids = assemble(gids, w, h, &name)?;
        let flips = assemble(flips, w, h, &name)?;
        Ok(MapLayer {
            name,
            width,
            height,
            tile_ids,
            flips,
        })
    }

    /// Stripped tile id at `(x, y)`; `None` outside the layer.
    pub fn gid_at(&self, x: u32, y: u32) -> Option<u32> {
        self.tile_ids.get(x as usize, y as usize).copied()
    }
}
