#![warn(missing_docs)]

//! Decoder for Tiled TMX maps into plain tile-id grids.
//!
//! ```no_run
//! let map = tmx_grid::parse_file("assets/level1.tmx")?;
//! let ground = map.layer("ground").expect("layer");
//! println!("{:?}", ground.tile_ids.row(0));
//! # Ok::<(), tmx_grid::MapError>(())
//! ```

pub mod decode;
mod error;
mod grid;
mod layer;
mod loader {
    pub mod document;
    pub mod tmx_loader;
}
mod map;
mod tileset;

pub use error::{MapError, MismatchStage, Result};
pub use grid::{assemble, TileGrid};
pub use layer::MapLayer;
pub use loader::tmx_loader::{
    parse_bytes, parse_file, parse_reader, parse_str, SUPPORTED_ORIENTATION, SUPPORTED_VERSION,
};
pub use map::{MapSize, TileMap};
pub use tileset::{TileSet, TileSetImage};
