//! Layer data decoding: encoding dispatch, decompression and tile code unpacking.

mod compression;
mod stream;
mod unpack;

pub use compression::{decompress, Compression};
pub use stream::{decode_layer, Encoding, LayerPayload};
pub use unpack::{unpack, FlipFlags, TileCode, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub(crate) use stream::parse_gid;
