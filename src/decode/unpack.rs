use crate::error::{MapError, MismatchStage, Result};

/// Flipped horizontally (bit 31).
pub const FLIP_H: u32 = 0x8000_0000;
/// Flipped vertically (bit 30).
pub const FLIP_V: u32 = 0x4000_0000;
/// Flipped diagonally (bit 29).
pub const FLIP_D: u32 = 0x2000_0000;
/// Clears the three flip bits.
pub const GID_MASK: u32 = !(FLIP_H | FLIP_V | FLIP_D);

/// Orientation bits carried in the top three bits of a packed tile code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct FlipFlags {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl FlipFlags {
    /// True when no flip bit is set.
    #[inline]
    pub fn is_none(self) -> bool {
        !(self.horizontal || self.vertical || self.diagonal)
    }
}

/// A packed 32-bit tile code split into its global id and flip flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileCode {
    /// Global tile id, flip bits cleared.
    pub gid: u32,
    /// Flip bits found on the packed value.
    pub flip: FlipFlags,
}

impl TileCode {
    /// Splits a packed 32-bit code.
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        TileCode {
            gid: raw & GID_MASK,
            flip: FlipFlags {
                horizontal: (raw & FLIP_H) != 0,
                vertical: (raw & FLIP_V) != 0,
                diagonal: (raw & FLIP_D) != 0,
            },
        }
    }
}

/// Splits `bytes` into little-endian tile codes.
///
/// The buffer must hold exactly `expected * 4` bytes; anything else means the
/// payload (or its decompression) disagrees with the layer dimensions and
/// fails with [`MapError::SizeMismatch`] at the [`MismatchStage::Bytes`] stage.
pub fn unpack(bytes: &[u8], expected: usize, layer: &str) -> Result<Vec<TileCode>> {
    let expected_bytes = expected
        .checked_mul(4)
        .ok_or_else(|| MapError::InvalidArgument {
            name: "expected",
            reason: format!("{expected} tiles overflow the addressable byte count"),
        })?;

    if bytes.len() != expected_bytes {
        return Err(MapError::SizeMismatch {
            stage: MismatchStage::Bytes,
            layer: layer.to_owned(),
            expected: expected_bytes,
            actual: bytes.len(),
        });
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|c| TileCode::from_raw(u32::from_le_bytes([c[0], c[1], c[2], c[3]])))
        .collect())
}
