//! Global tile ids and their bit-packed flip flags.

/// Horizontal flip flag (bit 31).
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip flag (bit 30).
pub const FLIP_V: u32 = 0x4000_0000;
/// Diagonal (anti-diagonal transpose) flip flag (bit 29).
pub const FLIP_D: u32 = 0x2000_0000;
/// Mask keeping the low 29 bits that form the actual tile id.
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// A raw global tile id as stored in Tiled layer data.
///
/// The top three bits are render-time flip flags; every tileset or collision
/// lookup must go through [`Gid::actual`] first. A raw value of `0` means
/// "no tile".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gid(pub u32);

impl Gid {
    /// The raw value including flip flags.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The actual tile id with all flip flags stripped.
    #[inline]
    pub fn actual(self) -> u32 {
        self.0 & GID_MASK
    }

    /// True when the cell holds no tile at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.actual() == 0
    }

    /// Horizontal flip flag.
    #[inline]
    pub fn flip_h(self) -> bool {
        (self.0 & FLIP_H) != 0
    }

    /// Vertical flip flag.
    #[inline]
    pub fn flip_v(self) -> bool {
        (self.0 & FLIP_V) != 0
    }

    /// Diagonal (transpose) flip flag.
    #[inline]
    pub fn flip_d(self) -> bool {
        (self.0 & FLIP_D) != 0
    }
}
