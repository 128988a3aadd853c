use serde::{Deserialize, Serialize};

/// Logical screen area that may need repainting in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffectedRegion {
    ChartWindow,
    Minimap,
    MinimapOverlay,
    XScale,
    YScale,
}

impl AffectedRegion {
    pub const ALL: [Self; 5] = [
        Self::ChartWindow,
        Self::Minimap,
        Self::MinimapOverlay,
        Self::XScale,
        Self::YScale,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::ChartWindow => 1 << 0,
            Self::Minimap => 1 << 1,
            Self::MinimapOverlay => 1 << 2,
            Self::XScale => 1 << 3,
            Self::YScale => 1 << 4,
        }
    }
}

/// Bitmask set of [`AffectedRegion`] values.
///
/// Frame drivers clear one of these per frame, let the scheduler union the
/// regions of running tweens into it, then add dirty-flag regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AffectedRegions {
    bits: u8,
}

impl AffectedRegions {
    const ALL_BITS: u8 = AffectedRegion::ChartWindow.bit()
        | AffectedRegion::Minimap.bit()
        | AffectedRegion::MinimapOverlay.bit()
        | AffectedRegion::XScale.bit()
        | AffectedRegion::YScale.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_region(region: AffectedRegion) -> Self {
        Self { bits: region.bit() }
    }

    #[must_use]
    pub const fn with(self, region: AffectedRegion) -> Self {
        Self {
            bits: self.bits | region.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub fn insert(&mut self, region: AffectedRegion) {
        self.bits |= region.bit();
    }

    pub fn merge(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    #[must_use]
    pub const fn contains(self, region: AffectedRegion) -> bool {
        (self.bits & region.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = AffectedRegion> {
        AffectedRegion::ALL
            .into_iter()
            .filter(move |region| self.contains(*region))
    }
}

impl FromIterator<AffectedRegion> for AffectedRegions {
    fn from_iter<I: IntoIterator<Item = AffectedRegion>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::none(), |regions, region| regions.with(region))
    }
}
