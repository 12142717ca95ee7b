use std::ops::Sub;

/// Highest level either light channel can hold.
pub const MAX_LIGHT: u8 = 15;

/// Block light and sky light of one voxel, packed into a byte.
///
/// Block light occupies the high nibble, sky light the low nibble, so
/// `block = 10, sky = 5` is the byte `0xA5`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct LightValue(u8);

impl LightValue {
    pub const DARK: LightValue = LightValue(0);
    /// Unobstructed sunlight and no block light.
    pub const FULL_SKY: LightValue = LightValue(MAX_LIGHT);

    #[inline]
    pub fn new(block: u8, sky: u8) -> Self {
        Self((block.min(MAX_LIGHT) << 4) | sky.min(MAX_LIGHT))
    }

    #[inline]
    pub const fn from_packed(byte: u8) -> Self {
        Self(byte)
    }

    #[inline]
    pub const fn packed(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn block_light(self) -> u8 {
        self.0 >> 4
    }

    #[inline]
    pub const fn sky_light(self) -> u8 {
        self.0 & 0x0F
    }

    #[inline]
    pub fn with_block_light(self, v: u8) -> Self {
        Self::new(v, self.sky_light())
    }

    #[inline]
    pub fn with_sky_light(self, v: u8) -> Self {
        Self::new(self.block_light(), v)
    }

    #[inline]
    pub fn is_dark(self) -> bool {
        self.0 == 0
    }

    /// One step sideways or upward.
    #[inline]
    pub fn attenuated(self) -> Self {
        Self::new(
            self.block_light().saturating_sub(1),
            self.sky_light().saturating_sub(1),
        )
    }

    /// One step downward. Full sunlight keeps falling without loss; any
    /// sky light already below the maximum keeps decaying.
    #[inline]
    pub fn attenuated_downward(self) -> Self {
        let sky = self.sky_light();
        let sky = if sky < MAX_LIGHT { sky.saturating_sub(1) } else { sky };
        Self::new(self.block_light().saturating_sub(1), sky)
    }

    /// Light left after entering a voxel of the given opacity.
    #[inline]
    pub fn reduced_by(self, opacity: u8) -> Self {
        if opacity >= MAX_LIGHT {
            return Self::DARK;
        }
        Self::new(
            self.block_light().saturating_sub(opacity),
            self.sky_light().saturating_sub(opacity),
        )
    }

    /// True if either channel exceeds the matching channel of `other`.
    #[inline]
    pub fn has_stronger_light_than(self, other: LightValue) -> bool {
        self.block_light() > other.block_light() || self.sky_light() > other.sky_light()
    }

    /// Channel-wise maximum.
    #[inline]
    pub fn brightest(self, other: LightValue) -> Self {
        Self::new(
            self.block_light().max(other.block_light()),
            self.sky_light().max(other.sky_light()),
        )
    }
}

impl Sub for LightValue {
    type Output = LightValue;

    fn sub(self, rhs: LightValue) -> LightValue {
        LightValue::new(
            self.block_light().saturating_sub(rhs.block_light()),
            self.sky_light().saturating_sub(rhs.sky_light()),
        )
    }
}

impl From<u8> for LightValue {
    fn from(byte: u8) -> Self {
        LightValue::from_packed(byte)
    }
}
