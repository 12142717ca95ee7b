use quarry_registry::IdentityId;

use crate::error::VoxelError;
use crate::value::LightValue;

/// Height of one vertical section of a column.
pub const SECTION_HEIGHT: i32 = 16;
/// Horizontal extent of a column along x and z.
pub const COLUMN_WIDTH: usize = 16;

/// Chunk-column coordinate in the world grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl std::fmt::Display for ColumnPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// Voxel storage of one 16-wide column, as seen by the light engine.
///
/// `x` and `z` are local to the column (`0..16`); `y` is an absolute block
/// height and may span several sections. `None` from [`block`](Self::block)
/// is empty space.
pub trait VoxelAccess {
    fn position(&self) -> ColumnPos;

    fn block(&self, x: usize, y: i32, z: usize) -> Result<Option<IdentityId>, VoxelError>;

    fn light(&self, x: usize, y: i32, z: usize) -> Result<LightValue, VoxelError>;

    fn set_light(&mut self, x: usize, y: i32, z: usize, value: LightValue)
    -> Result<(), VoxelError>;

    /// Section index (`y / 16`) of the lowest section holding data.
    fn lowest_populated_section(&self) -> Option<i32>;

    fn highest_populated_section(&self) -> Option<i32>;
}
