use thiserror::Error;

/// Failure reported by a [`VoxelAccess`](crate::VoxelAccess) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoxelError {
    #[error("voxel ({x}, {y}, {z}) is outside the column")]
    OutOfBounds { x: usize, y: i32, z: usize },
    #[error("voxel ({x}, {y}, {z}) is unreadable: {reason}")]
    Corrupt {
        x: usize,
        y: i32,
        z: usize,
        reason: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LightError {
    #[error("malformed light data: block light has {block} bytes, sky light has {sky}")]
    MalformedLightData { block: usize, sky: usize },
    #[error("packed section light must be {expected} bytes, got {found}")]
    SectionLength { expected: usize, found: usize },
    #[error("sections {lowest}..={highest} exceed the addressable height range")]
    HeightRange { lowest: i32, highest: i32 },
    #[error(transparent)]
    Voxel(#[from] VoxelError),
}
