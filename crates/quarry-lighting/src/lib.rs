//! Sky and block light propagation for 16-wide chunk columns.
#![forbid(unsafe_code)]

pub mod access;
pub mod engine;
pub mod error;
pub mod opacity;
pub mod pack;
pub mod value;

pub use access::{COLUMN_WIDTH, ColumnPos, SECTION_HEIGHT, VoxelAccess};
pub use engine::{BakeReport, BakeStats, LightPropagationEngine, bake_column, bake_columns};
pub use error::{LightError, VoxelError};
pub use opacity::{LightClass, OpacityClassifier, OpacityConfig, OpacityTable};
pub use pack::{
    PACKED_SECTION_LEN, PackedLight, SECTION_SIDE, SECTION_VOLUME, byte_index, decode,
    decode_section, encode, voxel_index,
};
pub use value::{LightValue, MAX_LIGHT};
