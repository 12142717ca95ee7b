use super::*;
use quarry_lighting::{OpacityConfig, OpacityTable, PACKED_SECTION_LEN};
use quarry_registry::{LegacyNumeric, Registries};

const BLOCKS: &str = r#"
[[blocks]]
id = "minecraft:air"
numeric = "0"
introduced = "a1.0"
material = "air"

[[blocks]]
id = "minecraft:stone"
numeric = "1"
introduced = "a1.0"

[[blocks]]
id = "minecraft:glowstone"
numeric = "89"
introduced = "1.0"
emission = 15

[[blocks]]
id = "minecraft:deepslate"
introduced = "1.17"
fallback = "minecraft:stone"

[[blocks]]
id = "minecraft:sculk"
introduced = "1.19"
"#;

fn setup() -> (Registries, OpacityTable) {
    let reg = Registries::from_toml_str(BLOCKS).unwrap();
    let table = OpacityTable::new(&reg.blocks, &OpacityConfig::default());
    (reg, table)
}

fn id(reg: &Registries, name: &str) -> IdentityId {
    reg.blocks.find_by_name(name).unwrap()
}

fn floor(col: &mut ChunkColumn, y: i32, block: IdentityId) {
    for z in 0..16 {
        for x in 0..16 {
            col.set_block(x, y, z, Some(block)).unwrap();
        }
    }
}

#[test]
fn sections_are_created_on_write() {
    let mut col = ChunkColumn::new(ColumnPos::new(3, -7));
    assert_eq!(col.lowest_populated_section(), None);
    col.set_block(0, -20, 0, None).unwrap();
    assert_eq!(col.lowest_populated_section(), None);

    col.set_block(1, -20, 2, Some(IdentityId(1))).unwrap();
    col.set_block(1, 70, 2, Some(IdentityId(1))).unwrap();
    assert_eq!(col.lowest_populated_section(), Some(-2));
    assert_eq!(col.highest_populated_section(), Some(4));
    assert_eq!(col.block(1, -20, 2).unwrap(), Some(IdentityId(1)));
    assert_eq!(col.block(1, 30, 2).unwrap(), None);
    assert_eq!(col.light(1, 30, 2).unwrap(), LightValue::DARK);
    assert!(matches!(
        col.block(16, 0, 0),
        Err(VoxelError::OutOfBounds { x: 16, .. })
    ));
}

#[test]
fn bake_fills_open_sky_above_floor() {
    let (reg, table) = setup();
    let mut col = ChunkColumn::new(ColumnPos::new(0, 0));
    floor(&mut col, 0, id(&reg, "stone"));
    col.set_block(0, 15, 0, None).unwrap();
    col.bake_lighting(&table).unwrap();
    for y in 1..16 {
        assert_eq!(col.light(7, y, 7).unwrap().sky_light(), 15);
    }
    assert_eq!(col.light(7, 0, 7).unwrap().sky_light(), 0);
    let before = col.clone();
    col.bake_lighting(&table).unwrap();
    for (sy, s) in before.sections() {
        assert_eq!(col.section(sy), Some(s));
    }
}

#[test]
fn bake_spans_gaps_between_sections() {
    let (reg, table) = setup();
    let mut col = ChunkColumn::new(ColumnPos::new(0, 0));
    floor(&mut col, -16, id(&reg, "stone"));
    col.set_block(4, 40, 4, Some(id(&reg, "stone"))).unwrap();
    col.bake_lighting(&table).unwrap();
    assert_eq!(col.light(4, 39, 4).unwrap().sky_light(), 14);
    assert_eq!(col.light(4, 10, 4).unwrap().sky_light(), 14);
    assert_eq!(col.light(5, 10, 4).unwrap().sky_light(), 15);
    assert_eq!(col.light(5, -15, 4).unwrap().sky_light(), 15);
    assert!(col.section(0).is_some());
}

#[test]
fn bake_at_the_ends_of_the_height_range() {
    let (reg, table) = setup();
    let stone = id(&reg, "stone");

    let mut top = ChunkColumn::new(ColumnPos::new(0, 0));
    top.set_block(0, i32::MAX, 0, Some(stone)).unwrap();
    assert!(matches!(
        top.bake_lighting(&table),
        Err(ChunkError::Light(LightError::HeightRange { .. }))
    ));

    let mut bottom = ChunkColumn::new(ColumnPos::new(0, 0));
    bottom.set_block(0, i32::MIN, 0, Some(stone)).unwrap();
    bottom.bake_lighting(&table).unwrap();
    assert_eq!(bottom.light(1, i32::MIN, 0).unwrap().sky_light(), 15);
    assert_eq!(bottom.light(0, i32::MIN, 0).unwrap().sky_light(), 0);
}

#[test]
fn glowstone_lights_a_sealed_room() {
    let (reg, table) = setup();
    let stone = id(&reg, "stone");
    let mut col = ChunkColumn::new(ColumnPos::new(0, 0));
    floor(&mut col, 0, stone);
    floor(&mut col, 15, stone);
    col.set_block(8, 5, 8, Some(id(&reg, "glowstone"))).unwrap();
    col.bake_lighting(&table).unwrap();
    assert_eq!(col.light(8, 5, 8).unwrap().block_light(), 15);
    assert_eq!(col.light(8, 6, 8).unwrap().block_light(), 14);
    assert_eq!(col.light(8, 5, 11).unwrap().block_light(), 12);
    assert_eq!(col.light(8, 7, 8).unwrap().sky_light(), 0);
}

#[test]
fn packed_light_survives_export_and_import() {
    let (reg, table) = setup();
    let mut col = ChunkColumn::new(ColumnPos::new(1, 1));
    floor(&mut col, 0, id(&reg, "stone"));
    for x in 0..10 {
        col.set_block(x, 9, 5, Some(id(&reg, "stone"))).unwrap();
    }
    col.bake_lighting(&table).unwrap();

    let packed = col.section_light_packed(0).unwrap();
    assert_eq!(packed.block.len(), PACKED_SECTION_LEN);
    assert_eq!(packed.sky.len(), PACKED_SECTION_LEN);

    let mut copy = ChunkColumn::new(ColumnPos::new(1, 1));
    copy.load_section_light(0, &packed.block, &packed.sky).unwrap();
    assert_eq!(
        copy.section(0).unwrap().light_field(),
        col.section(0).unwrap().light_field()
    );

    assert!(matches!(
        copy.load_section_light(0, &packed.block, &packed.sky[..100]),
        Err(ChunkError::Light(LightError::MalformedLightData { .. }))
    ));
    assert!(matches!(
        col.section_light_packed(3),
        Err(ChunkError::MissingSection { section_y: 3, .. })
    ));
}

#[test]
fn stored_blocks_follow_the_target_version() {
    let (reg, _) = setup();
    let mut col = ChunkColumn::new(ColumnPos::new(0, 0));
    col.set_block(0, 0, 0, Some(id(&reg, "deepslate"))).unwrap();
    col.set_block(1, 0, 0, Some(id(&reg, "sculk"))).unwrap();
    col.set_block(2, 0, 0, Some(id(&reg, "stone"))).unwrap();

    let old = col.stored_blocks(0, &reg.blocks, "1.12.2".parse().unwrap()).unwrap();
    assert_eq!(old.len(), SECTION_VOLUME);
    assert_eq!(old[0].to_string(), "1:0");
    assert_eq!(old[1].to_string(), "0:0");
    assert_eq!(old[2].to_string(), "1:0");
    assert_eq!(old[3].to_string(), "0:0");

    let new = col.stored_blocks(0, &reg.blocks, "1.20".parse().unwrap()).unwrap();
    assert_eq!(new[0], StoredIdentity::Name("minecraft:deepslate".into()));
    assert_eq!(new[1], StoredIdentity::Name("minecraft:sculk".into()));
    assert_eq!(new[3], StoredIdentity::Name("minecraft:air".into()));

    let mid = col.stored_blocks(0, &reg.blocks, "1.17.1".parse().unwrap()).unwrap();
    assert_eq!(mid[0], StoredIdentity::Name("minecraft:deepslate".into()));
    assert_eq!(mid[1], StoredIdentity::Name("minecraft:air".into()));
}

#[test]
fn stored_blocks_load_back() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (reg, _) = setup();
    let stone = id(&reg, "stone");
    let mut stored = vec![StoredIdentity::Numeric(LegacyNumeric::new(0, 0)); SECTION_VOLUME];
    stored[voxel_index(3, 4, 5)] = StoredIdentity::Numeric(LegacyNumeric::new(1, 0));
    stored[voxel_index(6, 0, 0)] = StoredIdentity::Name("mymod:unobtainium".into());

    let mut col = ChunkColumn::new(ColumnPos::new(0, 0));
    let unknown = col.load_stored_blocks(2, &stored, &reg.blocks).unwrap();
    assert_eq!(unknown, 1);
    assert_eq!(col.block(3, 36, 5).unwrap(), Some(stone));
    assert_eq!(col.block(6, 32, 0).unwrap(), None);
    assert_eq!(col.block(0, 32, 0).unwrap(), None);

    assert!(matches!(
        col.load_stored_blocks(2, &stored[..10], &reg.blocks),
        Err(ChunkError::BlockCount { found: 10, .. })
    ));
}

#[test]
fn batch_bake_over_columns() {
    let (reg, table) = setup();
    let stone = id(&reg, "stone");
    let mut columns: Vec<ChunkColumn> = (0..6)
        .map(|i| {
            let mut c = ChunkColumn::new(ColumnPos::new(i, 0));
            floor(&mut c, i, stone);
            c
        })
        .collect();
    let report = quarry_lighting::bake_columns(&mut columns, &table);
    assert!(report.is_clean());
    assert_eq!(report.baked.len(), 6);
    assert_eq!(columns[5].light(0, 6, 0).unwrap().sky_light(), 15);
    assert_eq!(columns[5].light(0, 5, 0).unwrap().sky_light(), 0);
}
