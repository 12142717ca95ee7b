use std::fs;

use super::*;

const IDENTITIES: &str = r#"
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
id = "minecraft:stained_glass"
numeric = "95"
introduced = "1.7.2"
material = "tinted"

[[biomes]]
id = "minecraft:plains"
numeric = "1"
introduced = "a1.0"
"#;

fn quarry(config: &str) -> Quarry {
    let cfg = QuarryConfig::from_toml_str(config).unwrap();
    Quarry::new(Registries::from_toml_str(IDENTITIES).unwrap(), &cfg)
}

#[test]
fn config_defaults_when_sections_missing() {
    let cfg = QuarryConfig::from_toml_str("").unwrap();
    assert!(cfg.identities.is_none());
    assert!(cfg.target_version.is_none());
    assert_eq!(cfg.lighting, OpacityConfig::default());

    let cfg = QuarryConfig::from_toml_str(r#"target_version = "b1.7.3""#).unwrap();
    assert_eq!(cfg.target_version, Some("b1.7.3".parse().unwrap()));
    assert!(QuarryConfig::from_toml_str(r#"target_version = "one""#).is_err());
}

#[test]
fn configured_materials_change_opacity() {
    let plain = quarry("");
    let tinted = quarry(
        r#"
        [lighting]
        transparent_materials = ["tinted"]
    "#,
    );
    let glass = plain.registries().blocks.find_by_name("stained_glass");
    assert_eq!(plain.opacity().opacity(glass), 15);
    assert_eq!(tinted.opacity().opacity(glass), 0);
}

#[test]
fn bake_then_store_for_target_version() {
    let _ = env_logger::builder().is_test(true).try_init();
    let q = quarry(r#"target_version = "1.12.2""#);
    let stone = q.registries().blocks.find_by_name("stone");
    let mut columns: Vec<ChunkColumn> = (0..3)
        .map(|i| {
            let mut c = ChunkColumn::new(ColumnPos::new(i, 0));
            for z in 0..16 {
                for x in 0..16 {
                    c.set_block(x, 0, z, stone).unwrap();
                }
            }
            c
        })
        .collect();
    let report = q.bake_lighting(&mut columns);
    assert!(report.is_clean());
    assert_eq!(columns[1].light(3, 4, 3).unwrap().sky_light(), 15);

    let stored = q.stored_blocks(&columns[0], 0, None).unwrap();
    assert_eq!(stored[0], StoredIdentity::Numeric(LegacyNumeric::new(1, 0)));
    assert_eq!(stored[256], StoredIdentity::Numeric(LegacyNumeric::new(0, 0)));

    let modern = q
        .stored_blocks(&columns[0], 0, Some("1.16.5".parse().unwrap()))
        .unwrap();
    assert_eq!(modern[0], StoredIdentity::Name("minecraft:stone".into()));
}

#[test]
fn storing_without_version_fails() {
    let q = quarry("");
    let mut col = ChunkColumn::new(ColumnPos::new(0, 0));
    col.set_block(0, 0, 0, q.registries().blocks.find_by_name("stone"))
        .unwrap();
    assert!(matches!(
        q.stored_blocks(&col, 0, None),
        Err(QuarryError::NoTargetVersion)
    ));
    assert!(matches!(
        q.stored_blocks(&col, 5, Some(VersionTag::FLATTENING)),
        Err(QuarryError::Chunk(ChunkError::MissingSection { .. }))
    ));
}

#[test]
fn load_resolves_identity_table_next_to_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("identities.toml"), IDENTITIES).unwrap();
    fs::write(
        dir.path().join("quarry.toml"),
        "identities = \"identities.toml\"\ntarget_version = \"1.18\"\n",
    )
    .unwrap();

    let q = Quarry::load(dir.path().join("quarry.toml")).unwrap();
    assert_eq!(q.registries().blocks.len(), 3);
    assert_eq!(q.registries().biomes.len(), 1);
}
