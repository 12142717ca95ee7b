use proptest::prelude::*;
use quarry_lighting::{LightValue, MAX_LIGHT, SECTION_VOLUME, decode, encode};

fn light() -> impl Strategy<Value = LightValue> {
    (0u8..=MAX_LIGHT, 0u8..=MAX_LIGHT).prop_map(|(b, s)| LightValue::new(b, s))
}

proptest! {
    // decode(encode(field)) == field for every legal even-length field
    #[test]
    fn pack_round_trip(pairs in proptest::collection::vec((light(), light()), 0..600)) {
        let field: Vec<LightValue> = pairs.into_iter().flat_map(|(a, b)| [a, b]).collect();
        let packed = encode(&field);
        prop_assert_eq!(packed.block.len(), field.len() / 2);
        prop_assert_eq!(decode(&packed.block, &packed.sky).unwrap(), field);
    }

    // A full section always packs to two 2048-byte arrays
    #[test]
    fn section_round_trip(seed in any::<u64>()) {
        let field: Vec<LightValue> = (0..SECTION_VOLUME as u64)
            .map(|i| LightValue::from_packed((i.wrapping_mul(seed | 1) >> 7) as u8))
            .collect();
        let packed = encode(&field);
        prop_assert_eq!(packed.sky.len(), SECTION_VOLUME / 2);
        prop_assert_eq!(packed.decode().unwrap(), field);
    }

    // Spreading never brightens a voxel
    #[test]
    fn attenuation_never_increases(v in light(), opacity in 0u8..=20) {
        prop_assert!(!v.attenuated().has_stronger_light_than(v));
        prop_assert!(!v.attenuated_downward().has_stronger_light_than(v));
        prop_assert!(!v.reduced_by(opacity).has_stronger_light_than(v));
    }

    // Only undiminished sunlight survives a downward step intact
    #[test]
    fn downward_keeps_only_full_sky(v in light()) {
        let down = v.attenuated_downward();
        if v.sky_light() == MAX_LIGHT {
            prop_assert_eq!(down.sky_light(), MAX_LIGHT);
        } else {
            prop_assert_eq!(down.sky_light(), v.sky_light().saturating_sub(1));
        }
        prop_assert_eq!(down.block_light(), v.block_light().saturating_sub(1));
    }

    // brightest is an upper bound that neither input exceeds
    #[test]
    fn brightest_dominates(a in light(), b in light()) {
        let m = a.brightest(b);
        prop_assert!(!a.has_stronger_light_than(m));
        prop_assert!(!b.has_stronger_light_than(m));
        prop_assert_eq!(a - m, LightValue::DARK);
    }
}
