mod tests {
    use keyglow::{EFFECT_COUNT, EffectId};

    #[test]
    fn test_effect_id_raw_matches_position() {
        assert_eq!(EffectId::ALL.len(), EFFECT_COUNT);
        for (raw, id) in (0u8..).zip(EffectId::ALL) {
            assert_eq!(id.to_raw(), raw);
            assert_eq!(EffectId::from_raw(raw), Some(id));
        }
        assert_eq!(EffectId::from_raw(12), None);
    }

    #[test]
    fn test_effect_id_names_round_trip() {
        for id in EffectId::ALL {
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_effect_id_parse_reactive_fade() {
        assert_eq!(
            EffectId::parse_from_str("reactive_fade"),
            Some(EffectId::ReactiveFade)
        );
        assert_eq!(EffectId::ReactiveFade.to_raw(), 3);
    }

    #[test]
    fn test_effect_id_parse_rainbow_reactive() {
        assert_eq!(
            EffectId::parse_from_str("rainbow_reactive"),
            Some(EffectId::RainbowReactive)
        );
        assert_eq!(EffectId::from_raw(11), Some(EffectId::RainbowReactive));
    }

    #[test]
    fn test_effect_id_to_slot() {
        for id in EffectId::ALL {
            assert_eq!(id.to_slot().id(), id);
        }
    }

    #[test]
    fn test_effect_id_unknown_name() {
        assert_eq!(EffectId::parse_from_str("aurora"), None);
    }
}
