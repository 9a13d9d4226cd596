mod common;

mod tests {
    use keyglow::topology::{Layout, Topology, TopologyConfig};
    use keyglow::Error;

    use super::common::topology_2x3;

    const SERPENTINE: Layout<2, 3> = Layout::new([
        [Some(0), Some(1), Some(2)],
        [Some(5), Some(4), Some(3)],
    ]);

    #[test]
    fn test_positional_map_is_identity_for_same_layout() {
        let keys = Layout::new([[Some(0), Some(1)], [Some(2), Some(3)]]);
        let topology = Topology::build(&TopologyConfig::new(keys, 4)).unwrap();
        for key in 0..4 {
            assert_eq!(topology.led_for_key(key), Some(key));
        }
    }

    #[test]
    fn test_default_config() {
        let topology = Topology::<2, 4>::build(&TopologyConfig::default()).unwrap();
        assert_eq!(topology.num_leds(), 8);
        assert_eq!(topology.led_at(1, 2), Some(6));
        assert_eq!(topology.led_for_key(6), Some(6));
    }

    #[test]
    fn test_positional_map_follows_led_matrix() {
        let config = TopologyConfig {
            leds: Some(SERPENTINE),
            ..TopologyConfig::new(Layout::row_major(), 6)
        };
        let topology = Topology::build(&config).unwrap();

        assert_eq!(topology.led_for_key(0), Some(0));
        assert_eq!(topology.led_for_key(3), Some(5));
        assert_eq!(topology.led_for_key(5), Some(3));
        assert_eq!(topology.led_at(1, 0), Some(5));
    }

    #[test]
    fn test_positional_count_mismatch() {
        let leds = Layout::new([[Some(0), Some(1), None], [Some(2), None, None]]);
        let config = TopologyConfig {
            leds: Some(leds),
            ..TopologyConfig::new(Layout::row_major(), 6)
        };
        assert_eq!(
            Topology::build(&config).unwrap_err(),
            Error::TopologyMismatch { keys: 6, leds: 3 }
        );
    }

    #[test]
    fn test_led_out_of_range() {
        let result = Topology::build(&TopologyConfig::new(Layout::<2, 3>::row_major(), 5));
        assert_eq!(result.unwrap_err(), Error::LedOutOfRange(5));
    }

    #[test]
    fn test_duplicate_led_in_matrix() {
        let leds = Layout::new([[Some(0), Some(1)], [Some(1), Some(2)]]);
        let config = TopologyConfig {
            leds: Some(leds),
            ..TopologyConfig::new(Layout::row_major(), 4)
        };
        assert_eq!(Topology::build(&config).unwrap_err(), Error::DuplicateLed(1));
    }

    #[test]
    fn test_duplicate_key_in_layout() {
        let keys = Layout::new([[Some(0), Some(1)], [Some(1), None]]);
        let result = Topology::build(&TopologyConfig::new(keys, 4));
        assert_eq!(result.unwrap_err(), Error::DuplicateKey(1));
    }

    #[test]
    fn test_key_out_of_range() {
        let keys = Layout::new([[Some(0), Some(9)]]);
        let result = Topology::build(&TopologyConfig::new(keys, 2));
        assert_eq!(result.unwrap_err(), Error::KeyOutOfRange(9));
    }

    #[test]
    fn test_explicit_table() {
        let table: [(u16, Option<u16>); 3] = [(0, Some(1)), (1, Some(0)), (2, None)];
        let config = TopologyConfig {
            key_leds: Some(&table),
            ..TopologyConfig::new(Layout::<1, 3>::row_major(), 3)
        };
        let topology = Topology::build(&config).unwrap();

        assert_eq!(topology.led_for_key(0), Some(1));
        assert_eq!(topology.led_for_key(1), Some(0));
        assert_eq!(topology.led_for_key(2), None);
        assert_eq!(topology.led_for_key(7), None);
    }

    #[test]
    fn test_key_layout_padded_to_led_matrix() {
        // Three key columns on a four column LED matrix
        let keys = Layout::new([
            [Some(0), Some(1), Some(2), None],
            [None, Some(3), Some(4), None],
        ]);
        let leds = Layout::new([
            [Some(0), Some(1), Some(2), Some(3)],
            [Some(7), Some(6), Some(5), Some(4)],
        ]);

        let positional = TopologyConfig {
            leds: Some(leds),
            ..TopologyConfig::new(keys, 8)
        };
        assert_eq!(
            Topology::build(&positional).unwrap_err(),
            Error::TopologyMismatch { keys: 5, leds: 8 }
        );

        let table: [(u16, Option<u16>); 5] =
            [(0, Some(0)), (1, Some(1)), (2, Some(2)), (3, Some(6)), (4, Some(5))];
        let config = TopologyConfig {
            key_leds: Some(&table),
            ..positional
        };
        let topology = Topology::build(&config).unwrap();

        assert_eq!(topology.num_cols(), 4);
        assert_eq!(topology.led_at(1, 3), Some(4));
        assert_eq!(topology.led_for_key(3), Some(6));
        assert_eq!(topology.led_for_key(4), Some(5));
        assert_eq!(topology.led_for_key(7), None);
        assert_eq!(topology.matrix().serpentine().count(), 8);
    }

    #[test]
    fn test_explicit_table_rejects_shared_led() {
        let table: [(u16, Option<u16>); 2] = [(0, Some(1)), (1, Some(1))];
        let config = TopologyConfig {
            key_leds: Some(&table),
            ..TopologyConfig::new(Layout::<1, 3>::row_major(), 3)
        };
        assert_eq!(Topology::build(&config).unwrap_err(), Error::DuplicateLed(1));
    }

    #[test]
    fn test_explicit_table_rejects_repeated_key() {
        let table: [(u16, Option<u16>); 2] = [(0, Some(0)), (0, Some(1))];
        let config = TopologyConfig {
            key_leds: Some(&table),
            ..TopologyConfig::new(Layout::<1, 3>::row_major(), 3)
        };
        assert_eq!(Topology::build(&config).unwrap_err(), Error::DuplicateKey(0));
    }

    #[test]
    fn test_explicit_table_rejects_missing_led() {
        let table: [(u16, Option<u16>); 1] = [(0, Some(3))];
        let config = TopologyConfig {
            key_leds: Some(&table),
            ..TopologyConfig::new(Layout::<1, 3>::row_major(), 3)
        };
        assert_eq!(Topology::build(&config).unwrap_err(), Error::LedOutOfRange(3));
    }

    #[test]
    fn test_key_led_map_is_injective() {
        let topology = topology_2x3();
        let mut seen = [false; 6];
        for led in topology.key_leds().iter().flatten() {
            assert!(!seen[usize::from(*led)]);
            seen[usize::from(*led)] = true;
        }
    }

    #[test]
    fn test_serpentine_walk() {
        let path: Vec<u16> = SERPENTINE.view().serpentine().collect();
        assert_eq!(path, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_serpentine_skips_empty_cells() {
        let matrix = Layout::new([[Some(0), None, Some(1)], [None, Some(2), Some(3)]]);
        let path: Vec<u16> = matrix.view().serpentine().collect();
        assert_eq!(path, [0, 1, 3, 2]);
    }

    #[test]
    fn test_matrix_lines() {
        let matrix = SERPENTINE.view();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
        assert_eq!(matrix.column(0).collect::<Vec<_>>(), [0, 5]);
        assert_eq!(matrix.row(1), [Some(5), Some(4), Some(3)]);
        assert!(matrix.row(2).is_empty());
        assert_eq!(matrix.get(0, 3), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::TopologyMismatch { keys: 6, leds: 3 }.to_string(),
            "The key layout has 6 keys but the LED matrix has 3 LEDs."
        );
        assert_eq!(
            Error::DuplicateLed(4).to_string(),
            "LED index 4 is used more than once."
        );
        assert_eq!(
            Error::MatrixTooLarge(272).to_string(),
            "The LED matrix holds 272 LEDs, more than the snake path capacity."
        );
    }
}
