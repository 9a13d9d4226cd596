mod tests {
    use keyglow::color::{ChannelOrder, LedColor, Rgb, unit_to_u8, wrap_hue};

    const COLOR: Rgb = Rgb { r: 1, g: 2, b: 3 };

    #[test]
    fn test_led_color_clamps() {
        let color = LedColor::new(10, 1.5, -0.25);
        assert_eq!(color.sat, 1.0);
        assert_eq!(color.val, 0.0);
        assert_eq!(color.with_value(2.0).val, 1.0);
    }

    #[test]
    fn test_led_color_to_rgb() {
        assert_eq!(LedColor::new(0, 1.0, 1.0).to_rgb(), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(LedColor::BLACK.to_rgb(), Rgb::default());
        assert_eq!(LedColor::new(0, 0.0, 1.0).to_rgb(), Rgb { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn test_from_hsv8() {
        let color = LedColor::from_hsv8(42, 255, 0);
        assert_eq!(color.hue, 42);
        assert_eq!(color.sat, 1.0);
        assert_eq!(color.to_hsv().val, 0);
    }

    #[test]
    fn test_unit_to_u8() {
        assert_eq!(unit_to_u8(0.0), 0);
        assert_eq!(unit_to_u8(0.5), 128);
        assert_eq!(unit_to_u8(1.0), 255);
        assert_eq!(unit_to_u8(7.0), 255);
    }

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(0.0), 0);
        assert_eq!(wrap_hue(255.9), 255);
        assert_eq!(wrap_hue(256.0), 0);
        assert_eq!(wrap_hue(-0.5), 0);
        assert_eq!(wrap_hue(-1.0), 255);
        assert_eq!(wrap_hue(-42.5), 214);
    }

    #[test]
    fn test_channel_order() {
        assert_eq!(ChannelOrder::Rgb.apply(COLOR), Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(ChannelOrder::Grb.apply(COLOR), Rgb { r: 2, g: 1, b: 3 });
        assert_eq!(ChannelOrder::Bgr.apply(COLOR), Rgb { r: 3, g: 2, b: 1 });
        assert_eq!(ChannelOrder::Brg.apply(COLOR), Rgb { r: 3, g: 1, b: 2 });
    }

    #[test]
    fn test_channel_order_names() {
        assert_eq!(ChannelOrder::parse_from_str("grb"), Some(ChannelOrder::Grb));
        assert_eq!(ChannelOrder::Gbr.as_str(), "gbr");
        assert_eq!(ChannelOrder::parse_from_str("rgbw"), None);
    }
}
