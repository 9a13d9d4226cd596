use super::Rgb;

/// Channel order expected by the strip
///
/// The strip driver transmits the `r`, `g`, `b` fields of each pixel in
/// that order. Strips wired for another order get their channels swapped
/// here before the frame reaches the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ChannelOrder {
    /// Reorder a logical color into wire order
    pub const fn apply(self, color: Rgb) -> Rgb {
        let Rgb { r, g, b } = color;
        let (first, second, third) = match self {
            Self::Rgb => (r, g, b),
            Self::Rbg => (r, b, g),
            Self::Grb => (g, r, b),
            Self::Gbr => (g, b, r),
            Self::Brg => (b, r, g),
            Self::Bgr => (b, g, r),
        };
        Rgb {
            r: first,
            g: second,
            b: third,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rbg => "rbg",
            Self::Grb => "grb",
            Self::Gbr => "gbr",
            Self::Brg => "brg",
            Self::Bgr => "bgr",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Some(match s {
            "rgb" => Self::Rgb,
            "rbg" => Self::Rbg,
            "grb" => Self::Grb,
            "gbr" => Self::Gbr,
            "brg" => Self::Brg,
            "bgr" => Self::Bgr,
            _ => return None,
        })
    }
}
