/// Colour specification parser for render surfaces
///
/// Accepts single-letter codes (`"k"`, `"r"`), a few colour names, hex
/// strings (`"#ff8800"`, `"#f80"`), grayscale levels (`"0.5"`) and the
/// default cycle colours `"C0"`..`"C9"`.
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{alpha1, one_of},
    combinator::{all_consuming, map, map_opt, map_res},
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite this colour with opacity `alpha` over `background`
    pub fn blend(&self, background: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f64 * a + bg as f64 * (1.0 - a)).round() as u8;
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Default colour cycle
const CYCLE: [Rgb; 10] = [
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0x17, 0xbe, 0xcf),
];

/// Parse a colour specification
pub fn parse_color(input: &str) -> Result<Rgb> {
    match all_consuming(color)(input.trim()) {
        Ok((_, rgb)) => Ok(rgb),
        Err(_) => Err(Error::InvalidStyle(format!("color {:?}", input))),
    }
}

fn color(input: &str) -> IResult<&str, Rgb> {
    alt((hex_color, cycle_color, gray_level, named_color))(input)
}

fn hex_color(input: &str) -> IResult<&str, Rgb> {
    preceded(tag("#"), alt((hex6, hex3)))(input)
}

fn hex6(input: &str) -> IResult<&str, Rgb> {
    let (input, r) = hex_byte(input)?;
    let (input, g) = hex_byte(input)?;
    let (input, b) = hex_byte(input)?;
    Ok((input, Rgb::new(r, g, b)))
}

fn hex3(input: &str) -> IResult<&str, Rgb> {
    let (input, r) = hex_nibble(input)?;
    let (input, g) = hex_nibble(input)?;
    let (input, b) = hex_nibble(input)?;
    Ok((input, Rgb::new(r * 17, g * 17, b * 17)))
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn hex_nibble(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn cycle_color(input: &str) -> IResult<&str, Rgb> {
    map(preceded(tag("C"), one_of("0123456789")), |d: char| {
        CYCLE[d as usize - '0' as usize]
    })(input)
}

fn gray_level(input: &str) -> IResult<&str, Rgb> {
    map_opt(double, |level: f64| {
        if (0.0..=1.0).contains(&level) {
            let v = (level * 255.0).round() as u8;
            Some(Rgb::new(v, v, v))
        } else {
            None
        }
    })(input)
}

fn named_color(input: &str) -> IResult<&str, Rgb> {
    map_opt(alpha1, lookup_name)(input)
}

fn lookup_name(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "b" | "blue" => Rgb::new(0, 0, 255),
        "g" | "green" => Rgb::new(0, 128, 0),
        "r" | "red" => Rgb::new(255, 0, 0),
        "c" | "cyan" => Rgb::new(0, 191, 191),
        "m" | "magenta" => Rgb::new(191, 0, 191),
        "y" | "yellow" => Rgb::new(191, 191, 0),
        "k" | "black" => Rgb::BLACK,
        "w" | "white" => Rgb::WHITE,
        "gray" | "grey" => Rgb::new(128, 128, 128),
        "orange" => Rgb::new(255, 165, 0),
        _ => return None,
    };
    Some(rgb)
}
