//! Residue color table.
//!
//! Maps each of the 20 standard one-letter amino acid codes to a display
//! color chosen by chemical class (Clustal X palette). Everything else,
//! including the gap symbol `-`, resolves to [`FALLBACK_COLOR`].
//!
//! Lookups are case-sensitive: callers are expected to pass uppercased
//! residues (see [`crate::validate`]).

use std::fmt;

/// An opaque display color, printable as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Returns the `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(rgb: Rgb) -> Self {
        ratatui::style::Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(rgb: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
        }
    }
}

/// Neutral color for gaps and any code outside the table.
pub const FALLBACK_COLOR: Rgb = Rgb::from_hex(0xf0f0f0);

/// The residue alphabet accepted at the input boundary, gap included.
pub const ALPHABET: &str = "ARNDCQEGHILKMFPSTWYV-";

/// Chemical class used to group residue colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    Hydrophobic,
    Positive,
    Negative,
    Polar,
    Aromatic,
    Cysteine,
    Glycine,
    Proline,
}

impl ResidueClass {
    /// All classes, in legend order.
    pub const ALL: [ResidueClass; 8] = [
        ResidueClass::Hydrophobic,
        ResidueClass::Positive,
        ResidueClass::Negative,
        ResidueClass::Polar,
        ResidueClass::Aromatic,
        ResidueClass::Cysteine,
        ResidueClass::Glycine,
        ResidueClass::Proline,
    ];

    pub fn color(self) -> Rgb {
        match self {
            ResidueClass::Hydrophobic => Rgb::from_hex(0x80a0f0),
            ResidueClass::Positive => Rgb::from_hex(0xf01505),
            ResidueClass::Negative => Rgb::from_hex(0xc048c0),
            ResidueClass::Polar => Rgb::from_hex(0x15c015),
            ResidueClass::Aromatic => Rgb::from_hex(0x15a4a4),
            ResidueClass::Cysteine => Rgb::from_hex(0xf08080),
            ResidueClass::Glycine => Rgb::from_hex(0xf09048),
            ResidueClass::Proline => Rgb::from_hex(0xc0c000),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResidueClass::Hydrophobic => "hydrophobic",
            ResidueClass::Positive => "positive",
            ResidueClass::Negative => "negative",
            ResidueClass::Polar => "polar",
            ResidueClass::Aromatic => "aromatic",
            ResidueClass::Cysteine => "cysteine",
            ResidueClass::Glycine => "glycine",
            ResidueClass::Proline => "proline",
        }
    }

    /// Residue codes belonging to this class, in table order.
    pub fn members(self) -> impl Iterator<Item = char> {
        COLOR_TABLE
            .iter()
            .filter(move |(_, class)| *class == self)
            .map(|(code, _)| *code)
    }
}

/// The canonical table: one entry per standard amino acid code.
pub const COLOR_TABLE: [(char, ResidueClass); 20] = [
    ('A', ResidueClass::Hydrophobic),
    ('R', ResidueClass::Positive),
    ('N', ResidueClass::Polar),
    ('D', ResidueClass::Negative),
    ('C', ResidueClass::Cysteine),
    ('Q', ResidueClass::Polar),
    ('E', ResidueClass::Negative),
    ('G', ResidueClass::Glycine),
    ('H', ResidueClass::Aromatic),
    ('I', ResidueClass::Hydrophobic),
    ('L', ResidueClass::Hydrophobic),
    ('K', ResidueClass::Positive),
    ('M', ResidueClass::Hydrophobic),
    ('F', ResidueClass::Hydrophobic),
    ('P', ResidueClass::Proline),
    ('S', ResidueClass::Polar),
    ('T', ResidueClass::Polar),
    ('W', ResidueClass::Hydrophobic),
    ('Y', ResidueClass::Aromatic),
    ('V', ResidueClass::Hydrophobic),
];

/// Returns the chemical class of a standard residue code.
pub fn class_of(code: char) -> Option<ResidueClass> {
    COLOR_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, class)| *class)
}

/// Returns the display color of a residue, or [`FALLBACK_COLOR`].
pub fn color_of(code: char) -> Rgb {
    class_of(code).map_or(FALLBACK_COLOR, ResidueClass::color)
}

/// Returns true if `c` belongs to the accepted alphabet, ignoring case.
pub fn is_accepted(c: char) -> bool {
    ALPHABET.contains(c.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_standard_codes() {
        let codes: String = COLOR_TABLE.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), 20);
        for c in "ARNDCQEGHILKMFPSTWYV".chars() {
            assert!(class_of(c).is_some(), "missing {c}");
            assert_ne!(color_of(c), FALLBACK_COLOR);
        }
    }

    #[test]
    fn test_color_is_deterministic() {
        for (code, _) in COLOR_TABLE {
            assert_eq!(color_of(code), color_of(code));
        }
        assert_eq!(color_of('K'), color_of('R'));
        assert_ne!(color_of('K'), color_of('D'));
    }

    #[test]
    fn test_fallback_for_unknown_codes() {
        assert_eq!(color_of('-'), FALLBACK_COLOR);
        assert_eq!(color_of('X'), FALLBACK_COLOR);
        assert_eq!(color_of('*'), FALLBACK_COLOR);
        assert_eq!(color_of(' '), FALLBACK_COLOR);
        assert_eq!(color_of('é'), FALLBACK_COLOR);
        // Case-sensitive: lowercase is not a key
        assert_eq!(color_of('a'), FALLBACK_COLOR);
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(FALLBACK_COLOR.hex(), "#f0f0f0");
        assert_eq!(Rgb::from_hex(0x0a0b0c).to_string(), "#0a0b0c");
    }

    #[test]
    fn test_class_members() {
        let positive: String = ResidueClass::Positive.members().collect();
        assert_eq!(positive, "RK");
        let total: usize = ResidueClass::ALL.iter().map(|c| c.members().count()).sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_accepted_alphabet() {
        assert!(is_accepted('a'));
        assert!(is_accepted('V'));
        assert!(is_accepted('-'));
        assert!(!is_accepted('B'));
        assert!(!is_accepted('X'));
        assert!(!is_accepted(' '));
    }
}
