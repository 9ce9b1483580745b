//! Named color table.
//!
//! An explicit, versioned name → RGB table.  Lookup is case-sensitive and
//! exact; an unknown name resolves to black.  Reverse lookup returns the
//! first name in table order, so aliases (`Aqua`/`Cyan`,
//! `Fuchsia`/`Magenta`) report the alphabetically earlier name.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Rgb
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::hex(0x000000);

    pub const fn new(r: u8, g: u8, b: u8) -> Self { Rgb { r, g, b } }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Rgb {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >>  8) & 0xFF) as u8,
            b: ( rgb        & 0xFF) as u8,
        }
    }

    /// Packed opaque ARGB (`0xFFRRGGBB`), the framebuffer pixel format.
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Known colors
// ════════════════════════════════════════════════════════════════════════════

/// Bumped whenever an entry of [`KNOWN_COLORS`] is added, removed or changed.
pub const COLOR_TABLE_VERSION: u32 = 1;

/// The standard web / X11 named colors, alphabetical.
pub static KNOWN_COLORS: &[(&str, Rgb)] = &[
    ("AliceBlue",            Rgb::hex(0xF0F8FF)),
    ("AntiqueWhite",         Rgb::hex(0xFAEBD7)),
    ("Aqua",                 Rgb::hex(0x00FFFF)),
    ("Aquamarine",           Rgb::hex(0x7FFFD4)),
    ("Azure",                Rgb::hex(0xF0FFFF)),
    ("Beige",                Rgb::hex(0xF5F5DC)),
    ("Bisque",               Rgb::hex(0xFFE4C4)),
    ("Black",                Rgb::hex(0x000000)),
    ("BlanchedAlmond",       Rgb::hex(0xFFEBCD)),
    ("Blue",                 Rgb::hex(0x0000FF)),
    ("BlueViolet",           Rgb::hex(0x8A2BE2)),
    ("Brown",                Rgb::hex(0xA52A2A)),
    ("BurlyWood",            Rgb::hex(0xDEB887)),
    ("CadetBlue",            Rgb::hex(0x5F9EA0)),
    ("Chartreuse",           Rgb::hex(0x7FFF00)),
    ("Chocolate",            Rgb::hex(0xD2691E)),
    ("Coral",                Rgb::hex(0xFF7F50)),
    ("CornflowerBlue",       Rgb::hex(0x6495ED)),
    ("Cornsilk",             Rgb::hex(0xFFF8DC)),
    ("Crimson",              Rgb::hex(0xDC143C)),
    ("Cyan",                 Rgb::hex(0x00FFFF)),
    ("DarkBlue",             Rgb::hex(0x00008B)),
    ("DarkCyan",             Rgb::hex(0x008B8B)),
    ("DarkGoldenrod",        Rgb::hex(0xB8860B)),
    ("DarkGray",             Rgb::hex(0xA9A9A9)),
    ("DarkGreen",            Rgb::hex(0x006400)),
    ("DarkKhaki",            Rgb::hex(0xBDB76B)),
    ("DarkMagenta",          Rgb::hex(0x8B008B)),
    ("DarkOliveGreen",       Rgb::hex(0x556B2F)),
    ("DarkOrange",           Rgb::hex(0xFF8C00)),
    ("DarkOrchid",           Rgb::hex(0x9932CC)),
    ("DarkRed",              Rgb::hex(0x8B0000)),
    ("DarkSalmon",           Rgb::hex(0xE9967A)),
    ("DarkSeaGreen",         Rgb::hex(0x8FBC8F)),
    ("DarkSlateBlue",        Rgb::hex(0x483D8B)),
    ("DarkSlateGray",        Rgb::hex(0x2F4F4F)),
    ("DarkTurquoise",        Rgb::hex(0x00CED1)),
    ("DarkViolet",           Rgb::hex(0x9400D3)),
    ("DeepPink",             Rgb::hex(0xFF1493)),
    ("DeepSkyBlue",          Rgb::hex(0x00BFFF)),
    ("DimGray",              Rgb::hex(0x696969)),
    ("DodgerBlue",           Rgb::hex(0x1E90FF)),
    ("Firebrick",            Rgb::hex(0xB22222)),
    ("FloralWhite",          Rgb::hex(0xFFFAF0)),
    ("ForestGreen",          Rgb::hex(0x228B22)),
    ("Fuchsia",              Rgb::hex(0xFF00FF)),
    ("Gainsboro",            Rgb::hex(0xDCDCDC)),
    ("GhostWhite",           Rgb::hex(0xF8F8FF)),
    ("Gold",                 Rgb::hex(0xFFD700)),
    ("Goldenrod",            Rgb::hex(0xDAA520)),
    ("Gray",                 Rgb::hex(0x808080)),
    ("Green",                Rgb::hex(0x008000)),
    ("GreenYellow",          Rgb::hex(0xADFF2F)),
    ("Honeydew",             Rgb::hex(0xF0FFF0)),
    ("HotPink",              Rgb::hex(0xFF69B4)),
    ("IndianRed",            Rgb::hex(0xCD5C5C)),
    ("Indigo",               Rgb::hex(0x4B0082)),
    ("Ivory",                Rgb::hex(0xFFFFF0)),
    ("Khaki",                Rgb::hex(0xF0E68C)),
    ("Lavender",             Rgb::hex(0xE6E6FA)),
    ("LavenderBlush",        Rgb::hex(0xFFF0F5)),
    ("LawnGreen",            Rgb::hex(0x7CFC00)),
    ("LemonChiffon",         Rgb::hex(0xFFFACD)),
    ("LightBlue",            Rgb::hex(0xADD8E6)),
    ("LightCoral",           Rgb::hex(0xF08080)),
    ("LightCyan",            Rgb::hex(0xE0FFFF)),
    ("LightGoldenrodYellow", Rgb::hex(0xFAFAD2)),
    ("LightGray",            Rgb::hex(0xD3D3D3)),
    ("LightGreen",           Rgb::hex(0x90EE90)),
    ("LightPink",            Rgb::hex(0xFFB6C1)),
    ("LightSalmon",          Rgb::hex(0xFFA07A)),
    ("LightSeaGreen",        Rgb::hex(0x20B2AA)),
    ("LightSkyBlue",         Rgb::hex(0x87CEFA)),
    ("LightSlateGray",       Rgb::hex(0x778899)),
    ("LightSteelBlue",       Rgb::hex(0xB0C4DE)),
    ("LightYellow",          Rgb::hex(0xFFFFE0)),
    ("Lime",                 Rgb::hex(0x00FF00)),
    ("LimeGreen",            Rgb::hex(0x32CD32)),
    ("Linen",                Rgb::hex(0xFAF0E6)),
    ("Magenta",              Rgb::hex(0xFF00FF)),
    ("Maroon",               Rgb::hex(0x800000)),
    ("MediumAquamarine",     Rgb::hex(0x66CDAA)),
    ("MediumBlue",           Rgb::hex(0x0000CD)),
    ("MediumOrchid",         Rgb::hex(0xBA55D3)),
    ("MediumPurple",         Rgb::hex(0x9370DB)),
    ("MediumSeaGreen",       Rgb::hex(0x3CB371)),
    ("MediumSlateBlue",      Rgb::hex(0x7B68EE)),
    ("MediumSpringGreen",    Rgb::hex(0x00FA9A)),
    ("MediumTurquoise",      Rgb::hex(0x48D1CC)),
    ("MediumVioletRed",      Rgb::hex(0xC71585)),
    ("MidnightBlue",         Rgb::hex(0x191970)),
    ("MintCream",            Rgb::hex(0xF5FFFA)),
    ("MistyRose",            Rgb::hex(0xFFE4E1)),
    ("Moccasin",             Rgb::hex(0xFFE4B5)),
    ("NavajoWhite",          Rgb::hex(0xFFDEAD)),
    ("Navy",                 Rgb::hex(0x000080)),
    ("OldLace",              Rgb::hex(0xFDF5E6)),
    ("Olive",                Rgb::hex(0x808000)),
    ("OliveDrab",            Rgb::hex(0x6B8E23)),
    ("Orange",               Rgb::hex(0xFFA500)),
    ("OrangeRed",            Rgb::hex(0xFF4500)),
    ("Orchid",               Rgb::hex(0xDA70D6)),
    ("PaleGoldenrod",        Rgb::hex(0xEEE8AA)),
    ("PaleGreen",            Rgb::hex(0x98FB98)),
    ("PaleTurquoise",        Rgb::hex(0xAFEEEE)),
    ("PaleVioletRed",        Rgb::hex(0xDB7093)),
    ("PapayaWhip",           Rgb::hex(0xFFEFD5)),
    ("PeachPuff",            Rgb::hex(0xFFDAB9)),
    ("Peru",                 Rgb::hex(0xCD853F)),
    ("Pink",                 Rgb::hex(0xFFC0CB)),
    ("Plum",                 Rgb::hex(0xDDA0DD)),
    ("PowderBlue",           Rgb::hex(0xB0E0E6)),
    ("Purple",               Rgb::hex(0x800080)),
    ("Red",                  Rgb::hex(0xFF0000)),
    ("RosyBrown",            Rgb::hex(0xBC8F8F)),
    ("RoyalBlue",            Rgb::hex(0x4169E1)),
    ("SaddleBrown",          Rgb::hex(0x8B4513)),
    ("Salmon",               Rgb::hex(0xFA8072)),
    ("SandyBrown",           Rgb::hex(0xF4A460)),
    ("SeaGreen",             Rgb::hex(0x2E8B57)),
    ("SeaShell",             Rgb::hex(0xFFF5EE)),
    ("Sienna",               Rgb::hex(0xA0522D)),
    ("Silver",               Rgb::hex(0xC0C0C0)),
    ("SkyBlue",              Rgb::hex(0x87CEEB)),
    ("SlateBlue",            Rgb::hex(0x6A5ACD)),
    ("SlateGray",            Rgb::hex(0x708090)),
    ("Snow",                 Rgb::hex(0xFFFAFA)),
    ("SpringGreen",          Rgb::hex(0x00FF7F)),
    ("SteelBlue",            Rgb::hex(0x4682B4)),
    ("Tan",                  Rgb::hex(0xD2B48C)),
    ("Teal",                 Rgb::hex(0x008080)),
    ("Thistle",              Rgb::hex(0xD8BFD8)),
    ("Tomato",               Rgb::hex(0xFF6347)),
    ("Turquoise",            Rgb::hex(0x40E0D0)),
    ("Violet",               Rgb::hex(0xEE82EE)),
    ("Wheat",                Rgb::hex(0xF5DEB3)),
    ("White",                Rgb::hex(0xFFFFFF)),
    ("WhiteSmoke",           Rgb::hex(0xF5F5F5)),
    ("Yellow",               Rgb::hex(0xFFFF00)),
    ("YellowGreen",          Rgb::hex(0x9ACD32)),
];

// ════════════════════════════════════════════════════════════════════════════
// ColorTable
// ════════════════════════════════════════════════════════════════════════════

/// Name ↔ color resolution over a static table.
#[derive(Clone, Copy, Debug)]
pub struct ColorTable {
    entries: &'static [(&'static str, Rgb)],
}

impl Default for ColorTable {
    fn default() -> Self { ColorTable::known() }
}

impl ColorTable {
    pub fn known() -> Self { ColorTable { entries: KNOWN_COLORS } }

    pub fn from_entries(entries: &'static [(&'static str, Rgb)]) -> Self {
        ColorTable { entries }
    }

    pub fn try_lookup(&self, name: &str) -> Option<Rgb> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
    }

    /// Resolve a color name, falling back to black when it is not in the table.
    pub fn lookup(&self, name: &str) -> Rgb {
        self.try_lookup(name).unwrap_or(Rgb::BLACK)
    }

    /// First name registered for `color`, if any.
    pub fn name_of(&self, color: Rgb) -> Option<&'static str> {
        self.entries.iter().find(|(_, c)| *c == color).map(|(n, _)| *n)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(Rgb::hex(0x6495ED), Rgb::new(0x64, 0x95, 0xED));
        assert_eq!(Rgb::new(1, 2, 3).to_argb(), 0xFF010203);
    }

    #[test]
    fn lookup_known() {
        let table = ColorTable::known();
        assert_eq!(table.lookup("Red"), Rgb::new(255, 0, 0));
        assert_eq!(table.lookup("DeepSkyBlue"), Rgb::hex(0x00BFFF));
    }

    #[test]
    fn lookup_unknown_is_black() {
        let table = ColorTable::known();
        assert_eq!(table.lookup("Plaid"), Rgb::BLACK);
        assert_eq!(table.try_lookup("Plaid"), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = ColorTable::known();
        assert_eq!(table.try_lookup("red"), None);
        assert_eq!(table.lookup("RED"), Rgb::BLACK);
    }

    #[test]
    fn reverse_lookup_prefers_first_alias() {
        let table = ColorTable::known();
        assert_eq!(table.name_of(Rgb::hex(0x00FFFF)), Some("Aqua"));
        assert_eq!(table.name_of(Rgb::hex(0xFF00FF)), Some("Fuchsia"));
        assert_eq!(table.name_of(Rgb::BLACK), Some("Black"));
        assert_eq!(table.name_of(Rgb::new(1, 2, 3)), None);
    }

    #[test]
    fn names_are_unique_and_sorted() {
        let names: Vec<_> = ColorTable::known().names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 140);
    }

    #[test]
    fn custom_table() {
        static MINI: &[(&str, Rgb)] = &[("Ink", Rgb::hex(0x101010))];
        let table = ColorTable::from_entries(MINI);
        assert_eq!(table.lookup("Ink"), Rgb::hex(0x101010));
        assert_eq!(table.lookup("Red"), Rgb::BLACK);
        assert_eq!(table.len(), 1);
    }
}
