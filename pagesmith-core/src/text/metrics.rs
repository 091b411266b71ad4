use std::collections::HashMap;

/// Advance width, in 1/1000 em, of any character missing from the table.
pub const FALLBACK_WIDTH: u16 = 556;

/// Character width information for the standard sans-serif face.
/// All widths are in 1/1000 of a unit (font size 1.0).
pub struct FontMetrics {
    widths: HashMap<char, u16>,
    default_width: u16,
}

impl FontMetrics {
    fn new(default_width: u16) -> Self {
        Self {
            widths: HashMap::new(),
            default_width,
        }
    }

    fn with_widths(mut self, widths: &[(char, u16)]) -> Self {
        for &(ch, width) in widths {
            self.widths.insert(ch, width);
        }
        self
    }

    pub fn char_width(&self, ch: char) -> u16 {
        self.widths.get(&ch).copied().unwrap_or(self.default_width)
    }
}

lazy_static::lazy_static! {
    static ref HELVETICA: FontMetrics = FontMetrics::new(FALLBACK_WIDTH).with_widths(&[
        (' ', 278), ('!', 278), ('"', 355), ('#', 556), ('$', 556), ('%', 889),
        ('&', 667), ('\'', 191), ('(', 333), (')', 333), ('*', 389), ('+', 584),
        (',', 278), ('-', 333), ('.', 278), ('/', 278), ('0', 556), ('1', 556),
        ('2', 556), ('3', 556), ('4', 556), ('5', 556), ('6', 556), ('7', 556),
        ('8', 556), ('9', 556), (':', 278), (';', 278), ('<', 584), ('=', 584),
        ('>', 584), ('?', 556), ('@', 1015), ('A', 667), ('B', 667), ('C', 722),
        ('D', 722), ('E', 667), ('F', 611), ('G', 778), ('H', 722), ('I', 278),
        ('J', 500), ('K', 667), ('L', 556), ('M', 833), ('N', 722), ('O', 778),
        ('P', 667), ('Q', 778), ('R', 722), ('S', 667), ('T', 611), ('U', 722),
        ('V', 667), ('W', 944), ('X', 667), ('Y', 667), ('Z', 611), ('[', 278),
        ('\\', 278), (']', 278), ('^', 469), ('_', 556), ('`', 333), ('a', 556),
        ('b', 556), ('c', 500), ('d', 556), ('e', 556), ('f', 278), ('g', 556),
        ('h', 556), ('i', 222), ('j', 222), ('k', 500), ('l', 222), ('m', 833),
        ('n', 556), ('o', 556), ('p', 556), ('q', 556), ('r', 333), ('s', 500),
        ('t', 278), ('u', 556), ('v', 500), ('w', 722), ('x', 500), ('y', 500),
        ('z', 500), ('{', 334), ('|', 260), ('}', 334), ('~', 584),
    ]);
}

/// Advance width of one character in font units.
pub fn char_width(ch: char) -> u16 {
    HELVETICA.char_width(ch)
}

/// Estimated width of `text` at `font_size`, in points.
///
/// Widths are summed per character with no kerning; characters outside the
/// printable ASCII table each count as [`FALLBACK_WIDTH`].
pub fn measure_text(text: &str, font_size: f64) -> f64 {
    let width_units: u64 = text.chars().map(|ch| char_width(ch) as u64).sum();

    width_units as f64 * font_size / 1000.0
}

/// Measure the width of a single character
pub fn measure_char(ch: char, font_size: f64) -> f64 {
    char_width(ch) as f64 * font_size / 1000.0
}
