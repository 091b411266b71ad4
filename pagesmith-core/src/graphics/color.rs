use crate::error::{PdfError, Result};
use std::str::FromStr;

/// An RGB color with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Creates an RGB color with values clamped to 0.0-1.0.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Parses a hex token: `rgb` or `rrggbb`, optionally prefixed with `#`.
    ///
    /// The short form doubles every digit, so `#f00` equals `#ff0000`.
    /// Each byte is divided by 255.
    ///
    /// ```rust
    /// use pagesmith::Color;
    ///
    /// let red = Color::from_hex("#f00")?;
    /// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
    /// # Ok::<(), pagesmith::PdfError>(())
    /// ```
    pub fn from_hex(token: &str) -> Result<Self> {
        let digits = token.strip_prefix('#').unwrap_or(token);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PdfError::InvalidColor(token.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(PdfError::InvalidColor(token.to_string())),
        };

        let channel = |i: usize| -> Result<f64> {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map(|byte| byte as f64 / 255.0)
                .map_err(|_| PdfError::InvalidColor(token.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Black color (RGB 0,0,0).
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color (RGB 1,1,1).
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Red color (RGB 1,0,0).
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    /// Green color (RGB 0,1,0).
    pub fn green() -> Self {
        Self::rgb(0.0, 1.0, 0.0)
    }

    /// Blue color (RGB 0,0,1).
    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }

    /// Components as written in a content stream: three decimals each.
    pub fn operands(&self) -> String {
        format!("{:.3} {:.3} {:.3}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
