mod font;
mod metrics;

pub use font::Font;
pub use metrics::{char_width, measure_char, measure_text, FALLBACK_WIDTH};

/// Horizontal placement of a text run inside an optional bounding width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Start position of a run of `measured` points placed at `x`.
    ///
    /// Without a bounding `width` every alignment starts at `x`.
    pub fn start_x(&self, x: f64, width: Option<f64>, measured: f64) -> f64 {
        match (self, width) {
            (TextAlign::Center, Some(width)) => x + (width - measured) / 2.0,
            (TextAlign::Right, Some(width)) => x + width - measured,
            _ => x,
        }
    }
}

/// Optional settings for [`DrawingContext::text`](crate::DrawingContext::text).
///
/// ```rust
/// use pagesmith::{TextAlign, TextOptions};
///
/// let options = TextOptions::new()
///     .color("#336699")
///     .align(TextAlign::Center)
///     .width(200.0);
/// assert_eq!(options.align, TextAlign::Center);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOptions {
    /// Fill color as a hex token (`#rgb` or `#rrggbb`)
    pub color: Option<String>,
    /// Alignment inside `width`
    pub align: TextAlign,
    /// Bounding width used for center and right alignment
    pub width: Option<f64>,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

/// Escapes `\`, `(` and `)` for use inside a literal string.
///
/// All other bytes pass through unchanged.
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '(' | ')') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("Hello"), "Hello");
        assert_eq!(escape_literal("a(b)c"), "a\\(b\\)c");
        assert_eq!(escape_literal("C:\\dir"), "C:\\\\dir");
        assert_eq!(escape_literal(""), "");
        assert_eq!(escape_literal("naïve"), "naïve");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape_literal("(x)");
        let twice = escape_literal(&once);
        assert_eq!(once, "\\(x\\)");
        assert_ne!(once, twice);
        assert_eq!(twice, "\\\\\\(x\\\\\\)");
    }

    #[test]
    fn test_start_x_left_and_unbounded() {
        assert_eq!(TextAlign::Left.start_x(50.0, Some(200.0), 40.0), 50.0);
        assert_eq!(TextAlign::Center.start_x(50.0, None, 40.0), 50.0);
        assert_eq!(TextAlign::Right.start_x(50.0, None, 40.0), 50.0);
    }

    #[test]
    fn test_start_x_center_and_right() {
        assert_eq!(TextAlign::Center.start_x(50.0, Some(200.0), 40.0), 130.0);
        assert_eq!(TextAlign::Right.start_x(50.0, Some(200.0), 40.0), 210.0);
    }

    #[test]
    fn test_text_options_builder() {
        let options = TextOptions::new().color("#f00").width(100.0);
        assert_eq!(options.color.as_deref(), Some("#f00"));
        assert_eq!(options.align, TextAlign::Left);
        assert_eq!(options.width, Some(100.0));
    }
}
