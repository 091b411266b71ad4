mod color;
mod image;

pub use color::Color;
pub use image::{ColorSpace as ImageColorSpace, Image, ImageFormat};

use crate::objects::{Object, Stream};
use crate::text::escape_literal;
use std::fmt::{self, Write};

/// Append-only buffer of encoded page-content operators.
///
/// Coordinates and dimensions are written with exactly two decimals and
/// color components with exactly three, so identical call sequences always
/// produce identical bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStream {
    operations: String,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        writeln!(&mut self.operations, "{args}").ok();
        self
    }

    pub fn begin_text(&mut self) -> &mut Self {
        self.op(format_args!("BT"))
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.op(format_args!("ET"))
    }

    pub fn set_font(&mut self, resource: &str, size: f64) -> &mut Self {
        let size = size + 0.0;
        self.op(format_args!("/{resource} {size} Tf"))
    }

    pub fn text_position(&mut self, x: f64, y: f64) -> &mut Self {
        let (x, y) = (Fixed(x), Fixed(y));
        self.op(format_args!("{x:.2} {y:.2} Td"))
    }

    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.op(format_args!("({}) Tj", escape_literal(text)))
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.op(format_args!("{} rg", color.operands()))
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.op(format_args!("{} RG", color.operands()))
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        let width = Fixed(width);
        self.op(format_args!("{width:.2} w"))
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let (x, y, width, height) = (Fixed(x), Fixed(y), Fixed(width), Fixed(height));
        self.op(format_args!("{x:.2} {y:.2} {width:.2} {height:.2} re"))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let (x, y) = (Fixed(x), Fixed(y));
        self.op(format_args!("{x:.2} {y:.2} m"))
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let (x, y) = (Fixed(x), Fixed(y));
        self.op(format_args!("{x:.2} {y:.2} l"))
    }

    pub fn fill(&mut self) -> &mut Self {
        self.op(format_args!("f"))
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.op(format_args!("S"))
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.op(format_args!("q"))
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.op(format_args!("Q"))
    }

    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        let [a, b, c, d, e, f] = [a, b, c, d, e, f].map(Fixed);
        self.op(format_args!("{a:.2} {b:.2} {c:.2} {d:.2} {e:.2} {f:.2} cm"))
    }

    /// Paints the named image XObject into the box `[x, y, x + width, y + height]`.
    pub fn draw_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let (x, y, width, height) = (Fixed(x), Fixed(y), Fixed(width), Fixed(height));
        self.save_state();
        // The unit square of the image maps onto the placement box.
        self.op(format_args!("{width:.2} 0 0 {height:.2} {x:.2} {y:.2} cm"));
        self.op(format_args!("/{name} Do"));
        self.restore_state()
    }

    pub fn operations(&self) -> &str {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn to_pdf_object(&self) -> Object {
        Object::Stream(Stream::new(self.operations.as_bytes().to_vec()))
    }
}

/// Fixed-point operand that never prints a negative zero such as `-0.00`.
struct Fixed(f64);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = format!("{:.*}", f.precision().unwrap_or(2), self.0);
        match formatted.strip_prefix('-') {
            Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
                f.write_str(magnitude)
            }
            _ => f.write_str(&formatted),
        }
    }
}
