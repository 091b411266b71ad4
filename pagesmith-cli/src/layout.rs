//! JSON page layouts for the `render` command.
//!
//! ```json
//! {
//!   "title": "Invoice",
//!   "pages": [
//!     { "ops": [
//!       { "op": "text", "text": "Total", "x": 50, "y": 700, "size": 14, "align": "right", "width": 500 },
//!       { "op": "rect", "x": 50, "y": 690, "width": 500, "height": 1, "color": "#000" },
//!       { "op": "image", "path": "logo.jpg", "x": 50, "y": 720, "width": 64, "height": 64 }
//!     ] }
//!   ]
//! }
//! ```

use anyhow::{bail, Context, Result};
use pagesmith::{Document, DrawingContext, PageSize, TextAlign, TextOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Vec<PageLayout>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageLayout {
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub ops: Vec<Op>,
}

impl PageLayout {
    fn size(&self) -> PageSize {
        let default = PageSize::default();
        PageSize::new(
            self.width.unwrap_or(default.width),
            self.height.unwrap_or(default.height),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Op {
    Text {
        text: String,
        x: f64,
        y: f64,
        #[serde(default = "default_text_size")]
        size: f64,
        color: Option<String>,
        #[serde(default)]
        align: Align,
        width: Option<f64>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
        width: Option<f64>,
    },
    /// Without `width` and `height` the image is placed at its pixel size.
    Image {
        path: PathBuf,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    },
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for TextAlign {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => TextAlign::Left,
            Align::Center => TextAlign::Center,
            Align::Right => TextAlign::Right,
        }
    }
}

fn default_text_size() -> f64 {
    12.0
}

impl Layout {
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read layout {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid layout {}", path.display()))
    }

    /// Builds a document, resolving image paths against `base_dir`.
    pub fn render(&self, base_dir: &Path) -> Result<Document> {
        let mut doc = Document::new();
        if let Some(title) = &self.title {
            doc.set_title(title);
        }
        if let Some(author) = &self.author {
            doc.set_author(author);
        }

        for (index, page) in self.pages.iter().enumerate() {
            check_image_boxes(&page.ops)
                .with_context(|| format!("page {} failed to render", index + 1))?;
            let images = load_images(&page.ops, base_dir)?;
            doc.add_page_sized(page.size(), |ctx| {
                let mut images = images.into_iter();
                for op in &page.ops {
                    draw(ctx, op, &mut images)?;
                }
                Ok(())
            })
            .with_context(|| format!("page {} failed to render", index + 1))?;
            debug!(page = index + 1, ops = page.ops.len(), "rendered layout page");
        }

        Ok(doc)
    }
}

/// An image is placed either in an explicit box or at its natural size.
fn check_image_boxes(ops: &[Op]) -> Result<()> {
    for op in ops {
        if let Op::Image {
            path,
            width,
            height,
            ..
        } = op
        {
            if width.is_some() != height.is_some() {
                bail!(
                    "image {} needs both width and height, or neither",
                    path.display()
                );
            }
        }
    }
    Ok(())
}

fn load_images(ops: &[Op], base_dir: &Path) -> Result<Vec<Vec<u8>>> {
    ops.iter()
        .filter_map(|op| match op {
            Op::Image { path, .. } => Some(base_dir.join(path)),
            _ => None,
        })
        .map(|path| {
            std::fs::read(&path).with_context(|| format!("failed to read image {}", path.display()))
        })
        .collect()
}

fn draw(
    ctx: &mut DrawingContext<'_>,
    op: &Op,
    images: &mut impl Iterator<Item = Vec<u8>>,
) -> pagesmith::Result<()> {
    match op {
        Op::Text {
            text,
            x,
            y,
            size,
            color,
            align,
            width,
        } => {
            let mut options = TextOptions::new().align((*align).into());
            options.color = color.clone();
            options.width = *width;
            ctx.text(text, *x, *y, *size, &options)?;
        }
        Op::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            ctx.rect(*x, *y, *width, *height, color)?;
        }
        Op::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        } => {
            ctx.line(*x1, *y1, *x2, *y2, color, *width)?;
        }
        Op::Image {
            x, y, width, height, ..
        } => {
            let bytes = images.next().unwrap_or_default();
            match (width, height) {
                (Some(width), Some(height)) => {
                    ctx.image(bytes, *x, *y, *width, *height)?;
                }
                _ => {
                    ctx.image_natural(bytes, *x, *y)?;
                }
            }
        }
    }
    Ok(())
}
