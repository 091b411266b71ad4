use crate::error::{PdfError, Result};
use crate::graphics::{Color, ContentStream, Image};
use crate::objects::{Dictionary, Node, Object, ObjectArena, ObjectId};
use crate::text::{measure_text, Font, TextOptions};
use tracing::debug;

/// Page dimensions in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// US Letter (612 x 792 points), the default.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// A4 (595 x 842 points).
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };

    /// US Legal (612 x 1008 points).
    pub const LEGAL: PageSize = PageSize {
        width: 612.0,
        height: 1008.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rejects non-positive and non-finite dimensions.
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(PdfError::InvalidPageSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// A single page in the object graph.
///
/// The page only records identities: its content stream, the images it
/// draws and, once the document is built, its parent page tree and the
/// shared font. Dimensions are fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    size: PageSize,
    contents: ObjectId,
    images: Vec<(String, ObjectId)>,
    parent: Option<ObjectId>,
    font: Option<ObjectId>,
}

impl Page {
    pub(crate) fn new(size: PageSize, contents: ObjectId) -> Self {
        Self {
            size,
            contents,
            images: Vec::new(),
            parent: None,
            font: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn contents(&self) -> ObjectId {
        self.contents
    }

    /// Image resources in registration order, as `(name, identity)`.
    pub fn images(&self) -> &[(String, ObjectId)] {
        &self.images
    }

    pub(crate) fn set_images(&mut self, images: Vec<(String, ObjectId)>) {
        self.images = images;
    }

    pub(crate) fn attach(&mut self, parent: ObjectId, font: ObjectId) {
        self.parent = Some(parent);
        self.font = Some(font);
    }

    pub fn to_pdf_object(&self) -> Object {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::name("Page"));
        if let Some(parent) = self.parent {
            page_dict.set("Parent", parent);
        }
        page_dict.set(
            "MediaBox",
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.size.width),
                Object::Real(self.size.height),
            ],
        );
        page_dict.set("Contents", self.contents);

        let mut resources = Dictionary::new();
        if let Some(font) = self.font {
            let mut font_dict = Dictionary::new();
            font_dict.set(Font::Helvetica.resource_name(), font);
            resources.set("Font", font_dict);
        }

        if !self.images.is_empty() {
            let mut xobject_dict = Dictionary::new();
            for (name, id) in &self.images {
                xobject_dict.set(name.as_str(), *id);
            }
            resources.set("XObject", xobject_dict);
        }

        page_dict.set("Resources", resources);
        Object::Dictionary(page_dict)
    }
}

/// Drawing surface handed to a page callback.
///
/// Every operation is encoded immediately into the page's content stream.
/// The context only lives for the duration of the callback.
///
/// ```rust
/// use pagesmith::{Document, TextAlign, TextOptions};
///
/// let mut doc = Document::new();
/// doc.add_page(|page| {
///     page.text("Title", 50.0, 740.0, 24.0, &TextOptions::new())?
///         .rect(50.0, 720.0, 512.0, 2.0, "#333")?
///         .text(
///             "centered",
///             50.0,
///             700.0,
///             12.0,
///             &TextOptions::new().align(TextAlign::Center).width(512.0),
///         )?;
///     Ok(())
/// })?;
/// let bytes = doc.build()?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// # Ok::<(), pagesmith::PdfError>(())
/// ```
pub struct DrawingContext<'a> {
    size: PageSize,
    font: Font,
    content: &'a mut ContentStream,
    objects: &'a mut ObjectArena,
    images: &'a mut Vec<(String, ObjectId)>,
}

impl<'a> DrawingContext<'a> {
    pub(crate) fn new(
        size: PageSize,
        content: &'a mut ContentStream,
        objects: &'a mut ObjectArena,
        images: &'a mut Vec<(String, ObjectId)>,
    ) -> Self {
        Self {
            size,
            font: Font::Helvetica,
            content,
            objects,
            images,
        }
    }

    /// Dimensions of the page being drawn.
    pub fn page_size(&self) -> PageSize {
        self.size
    }

    /// Encoded operators written so far.
    pub fn operations(&self) -> &str {
        self.content.operations()
    }

    /// Writes `content` with its baseline at `y`.
    ///
    /// With a bounding `width`, center and right alignment shift the start
    /// position using the estimated text width; otherwise the text starts
    /// at `x`.
    pub fn text(
        &mut self,
        content: &str,
        x: f64,
        y: f64,
        size: f64,
        options: &TextOptions,
    ) -> Result<&mut Self> {
        let color = options.color.as_deref().map(Color::from_hex).transpose()?;
        let measured = measure_text(content, size);
        let start = options.align.start_x(x, options.width, measured);

        self.content
            .begin_text()
            .set_font(self.font.resource_name(), size);
        if let Some(color) = color {
            self.content.set_fill_color(color);
        }
        self.content
            .text_position(start, y)
            .show_text(content)
            .end_text();
        Ok(self)
    }

    /// Fills a rectangle with a hex color.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> Result<&mut Self> {
        let color = Color::from_hex(color)?;
        self.content
            .set_fill_color(color)
            .rect(x, y, width, height)
            .fill();
        Ok(self)
    }

    /// Strokes a straight line. `width` defaults to 1.
    pub fn line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: &str,
        width: Option<f64>,
    ) -> Result<&mut Self> {
        let color = Color::from_hex(color)?;
        self.content
            .set_line_width(width.unwrap_or(1.0))
            .set_stroke_color(color)
            .move_to(x1, y1)
            .line_to(x2, y2)
            .stroke();
        Ok(self)
    }

    /// Embeds an image and paints it into the box at `(x, y)` sized `width` x `height`.
    ///
    /// Each call registers a new image object under the next per-page
    /// resource name (`Im0`, `Im1`, ...).
    pub fn image(
        &mut self,
        bytes: impl Into<Vec<u8>>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<&mut Self> {
        let mut image = Image::from_bytes(bytes.into())?;
        image.fill_missing_size(width, height);
        self.place_image(image, x, y, width, height);
        Ok(self)
    }

    /// Embeds an image at its pixel size, one point per pixel.
    ///
    /// Fails with [`PdfError::InvalidImage`] when the header does not
    /// declare dimensions.
    pub fn image_natural(&mut self, bytes: impl Into<Vec<u8>>, x: f64, y: f64) -> Result<&mut Self> {
        let image = Image::from_bytes(bytes.into())?;
        let (width, height) = image.pixel_size().ok_or_else(|| {
            PdfError::InvalidImage("header does not declare pixel dimensions".to_string())
        })?;
        self.place_image(image, x, y, width as f64, height as f64);
        Ok(self)
    }

    fn place_image(&mut self, image: Image, x: f64, y: f64, width: f64, height: f64) {
        let name = format!("Im{}", self.images.len());
        let bytes = image.data().len();
        let id = self.objects.allocate(Node::Image(image));
        debug!(object = id.number(), resource = %name, bytes, "registered image");

        self.content.draw_image(&name, x, y, width, height);
        self.images.push((name, id));
    }
}
