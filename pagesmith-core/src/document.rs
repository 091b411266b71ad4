use crate::error::{PdfError, Result};
use crate::graphics::ContentStream;
use crate::objects::{Dictionary, Node, Object, ObjectArena, ObjectId};
use crate::page::{DrawingContext, Page, PageSize};
use crate::text::Font;
use crate::writer::PdfWriter;
use chrono::{DateTime, Local, Utc};
use std::path::Path;
use tracing::debug;

/// A document under construction.
///
/// Pages are drawn eagerly: each `add_page*` call runs its callback to
/// completion and encodes the drawing operations before returning. The
/// document is consumed by [`build`](Document::build) or
/// [`save`](Document::save).
///
/// # Example
///
/// ```rust
/// use pagesmith::{Document, TextOptions};
///
/// let mut doc = Document::new();
/// doc.set_title("My Document");
/// doc.set_author("Jane Doe");
///
/// doc.add_page(|page| {
///     page.text("Hello, World!", 50.0, 700.0, 24.0, &TextOptions::new())?;
///     Ok(())
/// })?;
///
/// let bytes = doc.build()?;
/// assert!(bytes.ends_with(b"%%EOF"));
/// # Ok::<(), pagesmith::PdfError>(())
/// ```
#[derive(Debug, Default)]
pub struct Document {
    objects: ObjectArena,
    pages: Vec<ObjectId>,
    metadata: DocumentMetadata,
}

/// Metadata for a PDF document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the PDF
    pub producer: Option<String>,
    /// Date and time the document was created
    pub creation_date: Option<DateTime<Utc>>,
    /// Date and time the document was last modified
    pub modification_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: Some("pagesmith".to_string()),
            producer: Some(format!("pagesmith v{}", crate::VERSION)),
            creation_date: None,
            modification_date: None,
        }
    }
}

impl DocumentMetadata {
    /// Builds the document information dictionary.
    pub fn to_pdf_object(&self) -> Object {
        let mut info = Dictionary::new();
        let text_entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (key, value) in text_entries {
            if let Some(value) = value {
                info.set(key, Object::text_string(value));
            }
        }

        if let Some(date) = self.creation_date {
            info.set("CreationDate", Object::String(format_pdf_date(date)));
        }
        if let Some(date) = self.modification_date {
            info.set("ModDate", Object::String(format_pdf_date(date)));
        }

        Object::Dictionary(info)
    }
}

/// Formats a UTC timestamp as a PDF date string (`D:YYYYMMDDHHmmSS+00'00`).
pub fn format_pdf_date(date: DateTime<Utc>) -> String {
    let formatted = date.format("D:%Y%m%d%H%M%S");
    format!("{formatted}+00'00")
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a US Letter page and draws it with `draw`.
    pub fn add_page<F>(&mut self, draw: F) -> Result<ObjectId>
    where
        F: FnOnce(&mut DrawingContext<'_>) -> Result<()>,
    {
        self.add_page_sized(PageSize::default(), draw)
    }

    /// Adds a page of the given size and draws it with `draw`.
    ///
    /// The page and its content stream take the next two identities. If
    /// `draw` fails, everything allocated for the page is discarded and the
    /// error is returned; the document stays usable.
    pub fn add_page_sized<F>(&mut self, size: PageSize, draw: F) -> Result<ObjectId>
    where
        F: FnOnce(&mut DrawingContext<'_>) -> Result<()>,
    {
        size.validate()?;

        let checkpoint = self.objects.len();
        let page_id = self.objects.next_id();
        let contents_id = ObjectId::new(page_id.number() + 1, 0);
        self.objects.allocate(Node::Page(Page::new(size, contents_id)));
        self.objects.allocate(Node::Content(ContentStream::new()));

        let mut content = ContentStream::new();
        let mut images = Vec::new();
        let drawn = {
            let mut ctx = DrawingContext::new(size, &mut content, &mut self.objects, &mut images);
            draw(&mut ctx)
        };

        if let Err(e) = drawn {
            self.objects.truncate(checkpoint);
            debug!(page = page_id.number(), error = %e, "page callback failed, rolled back");
            return Err(e);
        }

        debug!(
            page = page_id.number(),
            width = size.width,
            height = size.height,
            images = images.len(),
            bytes = content.len(),
            "added page"
        );

        if let Some(Node::Content(slot)) = self.objects.get_mut(contents_id) {
            *slot = content;
        }
        if let Some(Node::Page(page)) = self.objects.get_mut(page_id) {
            page.set_images(images);
        }
        self.pages.push(page_id);
        Ok(page_id)
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of objects allocated so far.
    ///
    /// The font, page tree, catalog and information dictionary are only
    /// allocated by `build`.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    /// Sets the document author.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    /// Sets the document subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    /// Sets the document keywords.
    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.metadata.keywords = Some(keywords.into());
    }

    /// Sets the document creator (software that created the original document).
    pub fn set_creator(&mut self, creator: impl Into<String>) {
        self.metadata.creator = Some(creator.into());
    }

    /// Sets the document producer (software that produced the PDF).
    pub fn set_producer(&mut self, producer: impl Into<String>) {
        self.metadata.producer = Some(producer.into());
    }

    /// Sets the document creation date.
    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.metadata.creation_date = Some(date);
    }

    /// Sets the document creation date using local time.
    pub fn set_creation_date_local(&mut self, date: DateTime<Local>) {
        self.metadata.creation_date = Some(date.with_timezone(&Utc));
    }

    /// Sets the document modification date.
    pub fn set_modification_date(&mut self, date: DateTime<Utc>) {
        self.metadata.modification_date = Some(date);
    }

    /// Sets the modification date to the current time.
    pub fn update_modification_date(&mut self) {
        self.metadata.modification_date = Some(Utc::now());
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Serializes the document into a byte buffer.
    pub fn build(mut self) -> Result<Vec<u8>> {
        let (root, info) = self.finalize()?;
        let mut writer = PdfWriter::new_with_writer(Vec::new());
        writer.write_document(&self.objects, root, Some(info))?;
        let bytes = writer.into_inner();
        debug!(bytes = bytes.len(), "built document");
        Ok(bytes)
    }

    /// Serializes the document straight into a file at `path`.
    ///
    /// The file is only created once the document is known to be complete.
    pub fn save(mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (root, info) = self.finalize()?;
        let mut writer = PdfWriter::new(path)?;
        writer.write_document(&self.objects, root, Some(info))?;
        debug!(path = %path.display(), "saved document");
        Ok(())
    }

    /// Allocates the shared font, page tree, catalog and information
    /// dictionary, and links every page to them.
    fn finalize(&mut self) -> Result<(ObjectId, ObjectId)> {
        if self.pages.is_empty() {
            return Err(PdfError::BuilderMisuse(
                "document has no pages".to_string(),
            ));
        }

        let font_id = self.objects.allocate(Node::Font(Font::Helvetica));
        let pages_id = self.objects.allocate(Node::Pages {
            kids: self.pages.clone(),
        });
        let catalog_id = self.objects.allocate(Node::Catalog { pages: pages_id });
        let info_id = self.objects.allocate(Node::Info(self.metadata.clone()));

        for page_id in &self.pages {
            if let Some(Node::Page(page)) = self.objects.get_mut(*page_id) {
                page.attach(pages_id, font_id);
            }
        }

        debug!(
            pages = self.pages.len(),
            objects = self.objects.len(),
            "finalized object graph"
        );
        Ok((catalog_id, info_id))
    }
}
