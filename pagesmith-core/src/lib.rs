//! # pagesmith
//!
//! A small, deterministic PDF generator: build pages with a drawing callback,
//! then serialize the whole object graph in one pass.
//!
//! ## Features
//!
//! - **Object Graph**: catalog, page tree, pages, content streams, a shared font and images, linked by identity
//! - **Drawing**: text with optional alignment, filled rectangles, stroked lines and JPEG images
//! - **Deterministic Output**: identical call sequences produce identical bytes
//! - **Text Measurement**: width estimates from the standard Helvetica metrics
//! - **Document Info**: title, author, subject, keywords and dates
//!
//! ## Quick Start
//!
//! ```rust
//! use pagesmith::{Document, PageSize, Result, TextAlign, TextOptions};
//!
//! # fn main() -> Result<()> {
//! let mut doc = Document::new();
//! doc.set_title("My PDF");
//!
//! doc.add_page_sized(PageSize::A4, |page| {
//!     page.text("Hello, PDF!", 50.0, 780.0, 24.0, &TextOptions::new())?;
//!     page.text(
//!         "Right aligned",
//!         50.0,
//!         740.0,
//!         12.0,
//!         &TextOptions::new()
//!             .color("#0080ff")
//!             .align(TextAlign::Right)
//!             .width(495.0),
//!     )?;
//!     page.line(50.0, 730.0, 545.0, 730.0, "#999", Some(0.5))?;
//!     page.rect(50.0, 600.0, 200.0, 100.0, "#eee")?;
//!     Ok(())
//! })?;
//!
//! let bytes = doc.build()?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Measuring text
//!
//! ```rust
//! let width = pagesmith::measure_text("Hello", 12.0);
//! assert!((width - 27.336).abs() < 1e-9);
//! ```

pub mod document;
pub mod error;
pub mod graphics;
pub mod objects;
pub mod page;
pub mod text;
pub mod writer;

pub use document::{Document, DocumentMetadata};
pub use error::{PdfError, Result};
pub use graphics::{Color, ContentStream, Image, ImageColorSpace, ImageFormat};
pub use objects::ObjectId;
pub use page::{DrawingContext, Page, PageSize};
pub use text::{measure_text, Font, TextAlign, TextOptions};

/// Current version of pagesmith
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
