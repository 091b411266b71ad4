//! Identity-indexed storage for every object a document allocates.
//!
//! Objects never point at each other directly. They hold [`ObjectId`]s that the
//! writer resolves when the file is laid out, so the catalog, page tree and
//! pages can refer to one another without ownership cycles.

use crate::document::DocumentMetadata;
use crate::graphics::{ContentStream, Image};
use crate::objects::{Dictionary, Object, ObjectId};
use crate::page::Page;
use crate::text::Font;

/// One allocated object, typed by the role it plays in the document.
#[derive(Debug, Clone)]
pub enum Node {
    Catalog { pages: ObjectId },
    Pages { kids: Vec<ObjectId> },
    Page(Page),
    Content(ContentStream),
    Font(Font),
    Image(Image),
    Info(DocumentMetadata),
}

impl Node {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Catalog { .. } => "catalog",
            Node::Pages { .. } => "pages",
            Node::Page(_) => "page",
            Node::Content(_) => "content",
            Node::Font(_) => "font",
            Node::Image(_) => "image",
            Node::Info(_) => "info",
        }
    }

    pub fn to_pdf_object(&self) -> Object {
        match self {
            Node::Catalog { pages } => {
                let mut catalog = Dictionary::new();
                catalog.set("Type", Object::name("Catalog"));
                catalog.set("Pages", *pages);
                Object::Dictionary(catalog)
            }
            Node::Pages { kids } => {
                let mut pages = Dictionary::new();
                pages.set("Type", Object::name("Pages"));
                pages.set(
                    "Kids",
                    kids.iter().copied().map(Object::Reference).collect::<Vec<_>>(),
                );
                pages.set("Count", kids.len() as i64);
                Object::Dictionary(pages)
            }
            Node::Page(page) => page.to_pdf_object(),
            Node::Content(content) => content.to_pdf_object(),
            Node::Font(font) => font.to_pdf_object(),
            Node::Image(image) => image.to_pdf_object(),
            Node::Info(metadata) => metadata.to_pdf_object(),
        }
    }
}

/// Dense, 1-based arena: the object at index `i` has identity `i + 1`.
#[derive(Debug, Clone, Default)]
pub struct ObjectArena {
    nodes: Vec<Node>,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity the next call to [`allocate`](Self::allocate) will return.
    pub fn next_id(&self) -> ObjectId {
        ObjectId::new(self.nodes.len() as u32 + 1, 0)
    }

    pub fn allocate(&mut self, node: Node) -> ObjectId {
        let id = self.next_id();
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&Node> {
        self.index(id).map(|i| &self.nodes[i])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Node> {
        self.index(id).map(move |i| &mut self.nodes[i])
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every object allocated after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Objects in ascending identity order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ObjectId::new(i as u32 + 1, 0), node))
    }

    fn index(&self, id: ObjectId) -> Option<usize> {
        let number = id.number() as usize;
        if id.generation() == 0 && number >= 1 && number <= self.nodes.len() {
            Some(number - 1)
        } else {
            None
        }
    }
}
