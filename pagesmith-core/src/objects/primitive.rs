use crate::objects::{Dictionary, Stream};
use std::fmt;

/// Identity of an indirect object: a dense, 1-based number plus a generation.
///
/// Generation is always 0 for freshly written files; number 0 is reserved for
/// the head of the free list in the cross-reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Real(f64),
    String(String),
    /// Raw bytes written as a hexadecimal string `<...>`.
    HexString(Vec<u8>),
    Name(String),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Stream),
    Reference(ObjectId),
}

impl Object {
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// A text string for document metadata. ASCII stays a literal string;
    /// anything else becomes UTF-16BE with a byte order mark.
    pub fn text_string(text: &str) -> Self {
        if text.is_ascii() {
            return Object::String(text.to_string());
        }
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend(unit.to_be_bytes());
        }
        Object::HexString(bytes)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(f) => Some(*f),
            Object::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            Object::Stream(stream) => Some(stream.dictionary()),
            _ => None,
        }
    }

    /// Visits every indirect reference nested in this value.
    pub fn for_each_reference(&self, visit: &mut impl FnMut(ObjectId)) {
        match self {
            Object::Reference(id) => visit(*id),
            Object::Array(items) => {
                for item in items {
                    item.for_each_reference(visit);
                }
            }
            Object::Dictionary(dict) => {
                for value in dict.values() {
                    value.for_each_reference(visit);
                }
            }
            Object::Stream(stream) => {
                for value in stream.dictionary().values() {
                    value.for_each_reference(visit);
                }
            }
            Object::Integer(_)
            | Object::Real(_)
            | Object::String(_)
            | Object::HexString(_)
            | Object::Name(_) => {}
        }
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<u32> for Object {
    fn from(i: u32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Real(f)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(v)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<Stream> for Object {
    fn from(s: Stream) -> Self {
        Object::Stream(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_display() {
        let id = ObjectId::new(12, 0);
        assert_eq!(id.to_string(), "12 0 R");
        assert_eq!(id.number(), 12);
        assert_eq!(id.generation(), 0);
    }

    #[test]
    fn test_object_id_ordering() {
        let mut ids = vec![ObjectId::new(3, 0), ObjectId::new(1, 0), ObjectId::new(2, 0)];
        ids.sort();
        let numbers: Vec<u32> = ids.iter().map(|id| id.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Object::from(7), Object::Integer(7));
        assert_eq!(Object::from(612.5), Object::Real(612.5));
        assert_eq!(Object::from("Title"), Object::String("Title".to_string()));
        assert_eq!(Object::text_string("Title"), Object::String("Title".to_string()));
        assert_eq!(
            Object::text_string("Café"),
            Object::HexString(vec![0xFE, 0xFF, 0x00, 0x43, 0x00, 0x61, 0x00, 0x66, 0x00, 0xE9])
        );
        assert_eq!(Object::name("Catalog").as_name(), Some("Catalog"));
        assert_eq!(
            Object::from(ObjectId::new(4, 0)).as_reference(),
            Some(ObjectId::new(4, 0))
        );
        assert_eq!(Object::Integer(3).as_real(), Some(3.0));
        assert_eq!(Object::name("X").as_integer(), None);
    }

    #[test]
    fn test_for_each_reference_walks_nested_values() {
        let mut resources = Dictionary::new();
        let mut fonts = Dictionary::new();
        fonts.set("F1", ObjectId::new(7, 0));
        resources.set("Font", fonts);

        let mut page = Dictionary::new();
        page.set("Parent", ObjectId::new(8, 0));
        page.set("Kids", vec![Object::Reference(ObjectId::new(2, 0))]);
        page.set("Resources", resources);

        let mut seen = Vec::new();
        Object::Dictionary(page).for_each_reference(&mut |id| seen.push(id.number()));
        seen.sort();
        assert_eq!(seen, vec![2, 7, 8]);
    }
}
