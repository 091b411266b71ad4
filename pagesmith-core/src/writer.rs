use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, ObjectArena, ObjectId};
use crate::text::escape_literal;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Serializes an object arena into a complete file.
///
/// Objects are written in ascending identity order while their byte offsets
/// are recorded; the cross-reference table and trailer are then emitted from
/// those offsets.
pub struct PdfWriter<W: Write> {
    writer: W,
    xref_positions: Vec<(ObjectId, u64)>,
    current_position: u64,
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            xref_positions: Vec::new(),
            current_position: 0,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.current_position
    }

    /// Writes every object in `objects` followed by the xref table and trailer.
    ///
    /// References are checked before anything is written: a reference to an
    /// identity the arena does not hold fails with
    /// [`PdfError::InvalidObjectReference`].
    pub fn write_document(
        &mut self,
        objects: &ObjectArena,
        root: ObjectId,
        info: Option<ObjectId>,
    ) -> Result<()> {
        let resolved: Vec<(ObjectId, Object)> = objects
            .iter()
            .map(|(id, node)| (id, node.to_pdf_object()))
            .collect();
        check_references(objects, &resolved, root, info)?;

        self.write_header()?;
        for (id, object) in &resolved {
            self.write_object(*id, object)?;
        }

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(root, info, xref_position)?;
        self.writer.flush()?;

        debug!(
            objects = self.xref_positions.len(),
            xref = xref_position,
            bytes = self.current_position,
            "wrote document"
        );
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.7\n")?;
        // Binary comment to ensure file is treated as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}

impl<W: Write> PdfWriter<W> {
    fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        trace!(object = id.number(), offset = self.current_position, "object offset");
        self.xref_positions.push((id, self.current_position));

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;

        self.write_object_value(object)?;

        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(format_real(*f).as_bytes())?,
            Object::String(s) => {
                self.write_bytes(b"(")?;
                self.write_bytes(escape_literal(s).as_bytes())?;
                self.write_bytes(b")")?;
            }
            Object::HexString(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                self.write_bytes(b"<")?;
                self.write_bytes(hex.as_bytes())?;
                self.write_bytes(b">")?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => self.write_dictionary(dict)?,
            Object::Stream(stream) => {
                self.write_dictionary(stream.dictionary())?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(stream.data())?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => {
                let ref_str = format!("{} {} R", id.number(), id.generation());
                self.write_bytes(ref_str.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &Dictionary) -> Result<()> {
        self.write_bytes(b"<<")?;
        for (key, value) in dict.entries() {
            self.write_bytes(b"\n/")?;
            self.write_bytes(key.as_bytes())?;
            self.write_bytes(b" ")?;
            self.write_object_value(value)?;
        }
        self.write_bytes(b"\n>>")?;
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        self.write_bytes(b"xref\n")?;

        // Identities are dense, so a single subsection covers 0..=max
        let max_obj_num = self.max_object_number();
        self.write_bytes(format!("0 {}\n", max_obj_num + 1).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        let positions: Vec<u64> = self.xref_positions.iter().map(|(_, pos)| *pos).collect();
        for position in positions {
            let entry = format!("{:010} {:05} n \n", position, 0);
            self.write_bytes(entry.as_bytes())?;
        }

        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: Option<ObjectId>,
        xref_position: u64,
    ) -> Result<()> {
        let mut trailer = Dictionary::new();
        trailer.set("Size", Object::Integer(self.max_object_number() as i64 + 1));
        trailer.set("Root", catalog_id);
        if let Some(info_id) = info_id {
            trailer.set("Info", info_id);
        }

        self.write_bytes(b"trailer\n")?;
        self.write_dictionary(&trailer)?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF")?;

        Ok(())
    }

    fn max_object_number(&self) -> u32 {
        self.xref_positions
            .iter()
            .map(|(id, _)| id.number())
            .max()
            .unwrap_or(0)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

fn check_references(
    objects: &ObjectArena,
    resolved: &[(ObjectId, Object)],
    root: ObjectId,
    info: Option<ObjectId>,
) -> Result<()> {
    let mut dangling = None;
    let mut visit = |id: ObjectId| {
        if dangling.is_none() && !objects.contains(id) {
            dangling = Some(id);
        }
    };

    visit(root);
    if let Some(info) = info {
        visit(info);
    }
    for (_, object) in resolved {
        object.for_each_reference(&mut visit);
    }

    match dangling {
        Some(id) => Err(PdfError::InvalidObjectReference(id.number(), id.generation())),
        None => Ok(()),
    }
}

/// Formats a real in its shortest round-trip form, so `612.0` prints as `612`
/// and supplied fractions are kept exactly.
pub fn format_real(value: f64) -> String {
    format!("{}", value + 0.0)
}
