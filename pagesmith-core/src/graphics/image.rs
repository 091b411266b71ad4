//! Image embedding for PDF generation
//!
//! Image payloads are embedded as-is. The leading bytes pick the decode
//! filter; currently supports:
//! - JPEG images (`/DCTDecode`)

use crate::objects::{Dictionary, Object, Stream};
use crate::{PdfError, Result};

/// Represents an image that can be embedded in a PDF
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Image data
    data: Vec<u8>,
    /// Image format
    format: ImageFormat,
    /// Width in pixels, when known
    width: Option<u32>,
    /// Height in pixels, when known
    height: Option<u32>,
    /// Color space
    color_space: ColorSpace,
    /// Bits per component
    bits_per_component: u8,
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG format
    Jpeg,
}

impl ImageFormat {
    /// Classifies a payload by its leading bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0xFF, 0xD8]) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    /// Decode filter consumers must apply to the payload.
    pub fn filter(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "DCTDecode",
        }
    }
}

/// Color spaces for images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale
    DeviceGray,
    /// RGB color
    DeviceRGB,
    /// CMYK color
    DeviceCMYK,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

impl Image {
    /// Wraps a raw payload, sniffing its format.
    ///
    /// Fails with [`PdfError::UnsupportedImageFormat`] when the signature is
    /// not recognised. Pixel dimensions are read from the header when it
    /// declares them; otherwise they stay unknown.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::sniff(&data).ok_or_else(|| {
            PdfError::UnsupportedImageFormat(describe_signature(&data).to_string())
        })?;

        let image = match format {
            ImageFormat::Jpeg => {
                let header = parse_jpeg_header(&data);
                Image {
                    data,
                    format,
                    width: header.map(|h| h.width),
                    height: header.map(|h| h.height),
                    color_space: header
                        .map(|h| h.color_space)
                        .unwrap_or(ColorSpace::DeviceRGB),
                    bits_per_component: 8,
                }
            }
        };
        Ok(image)
    }

    /// Get image width in pixels, when the header declared it
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Get image height in pixels, when the header declared it
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Get image data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel dimensions, if the header declared both.
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }

    /// Uses a placement box as the pixel size when the header gave none.
    ///
    /// Values are rounded up and never drop below 1.
    pub fn fill_missing_size(&mut self, width: f64, height: f64) {
        if self.pixel_size().is_none() {
            self.width = Some(box_to_pixels(width));
            self.height = Some(box_to_pixels(height));
        }
    }

    /// Convert to PDF XObject
    pub fn to_pdf_object(&self) -> Object {
        let mut dict = Dictionary::new();

        dict.set("Type", Object::name("XObject"));
        dict.set("Subtype", Object::name("Image"));
        dict.set("Width", self.width.unwrap_or(1));
        dict.set("Height", self.height.unwrap_or(1));
        dict.set("ColorSpace", Object::name(self.color_space.pdf_name()));
        dict.set("BitsPerComponent", self.bits_per_component as i64);

        let mut stream = Stream::with_dictionary(dict, self.data.clone());
        stream.set_filter(self.format.filter());
        Object::Stream(stream)
    }
}

fn box_to_pixels(extent: f64) -> u32 {
    if extent.is_finite() && extent > 1.0 {
        extent.ceil().min(u32::MAX as f64) as u32
    } else {
        1
    }
}

/// Names a few well-known signatures so rejections say what was passed in.
fn describe_signature(data: &[u8]) -> &'static str {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        "PNG images are not supported"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "GIF images are not supported"
    } else if data.starts_with(b"BM") {
        "BMP images are not supported"
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        "TIFF images are not supported"
    } else if data.is_empty() {
        "empty image payload"
    } else {
        "unrecognised image signature"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct JpegHeader {
    width: u32,
    height: u32,
    color_space: ColorSpace,
}

/// Walks JPEG segments up to the first start-of-frame marker.
///
/// Returns `None` for truncated or malformed headers.
fn parse_jpeg_header(data: &[u8]) -> Option<JpegHeader> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }

    let mut pos = 2;

    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return None;
        }

        let marker = data[pos + 1];
        pos += 2;

        // Skip padding bytes
        if marker == 0xFF {
            pos -= 1;
            continue;
        }

        // Start of Frame markers, excluding DHT, JPG and DAC
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC
        {
            // length(2) precision(1) height(2) width(2) components(1)
            if pos + 7 >= data.len() {
                return None;
            }

            let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
            let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let color_space = match data[pos + 7] {
                1 => ColorSpace::DeviceGray,
                4 => ColorSpace::DeviceCMYK,
                _ => ColorSpace::DeviceRGB,
            };

            if width == 0 || height == 0 {
                return None;
            }

            return Some(JpegHeader {
                width,
                height,
                color_space,
            });
        } else if marker == 0xD9 || marker == 0xDA {
            // End of image, or entropy-coded data begins before any frame
            return None;
        } else if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            // No length field for these markers
            continue;
        } else {
            if pos + 1 >= data.len() {
                return None;
            }
            let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
            pos += length;
        }
    }

    None
}
