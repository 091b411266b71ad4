//! Error handling through the public API
//!
//! Errors surface from the call that detects them, a failing page leaves no
//! trace in the document, and nothing is written on failure.

use pagesmith::{Document, PageSize, PdfError, TextOptions};

#[test]
fn test_invalid_colors_are_rejected() {
    let tokens = ["", "#", "#12", "#1234", "#12345g", "red", "##fff", "#fffffff"];

    for token in tokens {
        let mut doc = Document::new();
        let result = doc.add_page(|page| {
            page.rect(0.0, 0.0, 10.0, 10.0, token)?;
            Ok(())
        });
        match result {
            Err(PdfError::InvalidColor(value)) => assert_eq!(value, token),
            other => panic!("{token:?} should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn test_valid_color_forms() {
    let mut doc = Document::new();
    let result = doc.add_page(|page| {
        page.rect(0.0, 0.0, 1.0, 1.0, "#ABC")?
            .rect(0.0, 0.0, 1.0, 1.0, "a1b2c3")?
            .line(0.0, 0.0, 1.0, 1.0, "fff", None)?
            .text("x", 0.0, 0.0, 8.0, &TextOptions::new().color("#000000"))?;
        Ok(())
    });
    assert!(result.is_ok());
}

#[test]
fn test_unsupported_image_formats() {
    let payloads: [&[u8]; 4] = [
        b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR",
        b"GIF89a\x01\x00\x01\x00",
        b"",
        &[0xD8, 0xFF],
    ];

    for payload in payloads {
        let mut doc = Document::new();
        let result = doc.add_page(|page| {
            page.image(payload, 0.0, 0.0, 10.0, 10.0)?;
            Ok(())
        });
        assert!(
            matches!(result, Err(PdfError::UnsupportedImageFormat(_))),
            "payload {payload:?} should be rejected"
        );
    }
}

#[test]
fn test_natural_size_requires_dimensions() {
    let mut doc = Document::new();
    let result = doc.add_page(|page| {
        page.image_natural(&[0xFF, 0xD8, 0xFF, 0xD9][..], 0.0, 0.0)?;
        Ok(())
    });
    assert!(matches!(result, Err(PdfError::InvalidImage(_))));
}

#[test]
fn test_invalid_page_sizes() {
    let sizes = [
        (0.0, 792.0),
        (612.0, 0.0),
        (-1.0, 100.0),
        (f64::NAN, 100.0),
        (100.0, f64::INFINITY),
    ];

    for (width, height) in sizes {
        let mut doc = Document::new();
        let mut called = false;
        let result = doc.add_page_sized(PageSize::new(width, height), |_| {
            called = true;
            Ok(())
        });

        assert!(matches!(result, Err(PdfError::InvalidPageSize { .. })));
        assert!(!called, "callback must not run for an invalid size");
        assert_eq!(doc.page_count(), 0);
    }
}

#[test]
fn test_build_with_zero_pages() {
    let mut doc = Document::new();
    doc.set_title("Nothing here");

    match doc.build() {
        Err(PdfError::BuilderMisuse(message)) => assert!(message.contains("no pages")),
        other => panic!("expected BuilderMisuse, got {other:?}"),
    }
}

#[test]
fn test_zero_pages_after_failed_page() {
    let mut doc = Document::new();
    let result = doc.add_page(|page| {
        page.rect(0.0, 0.0, 1.0, 1.0, "nope")?;
        Ok(())
    });

    assert!(matches!(result, Err(PdfError::InvalidColor(_))));
    assert_eq!(doc.page_count(), 0);
    assert!(matches!(doc.build(), Err(PdfError::BuilderMisuse(_))));
}

#[test]
fn test_failed_page_leaves_no_trace() {
    let mut doc = Document::new();
    doc.add_page(|page| {
        page.text("kept", 10.0, 10.0, 12.0, &TextOptions::new())?;
        Ok(())
    })
    .unwrap();

    let result = doc.add_page(|page| {
        page.text("discarded", 10.0, 10.0, 12.0, &TextOptions::new())?
            .image(&[0xFF, 0xD8][..], 0.0, 0.0, 5.0, 5.0)?
            .line(0.0, 0.0, 1.0, 1.0, "#zzz", None)?;
        Ok(())
    });
    assert!(result.is_err());
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.object_count(), 2);

    let output = String::from_utf8_lossy(&doc.build().unwrap()).into_owned();
    assert!(output.contains("(kept) Tj"));
    assert!(!output.contains("discarded"));
    assert!(!output.contains("/Subtype /Image"));
    assert!(output.contains("/Count 1\n"));
}

#[test]
fn test_callback_error_is_returned_unchanged() {
    let mut doc = Document::new();
    let result = doc.add_page(|_| Err(PdfError::InvalidImage("from callback".to_string())));

    match result {
        Err(PdfError::InvalidImage(message)) => assert_eq!(message, "from callback"),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_save_into_missing_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("missing").join("out.pdf");

    let mut doc = Document::new();
    doc.add_page(|_| Ok(())).unwrap();

    assert!(matches!(doc.save(&path), Err(PdfError::Io(_))));
    assert!(!path.exists());
}

#[test]
fn test_save_without_pages_creates_no_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("empty.pdf");

    let result = Document::new().save(&path);
    assert!(matches!(result, Err(PdfError::BuilderMisuse(_))));
    assert!(!path.exists());
}
