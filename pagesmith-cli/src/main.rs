mod layout;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use layout::Layout;
use pagesmith::{measure_text, Document, TextAlign, TextOptions};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pagesmith",
    about = "Generate PDF documents from the command line",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a single-page PDF with one line of text
    Create {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Text to include in the PDF
        #[arg(short, long)]
        text: String,

        /// Font size in points
        #[arg(short, long, default_value_t = 24.0)]
        size: f64,
    },

    /// Generate a demo PDF with text, shapes and colors
    Demo {
        /// Output file path
        #[arg(short, long, default_value = "demo.pdf")]
        output: PathBuf,
    },

    /// Build a PDF from a JSON layout file
    Render {
        /// Layout file; image paths inside it are relative to its directory
        layout: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the estimated width of a text run in points
    Measure {
        /// Text to measure
        text: String,

        /// Font size in points
        #[arg(short, long, default_value_t = 12.0)]
        size: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create { output, text, size } => {
            let mut doc = Document::new();
            doc.add_page(|page| {
                page.text(&text, 50.0, 740.0, size, &TextOptions::new())?;
                Ok(())
            })?;
            save(doc, &output)?;

            println!("PDF created successfully!");
        }

        Commands::Demo { output } => {
            let doc = demo_document()?;
            save(doc, &output)?;

            println!("Demo PDF created successfully!");
        }

        Commands::Render { layout, output } => {
            let base_dir = layout.parent().unwrap_or_else(|| Path::new("."));
            let doc = Layout::from_file(&layout)?.render(base_dir)?;
            let pages = doc.page_count();
            save(doc, &output)?;

            println!("Rendered {pages} page(s) to {}", output.display());
        }

        Commands::Measure { text, size } => {
            println!("{:.3}", measure_text(&text, size));
        }
    }

    Ok(())
}

fn save(doc: Document, output: &Path) -> Result<()> {
    doc.save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), "wrote document");
    Ok(())
}

fn demo_document() -> pagesmith::Result<Document> {
    let mut doc = Document::new();
    doc.set_title("pagesmith Demo");
    doc.set_author("pagesmith CLI");

    doc.add_page(|page| {
        let column = 512.0;
        page.rect(50.0, 700.0, column, 60.0, "#1f3b73")?
            .text(
                "pagesmith Demo",
                50.0,
                720.0,
                36.0,
                &TextOptions::new()
                    .color("#ffffff")
                    .align(TextAlign::Center)
                    .width(column),
            )?;

        for (i, align) in [TextAlign::Left, TextAlign::Center, TextAlign::Right]
            .into_iter()
            .enumerate()
        {
            let y = 640.0 - i as f64 * 30.0;
            page.text(
                &format!("{align:?} aligned"),
                50.0,
                y,
                16.0,
                &TextOptions::new().align(align).width(column),
            )?
            .line(50.0, y - 6.0, 50.0 + column, y - 6.0, "#cccccc", Some(0.5))?;
        }

        for (i, color) in ["#e63946", "#f4a261", "#2a9d8f", "#264653"].iter().enumerate() {
            let x = 50.0 + i as f64 * 130.0;
            page.rect(x, 400.0, 120.0, 120.0, color)?
                .line(x, 390.0, x + 120.0, 390.0, color, Some(3.0))?;
        }

        page.text(
            "Native Rust PDF Generation",
            50.0,
            340.0,
            16.0,
            &TextOptions::new().color("#333"),
        )?;
        Ok(())
    })?;

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_demo_document_builds() {
        let doc = demo_document().unwrap();
        assert_eq!(doc.page_count(), 1);

        let output = String::from_utf8_lossy(&doc.build().unwrap()).into_owned();
        assert!(output.contains("/Title (pagesmith Demo)"));
        assert!(output.contains("(Center aligned) Tj"));
    }
}
