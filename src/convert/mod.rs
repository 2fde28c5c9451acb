//! HTML to Markdown conversion
//!
//! The crawler treats conversion as a pluggable step: anything implementing
//! [`MarkdownConverter`] can turn a stored HTML page into Markdown text. A
//! failed conversion never stops the crawl; the page is kept without a
//! Markdown rendering.

mod html2md;

pub use self::html2md::Html2MdConverter;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while producing a Markdown file
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to convert HTML: {0}")]
    Convert(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Converts an HTML document to Markdown text
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, html: &str) -> Result<String, ConversionError>;
}

impl<C: MarkdownConverter + ?Sized> MarkdownConverter for Box<C> {
    fn convert(&self, html: &str) -> Result<String, ConversionError> {
        (**self).convert(html)
    }
}

/// Converts the HTML file at `html_path` and writes the result to `markdown_path`
///
/// Parent directories of `markdown_path` are created as needed. Nothing is
/// written when reading or converting fails.
pub fn convert_file(
    converter: &dyn MarkdownConverter,
    html_path: &Path,
    markdown_path: &Path,
) -> Result<(), ConversionError> {
    let html = fs::read_to_string(html_path).map_err(|source| ConversionError::Read {
        path: html_path.to_path_buf(),
        source,
    })?;

    let markdown = converter.convert(&html)?;

    let write_err = |source| ConversionError::Write {
        path: markdown_path.to_path_buf(),
        source,
    };
    if let Some(parent) = markdown_path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(markdown_path, markdown).map_err(write_err)?;

    Ok(())
}
