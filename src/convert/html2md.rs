use crate::convert::{ConversionError, MarkdownConverter};
use std::panic::{self, AssertUnwindSafe};

/// Default converter backed by the `html2md` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2MdConverter;

impl MarkdownConverter for Html2MdConverter {
    fn convert(&self, html: &str) -> Result<String, ConversionError> {
        // html2md panics on some malformed tables; treat that as a failed page
        panic::catch_unwind(AssertUnwindSafe(|| ::html2md::parse_html(html)))
            .map(|markdown| markdown.trim().to_string())
            .map_err(|_| ConversionError::Convert("html2md panicked on document".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let markdown = Html2MdConverter
            .convert("<html><body><h1>Title</h1><p>Some text</p></body></html>")
            .unwrap();
        assert!(markdown.contains("Title"));
        assert!(markdown.contains("Some text"));
    }

    #[test]
    fn test_links_survive() {
        let markdown = Html2MdConverter
            .convert(r#"<p><a href="/about">About us</a></p>"#)
            .unwrap();
        assert!(markdown.contains("[About us](/about)"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Html2MdConverter.convert("").unwrap(), "");
    }
}
