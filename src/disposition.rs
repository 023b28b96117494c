//! `Content-Disposition` header rendering.

use std::fmt;

/// How a generated PDF is presented to the receiving browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DispositionMode {
    /// Displayed in the browser.
    #[default]
    Inline,
    /// Offered as a download.
    Attachment,
}

impl DispositionMode {
    /// Returns the header token for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Attachment => "attachment",
        }
    }

    /// Renders the full `Content-Disposition` header value.
    ///
    /// The filename is inserted verbatim between double quotes and must already
    /// be sanitized (see [`sanitize_filename`](crate::sanitize_filename)).
    ///
    /// # Examples
    ///
    /// ```
    /// use html_to_pdf::DispositionMode;
    ///
    /// assert_eq!(
    ///     DispositionMode::Attachment.header_value(Some("a.pdf")),
    ///     r#"attachment; filename="a.pdf""#
    /// );
    /// assert_eq!(DispositionMode::Inline.header_value(None), "inline");
    /// ```
    #[must_use]
    pub fn header_value(self, filename: Option<&str>) -> String {
        match filename.filter(|name| !name.is_empty()) {
            Some(name) => format!("{}; filename=\"{name}\"", self.as_str()),
            None => self.as_str().to_string(),
        }
    }
}

impl fmt::Display for DispositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_with_filename() {
        assert_eq!(
            DispositionMode::Attachment.header_value(Some("a.pdf")),
            "attachment; filename=\"a.pdf\""
        );
    }

    #[test]
    fn test_inline_without_filename() {
        assert_eq!(DispositionMode::Inline.header_value(None), "inline");
    }

    #[test]
    fn test_inline_with_filename() {
        assert_eq!(
            DispositionMode::Inline.header_value(Some("report.pdf")),
            "inline; filename=\"report.pdf\""
        );
    }

    #[test]
    fn test_empty_filename_is_omitted() {
        assert_eq!(DispositionMode::Attachment.header_value(Some("")), "attachment");
    }

    #[test]
    fn test_display_matches_header_token() {
        assert_eq!(DispositionMode::Inline.to_string(), "inline");
        assert_eq!(DispositionMode::Attachment.to_string(), "attachment");
    }
}
