//! Filename sanitization for generated documents.
//!
//! Every filename that reaches a `Content-Disposition` header or the local
//! filesystem goes through [`sanitize_filename`] first.

/// Extension appended to every generated document name.
pub const PDF_EXTENSION: &str = ".pdf";

/// Normalizes a user-supplied name into a filesystem and header safe `.pdf` filename.
///
/// Appends `.pdf` unless the name already ends with it (case-sensitive), then
/// replaces every character outside `[A-Za-z0-9.-]` with `_`. Path separators
/// are replaced too, so the result never escapes the target directory.
///
/// # Examples
///
/// ```
/// use html_to_pdf::sanitize_filename;
///
/// assert_eq!(sanitize_filename("report"), "report.pdf");
/// assert_eq!(sanitize_filename("my report!.pdf"), "my_report_.pdf");
/// assert_eq!(sanitize_filename("a.pdf"), "a.pdf");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let mut with_extension = name.to_string();
    if !with_extension.ends_with(PDF_EXTENSION) {
        with_extension.push_str(PDF_EXTENSION);
    }

    with_extension
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
