//! Mimetype constants for the built-in transformers.

/// Plain text.
pub const TEXT_PLAIN: &str = "text/plain";
/// Trusted HTML markup.
pub const TEXT_HTML: &str = "text/html";
/// LaTeX math source.
pub const TEXT_LATEX: &str = "text/latex";
/// Base64 PNG image.
pub const IMAGE_PNG: &str = "image/png";
/// Base64 JPEG image.
pub const IMAGE_JPEG: &str = "image/jpeg";
/// Base64 GIF image.
pub const IMAGE_GIF: &str = "image/gif";
/// Inline SVG markup.
pub const IMAGE_SVG: &str = "image/svg+xml";
/// ANSI-colored console output.
pub const CONSOLE_TEXT: &str = "application/vnd.jupyter.console-text";
/// Script source (legacy mimetype).
pub const TEXT_JAVASCRIPT: &str = "text/javascript";
/// Script source.
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";

/// Returns true for `type/subtype` strings with two non-empty halves and no whitespace.
pub fn is_valid_mimetype(mimetype: &str) -> bool {
    let Some((ty, subtype)) = mimetype.split_once('/') else {
        return false;
    };
    !ty.is_empty()
        && !subtype.is_empty()
        && !subtype.contains('/')
        && !mimetype.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/mime.rs"]
mod tests;
