//! Transformer contract and the built-in transformers.

pub(crate) mod console;
pub(crate) mod html;
pub(crate) mod latex;
pub(crate) mod raster;
pub(crate) mod script;
pub(crate) mod svg;
pub(crate) mod text;

use crate::{
    foundation::error::{TransformimeError, TransformimeResult},
    model::artifact::Artifact,
};

/// Converts raw payloads of the mimetypes it claims into displayable artifacts.
///
/// `transform` is only called with a mimetype from [`Transformer::mimetypes`]. It must
/// not touch registry state; invalid payloads are reported as
/// [`TransformimeError::Render`].
pub trait Transformer<A = Artifact>: Send + Sync + std::fmt::Debug {
    /// Mimetypes this transformer accepts. Must be non-empty.
    fn mimetypes(&self) -> &[&str];

    /// Whether `mimetype` is one of the accepted mimetypes.
    fn claims(&self, mimetype: &str) -> bool {
        self.mimetypes().contains(&mimetype)
    }

    /// Render `data`, offered as `mimetype`.
    fn transform(&self, mimetype: &str, data: &str) -> TransformimeResult<A>;
}

/// The built-in transformers, one per mimetype family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `text/plain`
    Text,
    /// `text/html`
    Html,
    /// `image/png`, `image/jpeg`, `image/gif`
    Image,
    /// `image/svg+xml`
    Svg,
    /// `text/latex`
    Latex,
    /// `application/vnd.jupyter.console-text`
    ConsoleText,
    /// `text/javascript`, `application/javascript`
    Javascript,
}

impl Builtin {
    /// Every built-in transformer.
    pub const ALL: [Builtin; 7] = [
        Builtin::Text,
        Builtin::Html,
        Builtin::Image,
        Builtin::Svg,
        Builtin::Latex,
        Builtin::ConsoleText,
        Builtin::Javascript,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Image => "image",
            Self::Svg => "svg",
            Self::Latex => "latex",
            Self::ConsoleText => "console-text",
            Self::Javascript => "javascript",
        }
    }
}

impl Transformer for Builtin {
    fn mimetypes(&self) -> &[&str] {
        match self {
            Self::Text => text::MIMETYPES,
            Self::Html => html::MIMETYPES,
            Self::Image => raster::MIMETYPES,
            Self::Svg => svg::MIMETYPES,
            Self::Latex => latex::MIMETYPES,
            Self::ConsoleText => console::MIMETYPES,
            Self::Javascript => script::MIMETYPES,
        }
    }

    fn transform(&self, mimetype: &str, data: &str) -> TransformimeResult<Artifact> {
        if !self.claims(mimetype) {
            return Err(TransformimeError::render(format!(
                "{} transformer does not handle '{mimetype}'",
                self.name()
            )));
        }

        match self {
            Self::Text => Ok(text::transform(data)),
            Self::Html => Ok(html::transform(data)),
            Self::Image => raster::transform(mimetype, data),
            Self::Svg => svg::transform(data),
            Self::Latex => Ok(latex::transform(data)),
            Self::ConsoleText => Ok(console::transform(data)),
            Self::Javascript => Ok(script::transform(mimetype, data)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transformers/builtin.rs"]
mod tests;
