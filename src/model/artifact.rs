use crate::{
    foundation::{
        error::TransformimeResult,
        markup::{escape_html, escape_script_body},
    },
    typeset::math::{MathNode, Typesetter},
};

/// Displayable unit produced by a transformer.
///
/// The dispatcher hands artifacts back untouched; only the display surface looks
/// inside them (see [`Artifact::to_html`]).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Artifact {
    /// Text shown verbatim.
    Text {
        /// The text content.
        text: String,
    },
    /// Trusted markup, typeset after attach.
    Html(MathNode),
    /// Raster image referenced through a `data:` URI.
    Image {
        /// Image mimetype.
        mimetype: String,
        /// `data:{mimetype};base64,{payload}`.
        src: String,
        /// Intrinsic width when the payload could be read.
        width: Option<u32>,
        /// Intrinsic height when the payload could be read.
        height: Option<u32>,
    },
    /// Validated inline SVG document.
    Svg {
        /// The SVG markup as supplied.
        markup: String,
        /// Document width in user units, when it could be resolved.
        width: Option<f32>,
        /// Document height in user units, when it could be resolved.
        height: Option<f32>,
    },
    /// LaTeX source awaiting a typesetting pass.
    Latex(MathNode),
    /// Console output converted to styled markup.
    ConsoleText {
        /// Escaped text with ANSI styling mapped to `<span style=..>` runs.
        html: String,
    },
    /// Script executed when attached to the display surface.
    Script {
        /// Script mimetype, kept as the element `type`.
        mimetype: String,
        /// Script source.
        source: String,
    },
    /// Markup produced by a third-party transformer.
    Custom {
        /// Free-form artifact kind chosen by the transformer.
        kind: String,
        /// Markup inserted as-is.
        html: String,
    },
}

impl Artifact {
    /// Short name of the artifact family.
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Html(_) => "html",
            Self::Image { .. } => "image",
            Self::Svg { .. } => "svg",
            Self::Latex(_) => "latex",
            Self::ConsoleText { .. } => "console-text",
            Self::Script { .. } => "script",
            Self::Custom { kind, .. } => kind,
        }
    }

    pub fn math(&self) -> Option<&MathNode> {
        match self {
            Self::Html(node) | Self::Latex(node) => Some(node),
            _ => None,
        }
    }

    pub fn math_mut(&mut self) -> Option<&mut MathNode> {
        match self {
            Self::Html(node) | Self::Latex(node) => Some(node),
            _ => None,
        }
    }

    /// Run a pending typesetting pass. Non-math artifacts never need one.
    pub fn ensure_typeset(&mut self, typesetter: &dyn Typesetter) -> TransformimeResult<bool> {
        match self.math_mut() {
            Some(node) => node.ensure_typeset(typesetter),
            None => Ok(false),
        }
    }

    /// Render the artifact as an HTML fragment for a display surface.
    pub fn to_html(&self) -> String {
        match self {
            Self::Text { text } => format!("<pre>{}</pre>", escape_html(text)),
            Self::Html(node) => node.display_markup(),
            Self::Image {
                src, width, height, ..
            } => {
                let mut out = format!("<img src=\"{}\"", escape_html(src));
                if let (Some(w), Some(h)) = (width, height) {
                    out.push_str(&format!(" width=\"{w}\" height=\"{h}\""));
                }
                out.push_str("/>");
                out
            }
            Self::Svg { markup, .. } => markup.clone(),
            Self::Latex(node) => format!("<div class=\"latex\">{}</div>", node.display_markup()),
            Self::ConsoleText { html } => format!("<pre>{html}</pre>"),
            Self::Script { mimetype, source } => format!(
                "<script type=\"{}\">{}</script>",
                escape_html(mimetype),
                escape_script_body(source)
            ),
            Self::Custom { html, .. } => html.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/artifact.rs"]
mod tests;
