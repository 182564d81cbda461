use crate::{foundation::mime::TEXT_HTML, model::artifact::Artifact, typeset::math::MathNode};

pub const MIMETYPES: &[&str] = &[TEXT_HTML];

/// Markup is trusted as-is; it may embed math, so the node starts dirty.
pub fn transform(data: &str) -> Artifact {
    Artifact::Html(MathNode::from_html(data))
}
