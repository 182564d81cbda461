use crate::{foundation::mime::TEXT_LATEX, model::artifact::Artifact, typeset::math::MathNode};

pub const MIMETYPES: &[&str] = &[TEXT_LATEX];

/// The LaTeX source is kept verbatim; rendering is left to the typesetting pass.
pub fn transform(data: &str) -> Artifact {
    Artifact::Latex(MathNode::from_text(data))
}
