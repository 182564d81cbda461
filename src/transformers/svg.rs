use crate::{
    foundation::{
        error::{TransformimeError, TransformimeResult},
        mime::IMAGE_SVG,
    },
    model::artifact::Artifact,
};

pub const MIMETYPES: &[&str] = &[IMAGE_SVG];

/// Parse inline SVG markup. The document root must be an `<svg>` element, in any
/// namespace or none.
///
/// The document size is filled in when `usvg` can resolve it.
pub fn transform(data: &str) -> TransformimeResult<Artifact> {
    let xml_opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(data, xml_opts)
        .map_err(|e| TransformimeError::render(format!("failed to create <svg> element: {e}")))?;

    let root = doc.root_element().tag_name().name();
    if root != "svg" {
        return Err(TransformimeError::render(format!(
            "failed to create <svg> element: root element is <{root}>"
        )));
    }

    let (width, height) = match document_size(data) {
        Some((w, h)) => (Some(w), Some(h)),
        None => {
            tracing::debug!(len = data.len(), "svg size unavailable");
            (None, None)
        }
    };

    Ok(Artifact::Svg {
        markup: data.to_owned(),
        width,
        height,
    })
}

fn document_size(data: &str) -> Option<(f32, f32)> {
    let tree = usvg::Tree::from_str(data, &usvg::Options::default()).ok()?;
    let size = tree.size();
    Some((size.width(), size.height()))
}
