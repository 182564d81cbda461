use std::io::Cursor;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose},
};

use crate::{
    foundation::{
        error::{TransformimeError, TransformimeResult},
        mime::{IMAGE_GIF, IMAGE_JPEG, IMAGE_PNG},
    },
    model::artifact::Artifact,
};

pub const MIMETYPES: &[&str] = &[IMAGE_PNG, IMAGE_JPEG, IMAGE_GIF];

/// Standard alphabet; trailing `=` padding may be present or absent.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Wrap a base64 payload in a `data:` URI.
///
/// Line breaks and other ASCII whitespace in the payload are dropped before decoding,
/// and unpadded payloads are accepted. The URI always carries canonical padded base64.
/// Dimensions are filled in when the decoded bytes are a readable image.
pub fn transform(mimetype: &str, data: &str) -> TransformimeResult<Artifact> {
    let payload: String = data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Err(TransformimeError::render(format!(
            "{mimetype} payload is empty"
        )));
    }

    let bytes = PAYLOAD_ENGINE
        .decode(&payload)
        .map_err(|e| {
            TransformimeError::render(format!("{mimetype} payload is not valid base64: {e}"))
        })?;

    let (width, height) = match read_dimensions(&bytes) {
        Some((w, h)) => (Some(w), Some(h)),
        None => {
            tracing::debug!(mimetype, len = bytes.len(), "image dimensions unavailable");
            (None, None)
        }
    };

    Ok(Artifact::Image {
        mimetype: mimetype.to_owned(),
        src: format!(
            "data:{mimetype};base64,{}",
            general_purpose::STANDARD.encode(&bytes)
        ),
        width,
        height,
    })
}

fn read_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ::image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
