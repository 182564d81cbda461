use crate::{foundation::mime::TEXT_PLAIN, model::artifact::Artifact};

pub const MIMETYPES: &[&str] = &[TEXT_PLAIN];

pub fn transform(data: &str) -> Artifact {
    Artifact::Text {
        text: data.to_owned(),
    }
}
