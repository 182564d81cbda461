use crate::{
    foundation::mime::{APPLICATION_JAVASCRIPT, TEXT_JAVASCRIPT},
    model::artifact::Artifact,
};

pub const MIMETYPES: &[&str] = &[TEXT_JAVASCRIPT, APPLICATION_JAVASCRIPT];

pub fn transform(mimetype: &str, data: &str) -> Artifact {
    Artifact::Script {
        mimetype: mimetype.to_owned(),
        source: data.to_owned(),
    }
}
