use std::collections::BTreeMap;

use crate::foundation::{
    error::{TransformimeError, TransformimeResult},
    mime::CONSOLE_TEXT,
};

/// Alternative representations of one execution result, keyed by mimetype.
///
/// Payloads are strings; binary formats carry base64 text. Deserialization accepts
/// the notebook-format shapes: a plain string, a list of lines (concatenated as-is),
/// or any other JSON value, which is kept as its compact JSON text.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(
    from = "BTreeMap<String, RawPayload>",
    into = "BTreeMap<String, String>"
)]
pub struct MimeBundle(BTreeMap<String, String>);

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawPayload {
    Text(String),
    Lines(Vec<String>),
    Json(serde_json::Value),
}

impl From<RawPayload> for String {
    fn from(raw: RawPayload) -> Self {
        match raw {
            RawPayload::Text(s) => s,
            RawPayload::Lines(lines) => lines.concat(),
            RawPayload::Json(v) => v.to_string(),
        }
    }
}

impl From<BTreeMap<String, RawPayload>> for MimeBundle {
    fn from(raw: BTreeMap<String, RawPayload>) -> Self {
        Self(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<MimeBundle> for BTreeMap<String, String> {
    fn from(bundle: MimeBundle) -> Self {
        bundle.0
    }
}

impl MimeBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated mimetype keeps the last payload.
    pub fn with(mut self, mimetype: impl Into<String>, data: impl Into<String>) -> Self {
        self.insert(mimetype, data);
        self
    }

    /// Insert or replace the payload for `mimetype`.
    pub fn insert(&mut self, mimetype: impl Into<String>, data: impl Into<String>) {
        self.0.insert(mimetype.into(), data.into());
    }

    /// Payload offered for `mimetype`, if any.
    pub fn get(&self, mimetype: &str) -> Option<&str> {
        self.0.get(mimetype).map(String::as_str)
    }

    /// Whether the bundle offers `mimetype`.
    pub fn contains(&self, mimetype: &str) -> bool {
        self.0.contains_key(mimetype)
    }

    /// Offered mimetypes in lexical order.
    pub fn mimetypes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of representations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is offered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a bundle from JSON text; see [`MimeBundle::from_output_value`].
    pub fn from_json_str(s: &str) -> TransformimeResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| TransformimeError::validation(format!("parse bundle JSON: {e}")))?;
        Self::from_output_value(value)
    }

    /// Build a bundle from either a bare mimetype map or a notebook output object.
    ///
    /// - `execute_result` / `display_data` / `update_display_data`: the `data` field.
    /// - `stream`: `text` becomes a console-text representation.
    /// - `error`: `traceback` lines joined with newlines become console text.
    /// - no `output_type`: a `data` object if present, otherwise the object itself.
    pub fn from_output_value(value: serde_json::Value) -> TransformimeResult<Self> {
        let serde_json::Value::Object(mut obj) = value else {
            return Err(TransformimeError::validation(
                "output must be a JSON object",
            ));
        };

        let output_type = obj
            .get("output_type")
            .map(|v| {
                v.as_str().map(str::to_owned).ok_or_else(|| {
                    TransformimeError::validation("output_type must be a string")
                })
            })
            .transpose()?;

        match output_type.as_deref() {
            Some("execute_result" | "display_data" | "update_display_data") => {
                let data = obj.remove("data").ok_or_else(|| {
                    TransformimeError::validation("display output is missing 'data'")
                })?;
                bundle_from_map(data)
            }
            Some("stream") => {
                let text = obj.remove("text").ok_or_else(|| {
                    TransformimeError::validation("stream output is missing 'text'")
                })?;
                let text = multiline_text(text, "")?;
                Ok(Self::new().with(CONSOLE_TEXT, text))
            }
            Some("error") => {
                let traceback = obj.remove("traceback").ok_or_else(|| {
                    TransformimeError::validation("error output is missing 'traceback'")
                })?;
                let text = multiline_text(traceback, "\n")?;
                Ok(Self::new().with(CONSOLE_TEXT, text))
            }
            Some(other) => Err(TransformimeError::validation(format!(
                "unsupported output_type '{other}'"
            ))),
            None => match obj.remove("data") {
                Some(data) => bundle_from_map(data),
                None => bundle_from_map(serde_json::Value::Object(obj)),
            },
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MimeBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn bundle_from_map(value: serde_json::Value) -> TransformimeResult<MimeBundle> {
    if !value.is_object() {
        return Err(TransformimeError::validation(
            "mimebundle must be a JSON object",
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| TransformimeError::validation(format!("invalid mimebundle: {e}")))
}

fn multiline_text(value: serde_json::Value, sep: &str) -> TransformimeResult<String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Array(items) => {
            let mut lines = Vec::with_capacity(items.len());
            for item in items {
                let serde_json::Value::String(s) = item else {
                    return Err(TransformimeError::validation(
                        "text lines must be strings",
                    ));
                };
                lines.push(s);
            }
            Ok(lines.join(sep))
        }
        _ => Err(TransformimeError::validation(
            "text must be a string or a list of strings",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/bundle.rs"]
mod tests;
