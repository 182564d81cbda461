use std::{collections::HashSet, path::Path};

use anyhow::Context;

use crate::foundation::{
    error::{TransformimeError, TransformimeResult},
    mime,
};

/// Precedence used when no order is configured, highest priority first.
pub const DEFAULT_ORDER: &[&str] = &[
    mime::APPLICATION_JAVASCRIPT,
    mime::TEXT_JAVASCRIPT,
    mime::TEXT_HTML,
    mime::TEXT_LATEX,
    mime::IMAGE_SVG,
    mime::IMAGE_PNG,
    mime::IMAGE_JPEG,
    mime::IMAGE_GIF,
    mime::CONSOLE_TEXT,
    mime::TEXT_PLAIN,
];

/// Precedence policy as loaded from a JSON document: `{"order": ["text/html", ...]}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrecedenceConfig {
    /// Mimetypes, highest priority first.
    pub order: Vec<String>,
}

impl Default for PrecedenceConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER.iter().map(|m| (*m).to_owned()).collect(),
        }
    }
}

impl PrecedenceConfig {
    /// Parse and validate a policy from JSON text.
    pub fn from_json_str(s: &str) -> TransformimeResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TransformimeError::validation(format!("parse precedence config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a policy file.
    pub fn from_path(path: &Path) -> TransformimeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read precedence config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> TransformimeResult<()> {
        validate_order(&self.order)
    }
}

/// Every entry must be a well-formed mimetype and appear once.
pub(crate) fn validate_order(order: &[String]) -> TransformimeResult<()> {
    let mut seen = HashSet::with_capacity(order.len());
    for m in order {
        if !mime::is_valid_mimetype(m) {
            return Err(TransformimeError::configuration(format!(
                "precedence entry '{m}' is not a valid mimetype"
            )));
        }
        if !seen.insert(m.as_str()) {
            return Err(TransformimeError::configuration(format!(
                "mimetype '{m}' appears more than once in the precedence order"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/policy.rs"]
mod tests;
