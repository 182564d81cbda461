//! Deferred math typesetting for artifacts whose markup needs a post-processing pass.
//!
//! A [`MathNode`] tracks whether its content has been typeset since it was last set.
//! The engine itself sits behind [`Typesetter`]; callers trigger it explicitly with
//! [`MathNode::ensure_typeset`] or through the attach hook [`MathNode::on_after_attach`].

use crate::foundation::{error::TransformimeResult, markup::escape_html};

/// Typesetting state of a [`MathNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TypesetState {
    /// Typeset markup reflects the current content.
    Clean,
    /// Content changed since the last successful pass.
    Dirty,
}

/// Content held by a [`MathNode`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum MathContent {
    /// Literal text (e.g. LaTeX source), displayed as-is.
    Text(String),
    /// Trusted markup that may embed math.
    Html(String),
}

impl MathContent {
    /// Raw content string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }

    /// Content as display markup without typesetting.
    pub fn to_markup(&self) -> String {
        match self {
            Self::Text(s) => escape_html(s),
            Self::Html(s) => s.clone(),
        }
    }
}

/// Math typesetting engine.
///
/// Implementations must be deterministic for a given content: typesetting the same
/// content twice yields the same markup.
pub trait Typesetter {
    /// Produce display markup for `content`.
    fn typeset(&self, content: &MathContent) -> TransformimeResult<String>;
}

/// Typesetter that leaves content untouched (escaping text content).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTypesetter;

impl Typesetter for NoopTypesetter {
    fn typeset(&self, content: &MathContent) -> TransformimeResult<String> {
        Ok(content.to_markup())
    }
}

/// Displayable node whose content is typeset at most once per change.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MathNode {
    content: MathContent,
    typeset_markup: Option<String>,
    state: TypesetState,
}

impl MathNode {
    /// Node holding literal text, initially dirty.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: MathContent::Text(content.into()),
            typeset_markup: None,
            state: TypesetState::Dirty,
        }
    }

    /// Node holding markup, initially dirty.
    pub fn from_html(content: impl Into<String>) -> Self {
        Self {
            content: MathContent::Html(content.into()),
            typeset_markup: None,
            state: TypesetState::Dirty,
        }
    }

    /// Replace the content with literal text and mark the node dirty.
    pub fn set_text_content(&mut self, content: impl Into<String>) {
        self.content = MathContent::Text(content.into());
        self.state = TypesetState::Dirty;
    }

    /// Replace the content with markup and mark the node dirty.
    pub fn set_inner_html(&mut self, content: impl Into<String>) {
        self.content = MathContent::Html(content.into());
        self.state = TypesetState::Dirty;
    }

    pub fn content(&self) -> &MathContent {
        &self.content
    }

    pub fn state(&self) -> TypesetState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == TypesetState::Dirty
    }

    /// Markup from the last successful pass, if it is still current.
    pub fn typeset_markup(&self) -> Option<&str> {
        match self.state {
            TypesetState::Clean => self.typeset_markup.as_deref(),
            TypesetState::Dirty => None,
        }
    }

    /// Markup to display now: typeset output when clean, raw content otherwise.
    pub fn display_markup(&self) -> String {
        match self.typeset_markup() {
            Some(markup) => markup.to_owned(),
            None => self.content.to_markup(),
        }
    }

    /// Run a typesetting pass unconditionally.
    ///
    /// On failure the node stays dirty and keeps any previous markup hidden.
    pub fn typeset(&mut self, typesetter: &dyn Typesetter) -> TransformimeResult<()> {
        let markup = typesetter.typeset(&self.content)?;
        self.typeset_markup = Some(markup);
        self.state = TypesetState::Clean;
        Ok(())
    }

    /// Typeset only if the content changed since the last pass. Returns whether a pass ran.
    pub fn ensure_typeset(&mut self, typesetter: &dyn Typesetter) -> TransformimeResult<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.typeset(typesetter)?;
        Ok(true)
    }

    /// Hook for the display surface once the node is attached and visible.
    pub fn on_after_attach(&mut self, typesetter: &dyn Typesetter) -> TransformimeResult<bool> {
        self.ensure_typeset(typesetter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typeset/math.rs"]
mod tests;
