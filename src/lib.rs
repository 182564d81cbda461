//! Transformime selects and renders one representation of a notebook mimebundle.
//!
//! An execution result can offer the same value as plain text, HTML, an image, LaTeX,
//! console output and more. [`Transformime`] owns a set of [`Transformer`]s and a
//! precedence order over mimetypes; it picks the first mimetype in that order that the
//! bundle offers and a transformer can render, and returns the transformer's
//! [`Artifact`].
//!
//! # Pipeline overview
//!
//! 1. **Parse**: JSON output object or bare map -> [`MimeBundle`]
//! 2. **Select**: [`Transformime::preferred_mimetype`] scans the precedence order
//! 3. **Transform**: the owning transformer turns the payload into an [`Artifact`]
//! 4. **Display**: the caller inserts the artifact ([`Artifact::to_html`]) and runs any
//!    deferred typesetting ([`Artifact::ensure_typeset`])
//!
//! Registration is fail-fast: a mimetype belongs to exactly one transformer, and a
//! second claim is a [`TransformimeError::Configuration`]. Invalid payloads surface as
//! [`TransformimeError::Render`]; there is no fallback to lower-precedence mimetypes.
#![forbid(unsafe_code)]

mod dispatch;
mod foundation;
mod model;
mod transformers;
mod typeset;

pub use dispatch::policy::{DEFAULT_ORDER, PrecedenceConfig};
pub use dispatch::transformime::{Transformime, TransformimeOptions};
pub use foundation::error::{TransformimeError, TransformimeResult};
pub use foundation::markup::escape_html;
pub use foundation::mime;
pub use model::artifact::Artifact;
pub use model::bundle::MimeBundle;
pub use transformers::console::ansi_to_html;
pub use transformers::{Builtin, Transformer};
pub use typeset::math::{MathContent, MathNode, NoopTypesetter, TypesetState, Typesetter};
