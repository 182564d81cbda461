use std::{collections::HashMap, sync::Arc};

use crate::{
    dispatch::policy::{DEFAULT_ORDER, PrecedenceConfig, validate_order},
    foundation::{
        error::{TransformimeError, TransformimeResult},
        mime::is_valid_mimetype,
    },
    model::{artifact::Artifact, bundle::MimeBundle},
    transformers::{Builtin, Transformer},
};

/// Construction options for [`Transformime`].
#[derive(Debug)]
pub struct TransformimeOptions<A = Artifact> {
    /// Transformers registered in sequence at construction.
    pub transformers: Vec<Arc<dyn Transformer<A>>>,
    /// Mimetypes, highest priority first.
    pub order: Vec<String>,
}

impl Default for TransformimeOptions<Artifact> {
    /// All built-in transformers with [`DEFAULT_ORDER`].
    fn default() -> Self {
        Self {
            transformers: Builtin::ALL
                .into_iter()
                .map(|b| Arc::new(b) as Arc<dyn Transformer>)
                .collect(),
            order: DEFAULT_ORDER.iter().map(|m| (*m).to_owned()).collect(),
        }
    }
}

impl<A> TransformimeOptions<A> {
    pub fn new(transformers: Vec<Arc<dyn Transformer<A>>>, order: Vec<String>) -> Self {
        Self {
            transformers,
            order,
        }
    }

    /// Options using the order from a loaded [`PrecedenceConfig`].
    pub fn with_config(transformers: Vec<Arc<dyn Transformer<A>>>, cfg: &PrecedenceConfig) -> Self {
        Self::new(transformers, cfg.order.clone())
    }
}

/// Mimetype registry and dispatcher.
///
/// A bundle is rendered by scanning the precedence order and picking the first
/// mimetype that the bundle offers and that has a registered transformer. Mimetypes
/// missing from the order are never selected, and order entries without a
/// transformer are skipped.
///
/// Each mimetype maps to exactly one transformer; [`Transformime::register`] rejects
/// a second claim. The order is fixed at construction, so it may name mimetypes whose
/// transformers are registered later.
#[derive(Debug)]
pub struct Transformime<A = Artifact> {
    transformers: Vec<Arc<dyn Transformer<A>>>,
    by_mimetype: HashMap<String, usize>,
    order: Vec<String>,
}

impl Transformime<Artifact> {
    /// Registry with every built-in transformer and [`DEFAULT_ORDER`].
    pub fn with_defaults() -> TransformimeResult<Self> {
        Self::new(TransformimeOptions::default())
    }
}

impl<A> Transformime<A> {
    pub fn new(options: TransformimeOptions<A>) -> TransformimeResult<Self> {
        validate_order(&options.order)?;

        let mut registry = Self {
            transformers: Vec::with_capacity(options.transformers.len()),
            by_mimetype: HashMap::new(),
            order: options.order,
        };
        for transformer in options.transformers {
            registry.register(transformer)?;
        }

        let inert: Vec<&str> = registry
            .order
            .iter()
            .filter(|m| !registry.by_mimetype.contains_key(m.as_str()))
            .map(String::as_str)
            .collect();
        if !inert.is_empty() {
            tracing::debug!(?inert, "precedence entries without a transformer");
        }

        Ok(registry)
    }

    /// Add a transformer for all the mimetypes it claims.
    ///
    /// Fails without modifying the registry if the claim set is empty, contains an
    /// invalid mimetype, or overlaps an existing registration.
    pub fn register(&mut self, transformer: Arc<dyn Transformer<A>>) -> TransformimeResult<()> {
        let mut mimetypes: Vec<String> = Vec::new();
        for m in transformer.mimetypes() {
            if !is_valid_mimetype(m) {
                return Err(TransformimeError::configuration(format!(
                    "{transformer:?} claims invalid mimetype '{m}'"
                )));
            }
            if let Some(&idx) = self.by_mimetype.get(*m) {
                return Err(TransformimeError::configuration(format!(
                    "mimetype '{m}' is already registered to {:?}",
                    self.transformers[idx]
                )));
            }
            if !mimetypes.iter().any(|seen| seen == m) {
                mimetypes.push((*m).to_owned());
            }
        }
        if mimetypes.is_empty() {
            return Err(TransformimeError::configuration(format!(
                "{transformer:?} claims no mimetypes"
            )));
        }

        tracing::debug!(?mimetypes, "registered transformer");
        let idx = self.transformers.len();
        for m in mimetypes {
            self.by_mimetype.insert(m, idx);
        }
        self.transformers.push(transformer);
        Ok(())
    }

    /// Highest-precedence mimetype offered by `bundle` that has a transformer.
    pub fn preferred_mimetype<'a>(&'a self, bundle: &'a MimeBundle) -> Option<&'a str> {
        self.resolve(bundle).map(|(mimetype, _, _)| mimetype)
    }

    /// Render the preferred representation of `bundle`.
    ///
    /// `Ok(None)` means nothing in the bundle is renderable. Render errors from the
    /// selected transformer are returned as-is; lower-precedence representations are
    /// not tried.
    #[tracing::instrument(level = "debug", skip_all, fields(offered = bundle.len()))]
    pub fn transform(&self, bundle: &MimeBundle) -> TransformimeResult<Option<A>> {
        let Some((mimetype, data, transformer)) = self.resolve(bundle) else {
            tracing::debug!("no renderable representation");
            return Ok(None);
        };
        tracing::debug!(mimetype, "selected representation");
        transformer.transform(mimetype, data).map(Some)
    }

    /// Transformer registered for `mimetype`.
    pub fn transformer_for(&self, mimetype: &str) -> Option<&Arc<dyn Transformer<A>>> {
        self.by_mimetype
            .get(mimetype)
            .map(|&idx| &self.transformers[idx])
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Registered mimetypes, sorted.
    pub fn mimetypes(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.by_mimetype.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    /// Order entries that currently have a transformer, in precedence order.
    pub fn active_order(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(String::as_str)
            .filter(|m| self.by_mimetype.contains_key(*m))
            .collect()
    }

    fn resolve<'a>(
        &'a self,
        bundle: &'a MimeBundle,
    ) -> Option<(&'a str, &'a str, &'a dyn Transformer<A>)> {
        self.order.iter().find_map(|m| {
            let data = bundle.get(m)?;
            let transformer = self.transformer_for(m)?;
            Some((m.as_str(), data, transformer.as_ref()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/transformime.rs"]
mod tests;
