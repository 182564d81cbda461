pub(crate) mod artifact;
pub(crate) mod bundle;
