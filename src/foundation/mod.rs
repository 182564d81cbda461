pub(crate) mod error;
pub(crate) mod markup;
pub mod mime;
