pub(crate) mod document;
pub(crate) mod node;
pub(crate) mod request;
