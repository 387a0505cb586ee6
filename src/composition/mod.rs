pub(crate) mod catalog;
pub(crate) mod document;
pub(crate) mod dsl;
pub(crate) mod model;
pub(crate) mod settings;
