pub(crate) mod adapter;
pub(crate) mod model;
pub(crate) mod style;
