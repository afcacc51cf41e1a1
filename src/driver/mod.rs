pub(crate) mod animator;
pub(crate) mod tables;
