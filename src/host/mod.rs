pub(crate) mod app;
pub(crate) mod player;
pub(crate) mod timer;
pub(crate) mod window;
