pub(crate) mod hooks;
pub(crate) mod opts;
pub(crate) mod satellite;
pub(crate) mod scene;
