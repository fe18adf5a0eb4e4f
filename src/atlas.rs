pub(crate) mod choreography;
pub(crate) mod config;
pub(crate) mod generator;
pub(crate) mod sprite;
