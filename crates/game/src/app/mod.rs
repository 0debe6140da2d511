pub(crate) mod bootstrap;
pub(crate) mod demo;
pub(crate) mod runner;
