pub mod selectors;
pub mod state;
