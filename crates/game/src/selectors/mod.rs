//! Read accessors over the state tree, one module per sub-tree:
//! - composed shapes come back by value, rebuilt on every call
//! - collections come back as live slices borrowed from the tree

pub mod composite;
pub mod game;
pub mod player;
pub mod ui;
