pub mod grid;
pub mod keys;
