pub mod entry;
pub mod tree;
pub mod traversal;
