pub mod spent_set;
pub mod tree;
pub mod window;
