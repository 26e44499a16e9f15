pub mod config;
pub mod genealogy;
pub mod tree;
pub mod util;
