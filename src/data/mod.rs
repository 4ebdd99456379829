pub mod loader;
pub mod normalize;
pub mod table;
