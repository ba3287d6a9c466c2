pub mod path;
pub mod shapes;
