pub mod json;
pub mod tree;

pub use json::JsonFormatter;
pub use tree::TreeFormatter;
