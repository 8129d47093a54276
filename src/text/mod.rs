//! Text form of schema messages (a line-oriented protobuf text subset).

pub mod parse;
pub mod render;

pub use parse::parse_text;
pub use render::render_text;
