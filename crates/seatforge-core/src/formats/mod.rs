pub mod text;

pub use text::{read_text, read_text_file, write_text};
