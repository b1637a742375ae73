mod reader;

pub use reader::LineReader;
