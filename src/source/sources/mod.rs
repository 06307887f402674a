pub mod file;
pub mod search;

pub use file::FileSource;
pub use search::SearchSource;
