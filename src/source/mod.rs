pub mod page_source;
pub mod sources;
pub mod types;

pub use page_source::{FetchError, PageSource};
pub use sources::{FileSource, SearchSource};
pub use types::{Entry, Page};
