//! Pagewise library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod source;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    #[default]
    Search,
    File,
}

impl SourceKind {
    /// Parses the lowercase names used in config files and env vars.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "search" => Some(SourceKind::Search),
            "file" => Some(SourceKind::File),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_from_name() {
        assert_eq!(SourceKind::from_name("search"), Some(SourceKind::Search));
        assert_eq!(SourceKind::from_name(" File "), Some(SourceKind::File));
        assert_eq!(SourceKind::from_name("ftp"), None);
    }
}
