// options.rs

/// Entry kinds a traversal yields
///
/// This enum selects which entry types the walker reports; recursion is
/// independent of it, so a files-only recursive walk still descends into
/// every subdirectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryFilter {
    /// Regular files only
    Files,
    /// Directories only
    Directories,
    /// Both files and directories
    All,
}

impl EntryFilter {
    pub(crate) fn wants_files(self) -> bool {
        matches!(self, EntryFilter::Files | EntryFilter::All)
    }

    pub(crate) fn wants_directories(self) -> bool {
        matches!(self, EntryFilter::Directories | EntryFilter::All)
    }
}

/// Configuration options for a directory tree walk
///
/// This struct controls the search pattern, the recursion mode, and the
/// entry filter of one traversal.
#[derive(Clone, Debug)]
pub struct WalkOptions {
    /// Native wildcard pattern matched against entry names; empty and
    /// `"."` normalize to `"*"`
    pub pattern: String,

    /// Whether to descend into subdirectories (breadth-first) or stay in
    /// the top directory
    pub recursive: bool,

    /// Which entry kinds the walk yields
    pub filter: EntryFilter,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            pattern: "*".to_string(),
            recursive: false,
            filter: EntryFilter::All,
        }
    }
}

/// Builder for WalkOptions for fluent configuration
///
/// This builder pattern allows for clean, readable configuration
/// of walk options with method chaining.
pub struct WalkOptionsBuilder(WalkOptions);

impl Default for WalkOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WalkOptionsBuilder {
    /// Creates a new builder with default options
    pub fn new() -> Self {
        Self(WalkOptions::default())
    }

    /// Sets the search pattern matched against entry names
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.0.pattern = pattern.to_string();
        self
    }

    /// Sets whether the walk descends into subdirectories
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.0.recursive = recursive;
        self
    }

    /// Sets which entry kinds the walk yields
    pub fn filter(mut self, filter: EntryFilter) -> Self {
        self.0.filter = filter;
        self
    }

    /// Builds the final WalkOptions instance
    pub fn build(self) -> WalkOptions {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let options = WalkOptionsBuilder::new()
            .pattern("*.txt")
            .recursive(true)
            .filter(EntryFilter::Files)
            .build();
        assert_eq!(options.pattern, "*.txt");
        assert!(options.recursive);
        assert_eq!(options.filter, EntryFilter::Files);
    }

    #[test]
    fn filter_selection_is_consistent() {
        assert!(EntryFilter::All.wants_files());
        assert!(EntryFilter::All.wants_directories());
        assert!(EntryFilter::Files.wants_files());
        assert!(!EntryFilter::Files.wants_directories());
        assert!(!EntryFilter::Directories.wants_files());
        assert!(EntryFilter::Directories.wants_directories());
    }
}
