// WHY: page furniture of paginated RFC text (running headers, footers, page
// breaks, separators) must not count as topic or body lines

/// Substrings that mark a line as page furniture
///
/// `"Sep"` catches the month in running headers (`RFC 792  September 1981`),
/// `"[Page"` the footer, `"\u{c}"` the form feed between pages.
pub const DEFAULT_BOILERPLATE_MARKERS: &[&str] = &["[Page", "Sep", "RFC", "---", "\u{c}"];

/// Substring matcher over a marker table
#[derive(Debug, Clone)]
pub struct BoilerplateFilter {
    markers: Vec<String>,
}

impl BoilerplateFilter {
    /// Create new filter with the default marker table
    pub fn new() -> Self {
        Self::with_markers(DEFAULT_BOILERPLATE_MARKERS.iter().copied())
    }

    /// Create filter from a caller-supplied marker table
    ///
    /// Empty markers are ignored, they would match every line.
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers = markers
            .into_iter()
            .map(Into::into)
            .filter(|marker: &String| !marker.is_empty())
            .collect();
        Self { markers }
    }

    /// Check if a line contains any marker
    pub fn is_boilerplate(&self, line: &str) -> bool {
        self.markers.iter().any(|marker| line.contains(marker.as_str()))
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for BoilerplateFilter {
    fn default() -> Self {
        Self::new()
    }
}
