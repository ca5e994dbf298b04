//! Pipeline options and configuration.

/// Options for reconstructing document structure.
///
/// The defaults are the thresholds the heuristics are tuned against.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureOptions {
    /// Texts that are never merged inline with their neighbours
    pub exclude_texts: Vec<String>,

    /// Inline fragments merge only when closer than this horizontally (points)
    pub merge_gap: f64,

    /// Inline fragments merge only when vertically closer than this (points)
    pub merge_y_tolerance: f64,

    /// A header/footer repeats when found on more than this many pages
    pub repeat_threshold: usize,

    /// Numeric and ordinal-suffix spans up to this size are superscripts
    pub superscript_max_size: f64,

    /// Upper bound on iterations of a fixed-point removal loop
    pub max_fixed_point_iterations: usize,

    /// Number of page-label / repeating header-footer cleanup cycles
    pub cleanup_passes: usize,

    /// When bulleted items get the canonical bullet prefix
    pub bullet_prefix: BulletPrefix,
}

impl StructureOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the texts excluded from inline merging.
    pub fn with_exclude_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_texts = texts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the horizontal inline-merge gap.
    pub fn with_merge_gap(mut self, gap: f64) -> Self {
        self.merge_gap = gap;
        self
    }

    /// Set the vertical inline-merge tolerance.
    pub fn with_merge_y_tolerance(mut self, tolerance: f64) -> Self {
        self.merge_y_tolerance = tolerance;
        self
    }

    /// Set the page count a header/footer text must exceed to be repeating.
    pub fn with_repeat_threshold(mut self, pages: usize) -> Self {
        self.repeat_threshold = pages;
        self
    }

    /// Set the maximum superscript size.
    pub fn with_superscript_max_size(mut self, size: f64) -> Self {
        self.superscript_max_size = size;
        self
    }

    /// Set the fixed-point iteration cap.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_fixed_point_iterations = iterations;
        self
    }

    /// Set the number of cleanup cycles.
    pub fn with_cleanup_passes(mut self, passes: usize) -> Self {
        self.cleanup_passes = passes;
        self
    }

    /// Set the bullet prefix mode.
    pub fn with_bullet_prefix(mut self, mode: BulletPrefix) -> Self {
        self.bullet_prefix = mode;
        self
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            exclude_texts: Vec::new(),
            merge_gap: 10.0,
            merge_y_tolerance: 2.0,
            repeat_threshold: 2,
            superscript_max_size: 7.0,
            max_fixed_point_iterations: 10_000,
            cleanup_passes: 2,
            bullet_prefix: BulletPrefix::Always,
        }
    }
}

/// When bulleted items are re-prefixed with the canonical bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletPrefix {
    /// Every bulleted item is prefixed
    #[default]
    Always,
    /// Only when the document mixes bulleted and plain items
    WhenMixed,
}
