/// Caller-owned review request fields. The orchestrator only ever fills
/// `summary` and `description`, and only when they are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRequestOptions {
    /// Branch to diff against instead of the submit branch
    pub parent_branch: Option<String>,
    pub guess_summary: bool,
    pub guess_description: bool,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Repository location that overrides discovery
    pub repository_url: Option<String>,
}

impl ReviewRequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent_branch(mut self, branch: impl Into<String>) -> Self {
        self.parent_branch = Some(branch.into());
        self
    }

    pub fn with_guessing(mut self, summary: bool, description: bool) -> Self {
        self.guess_summary = summary;
        self.guess_description = description;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Whether a summary should be guessed from the log
    pub fn needs_summary(&self) -> bool {
        self.guess_summary && is_blank(&self.summary)
    }

    /// Whether a description should be guessed from the log
    pub fn needs_description(&self) -> bool {
        self.guess_description && is_blank(&self.description)
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}
