//! Toast notices raised by widgets.

/// A short title-and-body message for the host to toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    /// Headline.
    pub title: &'static str,
    /// Body text.
    pub description: &'static str,
}

impl Notice {
    /// Creates a notice.
    #[must_use]
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}
