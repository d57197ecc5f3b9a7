use crate::core::Project;

/// Case-insensitive free-text needle, lowercased once up front.
///
/// An empty needle matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    needle: String,
}

impl SearchPattern {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Substring test against one haystack
    #[inline]
    pub fn matches_text(&self, text: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        // ASCII fast path avoids allocating a lowercased copy
        if text.is_ascii() && self.needle.is_ascii() {
            return contains_ignore_ascii_case(text, &self.needle);
        }
        text.to_lowercase().contains(&self.needle)
    }

    /// OR across name, id, owner, department and region.
    pub fn matches_project(&self, project: &Project) -> bool {
        self.is_empty()
            || self.matches_text(&project.name)
            || self.matches_text(&project.id)
            || self.matches_text(&project.owner)
            || self.matches_text(project.department.as_str())
            || self.matches_text(project.region.as_str())
    }
}

fn contains_ignore_ascii_case(text: &str, lowered_needle: &str) -> bool {
    let haystack = text.as_bytes();
    let needle = lowered_needle.as_bytes();
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.iter().zip(needle).all(|(h, n)| h.to_ascii_lowercase() == *n))
}
