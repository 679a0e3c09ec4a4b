use std::fmt;

/// Separator used to split a caller supplied path into segments
pub const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefixError {
    #[error("path must name at least one folder")]
    Empty,
}

/// The caller's requested scope: a sequence of folder names
/// starting below the store root. Fixed for the whole walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix(Vec<String>);

impl PathPrefix {
    /// Build a prefix from explicit segments. Empty segments are dropped.
    pub fn new<I, S>(segments: I) -> Result<Self, PrefixError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            return Err(PrefixError::Empty);
        }
        Ok(Self(segments))
    }

    /// Split a `/` delimited path, e.g. `Projects/2024/Reports`.
    /// Leading, trailing and doubled separators are ignored.
    pub fn parse(path: &str) -> Result<Self, PrefixError> {
        Self::new(path.split(PATH_SEPARATOR))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Name the walker expects at the top level of the store
    pub fn first(&self) -> &str {
        // a PathPrefix is never empty
        &self.0[0]
    }

    /// True once the walk is at or below the requested path: the
    /// traversal prefix, cut to this prefix's length, equals it.
    pub fn covers(&self, traversal: &TraversalPrefix) -> bool {
        let current = traversal.segments();
        current.len() >= self.0.len() && current[..self.0.len()] == self.0[..]
    }

    /// True while descending into `next` can still lead to the requested
    /// path, i.e. both agree over their common length.
    pub fn may_contain(&self, next: &TraversalPrefix) -> bool {
        let next = next.segments();
        let common = next.len().min(self.0.len());
        next[..common] == self.0[..common]
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// Names of the folders between the store root and the node being
/// visited. Empty at the root; one segment longer per descent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalPrefix(Vec<String>);

impl TraversalPrefix {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// The prefix one level further down, inside folder `name`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TraversalPrefix {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TraversalPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.join("/"))
    }
}
