//! Paths into tree documents and their normalized forms
//!
//! A [`Path`] names a node by the keys and indices followed from the root.
//! Two printable forms are derived from it:
//!
//! - the **rendered** form, e.g. `.servers[7].host`
//! - the **signature** form, where every index collapses to `0`, e.g.
//!   `.servers[0].host`
//!
//! Data paths are matched to spec paths by signature, so every element of a
//! data sequence is checked against the same spec entry.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use std::fmt;

/// Spec key holding the list of constraint names for a node
pub const CONSTRAINTS_KEY: &str = "constraints";

/// Spec key holding descriptive text for a node
pub const DOC_KEY: &str = "doc";

/// Spec key wrapping the value schema one level deeper
pub const CONTENT_KEY: &str = "content";

/// One step of a path: a mapping key or a sequence index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Field name in a mapping
    Key(String),
    /// Position in a sequence
    Index(usize),
}

impl Segment {
    /// Check whether this segment is the given mapping key
    pub fn is_key(&self, key: &str) -> bool {
        matches!(self, Segment::Key(k) if k == key)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, ".{}", key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Ordered sequence of segments identifying a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, naming the root
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a path from its segments
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Extend this path by one segment
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check whether this is the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Canonical printable form: `.name` for keys, `[N]` for indices
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Printable form with every index replaced by `0`
    pub fn signature(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => {
                    out.push('.');
                    out.push_str(key);
                }
                Segment::Index(_) => out.push_str("[0]"),
            }
        }
        out
    }

    /// Logical data path of a spec path: every `content` key removed
    pub fn strip_content(&self) -> Self {
        self.segments
            .iter()
            .filter(|segment| !segment.is_key(CONTENT_KEY))
            .cloned()
            .collect()
    }

    /// Check whether a spec path stays out of binding
    ///
    /// The root, descriptive leaves (`doc`, `content`) and anything inside a
    /// `constraints` list are metadata about a node rather than bindable
    /// nodes.
    pub fn is_excluded_spec_path(&self) -> bool {
        let Some(last) = self.segments.last() else {
            return true;
        };

        if last.is_key(DOC_KEY) || last.is_key(CONTENT_KEY) {
            return true;
        }

        self.segments
            .iter()
            .any(|segment| segment.is_key(CONSTRAINTS_KEY))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
