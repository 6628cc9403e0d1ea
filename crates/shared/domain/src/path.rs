//! Paths into nested input documents.

use crate::constants::{PATH_SEPARATOR, SYMBOL_PREFIX};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Reasons a path cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path needs at least one segment.
    Empty,
    /// The segment at this position is an empty key.
    EmptySegment(usize),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("path has no segments"),
            Self::EmptySegment(at) => write!(f, "path segment #{at} is empty"),
        }
    }
}

impl std::error::Error for PathError {}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key. The symbolic prefix is stripped (`:email` ≡ `email`).
    Key(Cow<'static, str>),
    /// Array position.
    Index(usize),
}

impl Segment {
    #[must_use]
    pub fn key(raw: impl Into<Cow<'static, str>>) -> Self {
        match raw.into() {
            Cow::Borrowed(s) => Self::Key(Cow::Borrowed(s.strip_prefix(SYMBOL_PREFIX).unwrap_or(s))),
            Cow::Owned(s) => Self::Key(Cow::Owned(
                s.strip_prefix(SYMBOL_PREFIX).map_or_else(|| s.clone(), ToOwned::to_owned),
            )),
        }
    }

    fn is_empty_key(&self) -> bool {
        matches!(self, Self::Key(k) if k.is_empty())
    }
}

impl From<&'static str> for Segment {
    fn from(raw: &'static str) -> Self {
        Self::key(raw)
    }
}

impl From<String> for Segment {
    fn from(raw: String) -> Self {
        Self::key(raw)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Ordered, non-empty sequence of segments locating a value in a nested document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// Builds a path from explicit segments.
    ///
    /// # Errors
    /// Returns [`PathError::Empty`] for no segments and [`PathError::EmptySegment`]
    /// for a blank key.
    pub fn new(segments: impl IntoIterator<Item = impl Into<Segment>>) -> Result<Self, PathError> {
        let segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(at) = segments.iter().position(Segment::is_empty_key) {
            return Err(PathError::EmptySegment(at));
        }
        Ok(Self(segments))
    }

    /// Parses dotted notation (`user.email`). Every part becomes a key segment.
    ///
    /// # Errors
    /// Same as [`FieldPath::new`]; `""` and `"a..b"` are rejected.
    pub fn parse(dotted: &str) -> Result<Self, PathError> {
        if dotted.is_empty() {
            return Err(PathError::Empty);
        }
        Self::new(dotted.split(PATH_SEPARATOR).map(|part| Segment::key(part.to_owned())))
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Conversion into a [`FieldPath`], deferred so builders can collect failures.
///
/// Strings use dotted notation; arrays, vectors and slices are taken segment by segment
/// without splitting, so a literal key may contain the separator.
pub trait IntoFieldPath {
    /// # Errors
    /// Returns a [`PathError`] when the input does not describe a valid path.
    fn into_field_path(self) -> Result<FieldPath, PathError>;
}

impl IntoFieldPath for FieldPath {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        Ok(self)
    }
}

impl IntoFieldPath for &str {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        FieldPath::parse(self)
    }
}

impl IntoFieldPath for String {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        FieldPath::parse(&self)
    }
}

impl<S: Into<Segment>, const N: usize> IntoFieldPath for [S; N] {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        FieldPath::new(self)
    }
}

impl<S: Into<Segment>> IntoFieldPath for Vec<S> {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        FieldPath::new(self)
    }
}

impl<S: Into<Segment> + Clone> IntoFieldPath for &[S] {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        FieldPath::new(self.iter().cloned())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|segment| match segment {
            Segment::Key(key) => SegmentSpec::Key(key.to_string()),
            Segment::Index(index) => SegmentSpec::Index(*index),
        }))
    }
}

/// A segment as written in a document: a number addresses an array position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentSpec {
    Index(usize),
    Key(String),
}

/// A path as written in a document, either dotted or as a list of segments.
///
/// Nothing is checked when it is read; validation happens on conversion through
/// [`IntoFieldPath`], so callers decide how to report a malformed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSpec {
    Dotted(String),
    Segments(Vec<SegmentSpec>),
}

impl IntoFieldPath for PathSpec {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        match self {
            Self::Dotted(dotted) => FieldPath::parse(&dotted),
            Self::Segments(segments) => FieldPath::new(segments.into_iter().map(|segment| match segment {
                SegmentSpec::Index(index) => Segment::Index(index),
                SegmentSpec::Key(key) => Segment::key(key),
            })),
        }
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dotted(dotted) => f.write_str(dotted),
            Self::Segments(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{PATH_SEPARATOR}")?;
                    }
                    match segment {
                        SegmentSpec::Index(index) => write!(f, "{index}")?,
                        SegmentSpec::Key(key) => f.write_str(key)?,
                    }
                }
                Ok(())
            },
        }
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        PathSpec::deserialize(deserializer)?.into_field_path().map_err(serde::de::Error::custom)
    }
}
