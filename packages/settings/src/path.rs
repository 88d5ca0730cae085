// ABOUTME: Typed paths into the settings document
// ABOUTME: Parses "a.b.c" and "a[0].b" strings into key and index segments

use std::fmt;
use std::str::FromStr;

use crate::error::SettingsError;

/// One step of a settings path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Classify a raw piece of a path string.
    ///
    /// A piece is an index only when it is the canonical decimal form of a
    /// `usize`: `"0"` and `"12"` are indices, `"00"`, `"+1"` and `"-1"` are keys.
    pub fn parse(piece: &str) -> Self {
        match piece.parse::<usize>() {
            Ok(index) if index.to_string() == piece => PathSegment::Index(index),
            _ => PathSegment::Key(piece.to_string()),
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Non-empty sequence of segments addressing a value in a settings document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingsPath {
    segments: Vec<PathSegment>,
}

impl SettingsPath {
    /// Build a path from explicit segments, skipping string inference
    pub fn from_segments(segments: Vec<PathSegment>) -> Result<Self, SettingsError> {
        if segments.is_empty() {
            return Err(SettingsError::EmptyPath);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for SettingsPath {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .split(|c: char| matches!(c, '.' | '[' | ']'))
            .filter(|piece| !piece.is_empty())
            .map(PathSegment::parse)
            .collect();
        Self::from_segments(segments)
    }
}

impl fmt::Display for SettingsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
