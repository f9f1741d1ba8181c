//! Route pattern parsing and matching.
//!
//! Patterns are `/`-delimited templates. A segment starting with `:` is
//! named and captures any single non-empty path segment; every other
//! segment must match literally, case-sensitively. Malformed patterns are
//! rejected when the route is registered, never during navigation.

use std::collections::BTreeMap;

use crate::error::RouteError;

/// Captured named-segment values for a matched route.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Named(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern string.
    ///
    /// `/` is the root pattern and matches the empty path. Anything else
    /// must start with `/` and contain no empty segments.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        if pattern.is_empty() {
            return Err(RouteError::EmptyPattern);
        }
        if !pattern.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(pattern.to_string()));
        }

        let mut segments = Vec::new();
        if pattern != "/" {
            for part in pattern[1..].split('/') {
                if part.is_empty() {
                    return Err(RouteError::EmptySegment(pattern.to_string()));
                }
                match part.strip_prefix(':') {
                    Some("") => {
                        return Err(RouteError::EmptyParamName(pattern.to_string()));
                    }
                    Some(name) => segments.push(Segment::Named(name.to_string())),
                    None => segments.push(Segment::Literal(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Match a normalized path, returning captured parameters on success.
    ///
    /// Matching is structural: segment counts must agree, literals must be
    /// equal, and named segments capture whatever non-empty segment is in
    /// their position.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Named(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }

    /// The original pattern string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}


impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for RoutePattern {}
