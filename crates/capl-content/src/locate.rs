//! Anchor parsing and resolution against a scanned catalog

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind};
use crate::error::{Error, Result};

/// A symbolic reference to a position in the working buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// A literal 0-indexed line number
    Line(usize),
    /// Immediately after the named element (`after:<name>`)
    After(String),
    /// Immediately before the named element (`before:<name>`)
    Before(String),
    /// Inside the named section or test group (`section:<alias>`)
    Section(String),
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(name) = s.strip_prefix("after:") {
            Ok(Self::After(name.trim().to_string()))
        } else if let Some(name) = s.strip_prefix("before:") {
            Ok(Self::Before(name.trim().to_string()))
        } else if let Some(alias) = s.strip_prefix("section:") {
            Ok(Self::Section(alias.trim().to_string()))
        } else if let Ok(line) = s.parse::<usize>() {
            Ok(Self::Line(line))
        } else {
            Err(Error::AnchorSyntax {
                input: s.to_string(),
            })
        }
    }
}

/// Canonical section kinds addressable through `section:` aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Includes,
    Variables,
}

impl SectionKind {
    /// Resolve an alias to its canonical section, if recognized.
    ///
    /// The alias set is a closed enumeration; anything outside it is a
    /// resolution failure, never a guess.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "include" | "includes" => Some(Self::Includes),
            "variable" | "variables" => Some(Self::Variables),
            _ => None,
        }
    }

    /// The CAPL keyword opening this section's block.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::Variables => "variables",
        }
    }

    fn matches(&self, kind: &ElementKind) -> bool {
        matches!(
            (self, kind),
            (Self::Includes, ElementKind::Include { .. })
                | (Self::Variables, ElementKind::Variables)
        )
    }
}

/// A resolved insertion point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// 0-indexed line to insert before
    pub line: usize,
    /// Set when the target section does not exist yet: the insertion must
    /// include the wrapping block syntax (see [`wrap_section`])
    pub wrap: Option<SectionKind>,
}

impl ResolvedLocation {
    fn at(line: usize) -> Self {
        Self { line, wrap: None }
    }
}

/// Resolve an anchor to a concrete line position in the current buffer.
///
/// `elements` must come from a scan of that same buffer state; stale
/// catalogs resolve to stale positions.
pub fn resolve(anchor: &Anchor, elements: &[Element]) -> Result<ResolvedLocation> {
    match anchor {
        // The editor applies its own bounds validation.
        Anchor::Line(n) => Ok(ResolvedLocation::at(*n)),
        Anchor::After(name) => {
            find_element(name, elements).map(|e| ResolvedLocation::at(e.end_line + 1))
        }
        Anchor::Before(name) => {
            find_element(name, elements).map(|e| ResolvedLocation::at(e.start_line))
        }
        Anchor::Section(alias) => resolve_section(alias, elements),
    }
}

/// Find the single element `name` refers to (by identifier or signature).
///
/// No match or more than one match is a resolution failure; the resolver
/// never guesses.
pub fn find_element<'a>(name: &str, elements: &'a [Element]) -> Result<&'a Element> {
    let mut matches = elements.iter().filter(|e| e.matches(name));
    let Some(first) = matches.next() else {
        return Err(Error::AnchorNotFound {
            anchor: name.trim().to_string(),
            available: elements.iter().map(|e| e.name.clone()).collect(),
        });
    };
    if matches.next().is_some() {
        let count = elements.iter().filter(|e| e.matches(name)).count();
        return Err(Error::AmbiguousAnchor {
            anchor: name.trim().to_string(),
            count,
        });
    }
    Ok(first)
}

fn resolve_section(alias: &str, elements: &[Element]) -> Result<ResolvedLocation> {
    if let Some(kind) = SectionKind::from_alias(alias) {
        // Existing block: append inside, just before its closing brace.
        if let Some(e) = elements.iter().find(|e| kind.matches(&e.kind)) {
            return Ok(ResolvedLocation::at(e.end_line));
        }
        // No block yet: synthesize one near the top of the file.
        return Ok(ResolvedLocation {
            line: 0,
            wrap: Some(kind),
        });
    }

    // A test-group name addresses the group: append after its last test case.
    if let Some(e) = elements
        .iter()
        .filter(|e| matches!(&e.kind, ElementKind::TestCase { group: Some(g) } if g == alias))
        .last()
    {
        return Ok(ResolvedLocation::at(e.end_line + 1));
    }

    let mut available = vec!["includes".to_string(), "variables".to_string()];
    for e in elements {
        if let ElementKind::TestCase { group: Some(g) } = &e.kind
            && !available.contains(g)
        {
            available.push(g.clone());
        }
    }
    Err(Error::UnknownSection {
        alias: alias.to_string(),
        available,
    })
}

/// Wrap lines in the block syntax of a section that does not exist yet.
pub fn wrap_section(kind: SectionKind, lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("{} {{", kind.keyword()));
    for line in lines {
        out.push(format!("  {line}"));
    }
    out.push("}".to_string());
    out
}
