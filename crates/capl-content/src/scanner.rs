//! Construct detection strategies and the scan orchestrator

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::brace::{find_block_end, opens_block};
use crate::element::{Element, ElementKind};

/// Pattern for the `includes { ... }` wrapper header
static INCLUDES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*includes\s*\{?\s*$").unwrap());

/// Pattern for `#include "..."` lines inside an includes block
static INCLUDE_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"#include\s+"([^"]+)""#).unwrap());

/// Pattern for the `variables { ... }` wrapper header
static VARIABLES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*variables\s*\{?\s*$").unwrap());

/// Pattern for `on <event> <condition...>` handler headers
static HANDLER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*on\s+(\w+)(.*)$").unwrap());

/// Pattern for `testcase <Name>(...)` headers
static TESTCASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*testcase\s+([A-Za-z_]\w*)\s*\(([^)]*)\)").unwrap());

/// Pattern for `testfunction <Name>(...)` headers
static TESTFUNCTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*testfunction\s+([A-Za-z_]\w*)\s*\(([^)]*)\)").unwrap());

/// Pattern for `<ReturnType> <Name>(<params>)` function headers
static FUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_]\w*)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)\s*\{?\s*$").unwrap()
});

/// Pattern for the group-initializing call inside or between test cases
static GROUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"InitializeTestGroup\s*\(\s*"([^"]+)"\s*\)"#).unwrap());

/// Words that share the `<word> <word>(...)` shape but never start a
/// function definition.
const FUNCTION_KEYWORD_DENYLIST: &[&str] = &[
    "if",
    "for",
    "while",
    "switch",
    "do",
    "else",
    "return",
    "on",
    "testcase",
    "testfunction",
    "includes",
    "variables",
];

/// A non-fatal diagnostic produced while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// A construct header was found but its block never closed; the
    /// construct is discarded and scanning continues.
    UnterminatedBlock {
        construct: &'static str,
        start_line: usize,
    },
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedBlock {
                construct,
                start_line,
            } => write!(
                f,
                "unterminated {} block starting at line {}; discarded",
                construct, start_line
            ),
        }
    }
}

/// The output of one scan: a catalog plus collected warnings.
///
/// When warnings are present the catalog is necessarily incomplete but
/// every element in it is valid.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub elements: Vec<Element>,
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Elements of the given construct kind, in catalog order.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |e| e.kind.name() == kind)
    }

    /// Distinct test-group names, in order of first appearance.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups = Vec::new();
        for e in &self.elements {
            if let ElementKind::TestCase { group: Some(g) } = &e.kind
                && !groups.contains(&g.as_str())
            {
                groups.push(g.as_str());
            }
        }
        groups
    }
}

/// One construct-detection strategy.
///
/// Strategies are independent: each walks the same immutable buffer
/// snapshot and appends the elements it recognizes. They never deduplicate
/// or arbitrate overlap with each other.
pub trait ScanStrategy: Send + Sync {
    /// Name of the construct this strategy detects, for diagnostics.
    fn construct(&self) -> &'static str;

    /// Scan the buffer, appending elements and warnings to `report`.
    fn scan(&self, lines: &[String], report: &mut ScanReport);
}

/// Resolve the block extent for a header at `start`, or record a warning.
///
/// Returns the inclusive end line on success; on an unterminated block the
/// construct is discarded and `None` is returned.
fn block_extent(
    construct: &'static str,
    lines: &[String],
    start: usize,
    report: &mut ScanReport,
) -> Option<usize> {
    match find_block_end(lines, start) {
        Some(end) => Some(end),
        None => {
            debug!(construct, start_line = start, "unterminated block discarded");
            report.warnings.push(ScanWarning::UnterminatedBlock {
                construct,
                start_line: start,
            });
            None
        }
    }
}

/// Detects the `includes { ... }` wrapper block.
///
/// The `#include` lines inside are collected as data on the element, not
/// as separate catalog entries.
pub struct IncludesStrategy;

impl ScanStrategy for IncludesStrategy {
    fn construct(&self) -> &'static str {
        "includes"
    }

    fn scan(&self, lines: &[String], report: &mut ScanReport) {
        let mut i = 0;
        while i < lines.len() {
            if INCLUDES_PATTERN.is_match(&lines[i]) {
                if let Some(end) = block_extent(self.construct(), lines, i, report) {
                    let files = lines[i..=end]
                        .iter()
                        .filter_map(|l| INCLUDE_FILE_PATTERN.captures(l))
                        .map(|c| c[1].to_string())
                        .collect();
                    report.elements.push(Element::new(
                        ElementKind::Include { files },
                        "Includes",
                        "includes {...}",
                        i,
                        end,
                    ));
                    i = end + 1;
                    continue;
                }
            }
            i += 1;
        }
    }
}

/// Detects the `variables { ... }` wrapper block (at most one expected).
pub struct VariablesStrategy;

impl ScanStrategy for VariablesStrategy {
    fn construct(&self) -> &'static str {
        "variables"
    }

    fn scan(&self, lines: &[String], report: &mut ScanReport) {
        let mut i = 0;
        while i < lines.len() {
            if VARIABLES_PATTERN.is_match(&lines[i]) {
                if let Some(end) = block_extent(self.construct(), lines, i, report) {
                    report.elements.push(Element::new(
                        ElementKind::Variables,
                        "Variables",
                        "variables {...}",
                        i,
                        end,
                    ));
                    i = end + 1;
                    continue;
                }
            }
            i += 1;
        }
    }
}

/// Detects `on <event> <condition>` handlers.
///
/// Handlers carry no identifier; both `name` and `signature` are the full
/// header text with any trailing `{` stripped. A header terminated by `;`
/// before any `{` is a call or declaration and is excluded.
pub struct HandlerStrategy;

impl ScanStrategy for HandlerStrategy {
    fn construct(&self) -> &'static str {
        "handler"
    }

    fn scan(&self, lines: &[String], report: &mut ScanReport) {
        let mut i = 0;
        while i < lines.len() {
            if let Some(cap) = HANDLER_PATTERN.captures(&lines[i]) {
                if !opens_block(lines, i) {
                    i += 1;
                    continue;
                }
                if let Some(end) = block_extent(self.construct(), lines, i, report) {
                    let event = cap[1].to_string();
                    let condition = cap[2]
                        .trim()
                        .trim_end_matches('{')
                        .trim()
                        .to_string();
                    let signature = if condition.is_empty() {
                        format!("on {event}")
                    } else {
                        format!("on {event} {condition}")
                    };
                    report.elements.push(Element::new(
                        ElementKind::Handler { event, condition },
                        signature.clone(),
                        signature,
                        i,
                        end,
                    ));
                    i = end + 1;
                    continue;
                }
            }
            i += 1;
        }
    }
}

/// Detects `testcase <Name>(...)` blocks and attaches test groups.
///
/// Walks top-to-bottom tracking the running group: any group-initializing
/// call seen so far (inside a test case body or between test cases) names
/// the group for that test case and every later one, until the next call.
pub struct TestCaseStrategy;

impl ScanStrategy for TestCaseStrategy {
    fn construct(&self) -> &'static str {
        "testcase"
    }

    fn scan(&self, lines: &[String], report: &mut ScanReport) {
        let mut current_group: Option<String> = None;
        let mut i = 0;
        while i < lines.len() {
            if let Some(cap) = TESTCASE_PATTERN.captures(&lines[i]) {
                if let Some(end) = block_extent(self.construct(), lines, i, report) {
                    // A call inside the body assigns this test case to the
                    // group it initializes.
                    for line in &lines[i..=end] {
                        if let Some(g) = GROUP_PATTERN.captures(line) {
                            current_group = Some(g[1].to_string());
                        }
                    }
                    let name = cap[1].to_string();
                    let signature = format!("testcase {name}()");
                    report.elements.push(Element::new(
                        ElementKind::TestCase {
                            group: current_group.clone(),
                        },
                        name,
                        signature,
                        i,
                        end,
                    ));
                    i = end + 1;
                    continue;
                }
            } else if let Some(g) = GROUP_PATTERN.captures(&lines[i]) {
                current_group = Some(g[1].to_string());
            }
            i += 1;
        }
    }
}

/// Detects `testfunction` and free-function definitions.
///
/// Control-flow keywords share the `<word> <word>(...)` shape and are
/// excluded by an explicit denylist; a header terminated by `;` before its
/// brace is a prototype and is excluded too.
pub struct FunctionStrategy;

impl ScanStrategy for FunctionStrategy {
    fn construct(&self) -> &'static str {
        "function"
    }

    fn scan(&self, lines: &[String], report: &mut ScanReport) {
        let mut i = 0;
        while i < lines.len() {
            if let Some(cap) = TESTFUNCTION_PATTERN.captures(&lines[i]) {
                if let Some(end) = block_extent(self.construct(), lines, i, report) {
                    let name = cap[1].to_string();
                    let parameters = split_parameters(&cap[2]);
                    let signature = format!("testfunction {name}({})", parameters.join(", "));
                    report.elements.push(Element::new(
                        ElementKind::TestFunction { parameters },
                        name,
                        signature,
                        i,
                        end,
                    ));
                    i = end + 1;
                    continue;
                }
            } else if let Some(cap) = FUNCTION_PATTERN.captures(&lines[i]) {
                let return_type = cap[1].to_string();
                let name = cap[2].to_string();
                let excluded = FUNCTION_KEYWORD_DENYLIST.contains(&return_type.as_str())
                    || FUNCTION_KEYWORD_DENYLIST.contains(&name.as_str());
                if !excluded && opens_block(lines, i) {
                    if let Some(end) = block_extent(self.construct(), lines, i, report) {
                        let parameters = split_parameters(&cap[3]);
                        let signature =
                            format!("{return_type} {name}({})", parameters.join(", "));
                        report.elements.push(Element::new(
                            ElementKind::Function {
                                return_type,
                                parameters,
                            },
                            name,
                            signature,
                            i,
                            end,
                        ));
                        i = end + 1;
                        continue;
                    }
                }
            }
            i += 1;
        }
    }
}

fn split_parameters(params: &str) -> Vec<String> {
    params
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Runs every registered strategy over one immutable buffer snapshot.
///
/// Output is the concatenation of each strategy's elements in registration
/// order; the catalog is not globally re-sorted. Adding a construct kind
/// means registering one new strategy — the scanner itself carries no
/// construct knowledge.
pub struct Scanner {
    strategies: Vec<Box<dyn ScanStrategy>>,
}

impl Scanner {
    /// A scanner with the builtin strategy set.
    pub fn with_builtins() -> Self {
        Self {
            strategies: vec![
                Box::new(IncludesStrategy),
                Box::new(VariablesStrategy),
                Box::new(HandlerStrategy),
                Box::new(TestCaseStrategy),
                Box::new(FunctionStrategy),
            ],
        }
    }

    /// Register an additional strategy, appended after the existing ones.
    pub fn register(&mut self, strategy: Box<dyn ScanStrategy>) {
        self.strategies.push(strategy);
    }

    /// Scan the buffer with every strategy.
    pub fn scan(&self, lines: &[String]) -> ScanReport {
        let mut report = ScanReport::default();
        for strategy in &self.strategies {
            strategy.scan(lines, &mut report);
        }
        debug!(
            elements = report.elements.len(),
            warnings = report.warnings.len(),
            "scan complete"
        );
        report
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::with_builtins()
    }
}
