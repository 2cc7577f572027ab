//! Line-level mutation of a CAPL source buffer

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::element::Element;
use crate::error::{Error, Result};

/// Owns a mutable working copy of a file's lines and applies edits to it.
///
/// Two buffers are held: `original`, read once and never mutated, and
/// `working`, an independently allocated copy all mutations apply to.
/// Nothing is written back until [`save`](Self::save); [`reset`](Self::reset)
/// discards accumulated edits by re-copying `original`.
///
/// All positions are 0-indexed. Out-of-range positions are errors, never
/// silently clamped. One editor owns one buffer pair and is not meant for
/// concurrent mutation.
#[derive(Debug, Clone)]
pub struct LineEditor {
    path: Option<PathBuf>,
    original: Vec<String>,
    working: Vec<String>,
    trailing_newline: bool,
}

impl LineEditor {
    /// Open a file and load its lines.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let source = capl_fs::read_text(&path)?;
        let mut editor = Self::from_source(&source);
        editor.path = Some(path);
        Ok(editor)
    }

    /// Build an editor over in-memory source text.
    pub fn from_source(source: &str) -> Self {
        let original: Vec<String> = source.lines().map(str::to_string).collect();
        debug!(lines = original.len(), "editor buffer loaded");
        Self {
            path: None,
            working: original.clone(),
            original,
            trailing_newline: source.ends_with('\n'),
        }
    }

    /// The path this editor was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The current working lines.
    pub fn lines(&self) -> &[String] {
        &self.working
    }

    /// Number of lines in the working buffer.
    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Whether the working buffer differs from the original.
    pub fn is_modified(&self) -> bool {
        self.working != self.original
    }

    /// The working buffer joined back into file content.
    pub fn content(&self) -> String {
        let mut content = self.working.join("\n");
        if self.trailing_newline && !self.working.is_empty() {
            content.push('\n');
        }
        content
    }

    /// Discard all accumulated edits.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.working.len() {
            return Err(Error::InvalidRange {
                start,
                end,
                len: self.working.len(),
            });
        }
        Ok(())
    }

    /// Remove lines `[start, end)`.
    pub fn delete_lines(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        self.working.drain(start..end);
        debug!(start, end, remaining = self.working.len(), "deleted lines");
        Ok(())
    }

    /// Insert lines immediately before `position`; `position == len` appends.
    pub fn insert_lines(&mut self, position: usize, lines: &[String]) -> Result<()> {
        if position > self.working.len() {
            return Err(Error::InvalidPosition {
                position,
                len: self.working.len(),
            });
        }
        self.working
            .splice(position..position, lines.iter().cloned());
        debug!(position, inserted = lines.len(), "inserted lines");
        Ok(())
    }

    /// Replace lines `[start, end)` with `lines`.
    pub fn replace_lines(&mut self, start: usize, end: usize, lines: &[String]) -> Result<()> {
        self.check_range(start, end)?;
        self.working.splice(start..end, lines.iter().cloned());
        debug!(start, end, inserted = lines.len(), "replaced lines");
        Ok(())
    }

    /// Remove the lines of one element (inclusive extent).
    pub fn remove_element(&mut self, element: &Element) -> Result<()> {
        self.delete_lines(element.start_line, element.end_line + 1)
    }

    /// Remove several elements scanned from the current buffer state.
    ///
    /// Removal proceeds highest start line first, so every not-yet-removed
    /// element keeps valid indices; any input ordering yields the same
    /// final buffer.
    pub fn remove_elements(&mut self, elements: &[Element]) -> Result<()> {
        let mut ordered: Vec<&Element> = elements.iter().collect();
        ordered.sort_by(|a, b| b.start_line.cmp(&a.start_line));
        for element in ordered {
            self.remove_element(element)?;
        }
        Ok(())
    }

    /// Insert an element's lines before `position`.
    pub fn insert_element(&mut self, position: usize, lines: &[String]) -> Result<()> {
        self.insert_lines(position, lines)
    }

    /// Replace one element's lines with new content.
    pub fn replace_element(&mut self, element: &Element, lines: &[String]) -> Result<()> {
        self.replace_lines(element.start_line, element.end_line + 1, lines)
    }

    /// Persist the working buffer.
    ///
    /// Writes to `path` if given, otherwise to the path the editor was
    /// opened from. When `backup` is set and the target already exists, the
    /// pre-existing content is first copied to a `.bak` sibling. In-memory
    /// state is left untouched. Returns the path written to.
    pub fn save(&self, path: Option<&Path>, backup: bool) -> Result<PathBuf> {
        let target = path
            .or(self.path.as_deref())
            .map(Path::to_path_buf)
            .ok_or(Error::NoTargetPath)?;
        if backup && target.exists() {
            capl_fs::create_backup(&target)?;
        }
        capl_fs::write_atomic(&target, self.content().as_bytes())?;
        debug!(path = %target.display(), lines = self.working.len(), "saved");
        Ok(target)
    }
}
