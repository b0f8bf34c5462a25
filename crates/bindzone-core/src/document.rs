//! Line-oriented view of a zone file.
//!
//! Lines are kept exactly as read. Delete and replace match a line by its
//! trimmed text, so a target that differs from the file only in internal
//! spacing (a tab retyped as spaces, say) is reported as not found.

use std::path::Path;

use crate::codec;
use crate::error::{Result, ZoneError};
use crate::record::{RecordType, ResourceRecord};

/// In-memory zone file contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneDocument {
    lines: Vec<String>,
}

impl ZoneDocument {
    /// Split zone file text into lines (LF or CRLF terminated)
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Read a zone file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ZoneError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Write the whole document back in a single write
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).map_err(|e| ZoneError::io(path, e))
    }

    /// Raw lines in file order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the file has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line at the end of the file
    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns true if some line's trimmed text equals the trimmed target.
    ///
    /// A blank target never matches; blank lines are not records.
    #[must_use]
    pub fn contains_exact(&self, target: &str) -> bool {
        let target = target.trim();
        !target.is_empty() && self.lines.iter().any(|l| l.trim() == target)
    }

    /// Remove every line whose trimmed text equals the trimmed target.
    ///
    /// Returns the number of lines removed.
    pub fn delete_exact(&mut self, target: &str) -> Result<usize> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ZoneError::RecordNotFound(target.to_string()));
        }
        let before = self.lines.len();
        self.lines.retain(|l| l.trim() != target);

        match before - self.lines.len() {
            0 => Err(ZoneError::RecordNotFound(target.to_string())),
            removed => Ok(removed),
        }
    }

    /// Replace every line whose trimmed text equals the trimmed target,
    /// keeping its position. Returns the number of lines replaced.
    pub fn replace_exact(&mut self, target: &str, new_line: &str) -> Result<usize> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ZoneError::RecordNotFound(target.to_string()));
        }
        let mut replaced = 0;

        for line in self.lines.iter_mut().filter(|l| l.trim() == target) {
            new_line.clone_into(line);
            replaced += 1;
        }

        if replaced == 0 {
            return Err(ZoneError::RecordNotFound(target.to_string()));
        }
        Ok(replaced)
    }

    /// Overwrite the serial line at `index`
    pub fn rewrite_serial_line(&mut self, index: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text.into();
        }
    }

    /// Lines that decode as editable resource records, with their index
    pub fn records(&self) -> impl Iterator<Item = (usize, ResourceRecord)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, l)| codec::decode(l).ok().map(|r| (i, r)))
    }

    /// Lines holding a record with this name, type and value.
    ///
    /// Spacing differences do not matter here, unlike the exact-line match.
    #[must_use]
    pub fn find_matching(&self, name: &str, record_type: RecordType, value: &str) -> Vec<usize> {
        self.records()
            .filter(|(_, r)| {
                r.name == name && r.record_type == record_type && r.value == value
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove the lines at the given indices
    pub fn remove_lines(&mut self, indices: &[usize]) {
        let mut index = 0;
        self.lines.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
    }

    /// Render the document with every line newline-terminated
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}
