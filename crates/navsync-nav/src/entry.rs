//! Navigation tree entries and the document that holds them.
//!
//! A navigation tree is an ordered list of [`NavEntry`] values. The document
//! is a YAML mapping with the tree under its `nav` key; a rewrite replaces
//! only that block of the source text.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::NavError;
use crate::write::write_atomic;

/// Key of the navigation tree inside the document.
pub const NAV_KEY: &str = "nav";

/// One entry of a navigation tree.
#[derive(Clone, Debug, PartialEq)]
pub enum NavEntry {
    /// Path to a documentation page (e.g. `"reference/commands/init.md"`).
    Page(String),
    /// Single-key mapping from a section title to nested entries.
    Section {
        /// Section title (the mapping key).
        title: String,
        /// Entries listed under the section.
        children: Vec<NavEntry>,
    },
    /// Any other YAML shape (e.g. `{Home: index.md}`), kept verbatim.
    Other(Value),
}

impl NavEntry {
    /// Page path, if this entry is a plain page.
    #[must_use]
    pub fn as_page(&self) -> Option<&str> {
        match self {
            Self::Page(path) => Some(path),
            _ => None,
        }
    }

    /// Build a section entry.
    #[must_use]
    pub fn section(title: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self::Section {
            title: title.into(),
            children,
        }
    }
}

impl From<Value> for NavEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(path) => Self::Page(path),
            Value::Mapping(map) if map.len() == 1 => match map.into_iter().next() {
                Some((Value::String(title), Value::Sequence(items))) => Self::Section {
                    title,
                    children: items.into_iter().map(Self::from).collect(),
                },
                Some((key, value)) => {
                    let mut map = Mapping::new();
                    map.insert(key, value);
                    Self::Other(Value::Mapping(map))
                }
                None => Self::Other(Value::Mapping(Mapping::new())),
            },
            other => Self::Other(other),
        }
    }
}

impl From<NavEntry> for Value {
    fn from(entry: NavEntry) -> Self {
        match entry {
            NavEntry::Page(path) => Value::String(path),
            NavEntry::Section { title, children } => {
                let mut map = Mapping::new();
                map.insert(
                    Value::String(title),
                    Value::Sequence(children.into_iter().map(Value::from).collect()),
                );
                Value::Mapping(map)
            }
            NavEntry::Other(value) => value,
        }
    }
}

/// A navigation document loaded from disk.
///
/// The source text is kept so a rewrite replaces only the `nav` block and
/// leaves every other line, including comments and YAML tags that
/// [`Value`] cannot represent, byte for byte.
#[derive(Debug)]
pub struct NavDocument {
    path: PathBuf,
    source: String,
    root: Mapping,
    nav: Vec<NavEntry>,
}

impl NavDocument {
    /// Read and parse the document at `path`.
    ///
    /// An empty file is an empty document. A missing or `null` `nav` key is
    /// an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, is not
    /// a mapping, or holds a `nav` value that is not a sequence.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse document `content` that was read from `path`.
    ///
    /// # Errors
    ///
    /// See [`NavDocument::load`].
    pub fn parse(path: &Path, content: &str) -> Result<Self, NavError> {
        let root = if content.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str::<Value>(content).map_err(|source| NavError::Yaml {
                path: path.to_path_buf(),
                source,
            })? {
                Value::Mapping(map) => map,
                Value::Null => Mapping::new(),
                _ => return Err(invalid(path, "top level must be a mapping")),
            }
        };

        let nav = match root.get(NAV_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items.iter().cloned().map(NavEntry::from).collect(),
            Some(_) => return Err(invalid(path, "`nav` must be a list")),
        };

        Ok(Self {
            path: path.to_path_buf(),
            source: content.to_owned(),
            root,
            nav,
        })
    }

    /// Path the document was loaded from and will be written to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current navigation tree.
    #[must_use]
    pub fn nav(&self) -> &[NavEntry] {
        &self.nav
    }

    /// Take the navigation tree out, leaving it empty.
    pub fn take_nav(&mut self) -> Vec<NavEntry> {
        std::mem::take(&mut self.nav)
    }

    /// Replace the navigation tree.
    pub fn set_nav(&mut self, nav: Vec<NavEntry>) {
        self.nav = nav;
    }

    /// Render the document with the current navigation tree.
    ///
    /// The top-level `nav` block of the source text is replaced in place; it
    /// is appended when the source had none. The result is parsed again and
    /// must hold the same non-`nav` keys as the source.
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidDocument` if the `nav` block cannot be
    /// located (e.g. a flow-style root mapping) or the rendered text would
    /// change any other key.
    pub fn to_yaml(&self) -> Result<String, NavError> {
        let nav = Value::Sequence(self.nav.iter().cloned().map(Value::from).collect());
        let mut block = Mapping::new();
        block.insert(Value::String(NAV_KEY.to_owned()), nav.clone());
        let block = serde_yaml::to_string(&Value::Mapping(block)).map_err(|source| NavError::Yaml {
            path: self.path.clone(),
            source,
        })?;

        let rendered = match nav_block_range(&self.source) {
            Some(range) => {
                let mut rendered = String::with_capacity(self.source.len() + block.len());
                rendered.push_str(&self.source[..range.start]);
                rendered.push_str(&block);
                rendered.push_str(&self.source[range.end..]);
                rendered
            }
            None if self.root.contains_key(NAV_KEY) => {
                return Err(invalid(&self.path, "cannot locate the top-level `nav` block"));
            }
            None if self.source.is_empty() => block,
            None => {
                let mut rendered = self.source.clone();
                if !rendered.ends_with('\n') {
                    rendered.push('\n');
                }
                rendered.push_str(&block);
                rendered
            }
        };

        self.check_rendered(&rendered, &nav)?;
        Ok(rendered)
    }

    /// Write the document back to its path, replacing the file atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the write fails. The previous file
    /// content is left intact on failure.
    pub fn save(&self) -> Result<(), NavError> {
        let yaml = self.to_yaml()?;
        write_atomic(&self.path, yaml.as_bytes())
    }

    fn check_rendered(&self, rendered: &str, nav: &Value) -> Result<(), NavError> {
        let mut root = match serde_yaml::from_str::<Value>(rendered) {
            Ok(Value::Mapping(map)) => map,
            _ => return Err(invalid(&self.path, "rewritten document does not parse")),
        };
        if root.remove(NAV_KEY).as_ref() != Some(nav) {
            return Err(invalid(&self.path, "rewritten `nav` does not match"));
        }
        let mut expected = self.root.clone();
        expected.remove(NAV_KEY);
        if root != expected {
            return Err(invalid(&self.path, "rewrite would change keys other than `nav`"));
        }
        Ok(())
    }
}

fn invalid(path: &Path, message: &str) -> NavError {
    NavError::InvalidDocument {
        path: path.to_path_buf(),
        message: message.to_owned(),
    }
}

/// Byte range of the top-level `nav` block in `source`.
///
/// The block starts at a column-0 `nav:` key and runs through the indented
/// and column-0 `- ` lines after it. Blank and comment lines that trail the
/// block stay outside it.
fn nav_block_range(source: &str) -> Option<Range<usize>> {
    let mut lines = source.split_inclusive('\n');
    let mut offset = 0;
    let start = loop {
        let line = lines.next()?;
        let line_start = offset;
        offset += line.len();
        if is_nav_key_line(line) {
            break line_start;
        }
    };

    let mut end = offset;
    for line in lines {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            offset += line.len();
            continue;
        }
        if !(line.starts_with([' ', '\t']) || is_sequence_item(line)) {
            break;
        }
        offset += line.len();
        end = offset;
    }
    Some(start..end)
}

fn is_nav_key_line(line: &str) -> bool {
    ["nav", "\"nav\"", "'nav'"].iter().any(|key| {
        line.strip_prefix(*key)
            .map(|rest| rest.trim_start_matches([' ', '\t']))
            .and_then(|rest| rest.strip_prefix(':'))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

fn is_sequence_item(line: &str) -> bool {
    line.strip_prefix('-')
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
