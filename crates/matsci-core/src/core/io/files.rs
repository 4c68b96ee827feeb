use phf::{Set, phf_set};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::core::data::templates::{DEFAULT_ACTIVE_FILE, template_files};

static ACCEPTED_EXTENSIONS: Set<&'static str> = phf_set! { "in", "out", "dat", "py" };

#[derive(Debug, Error)]
pub enum FileLoadError {
    #[error("Unsupported file type for '{path}' (accepted: .in, .out, .dat, .py)")]
    UnsupportedExtension { path: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("No file named '{0}' is open")]
    NotOpen(String),
}

pub fn is_accepted(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(ext.to_ascii_lowercase().as_str()))
}

/// A text input deck held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub content: String,
}

impl InputFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Reads the whole file as UTF-8 text. There is no size limit.
    pub fn load(path: &Path) -> Result<Self, FileLoadError> {
        let shown = path.to_string_lossy().to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| shown.clone());
        if !is_accepted(&name) {
            return Err(FileLoadError::UnsupportedExtension { path: shown });
        }
        let content = std::fs::read_to_string(path).map_err(|e| FileLoadError::Io {
            path: shown.clone(),
            source: e,
        })?;
        debug!(file = %shown, bytes = content.len(), "Loaded input file");
        Ok(Self { name, content })
    }
}

/// The editor's open files plus the one currently shown.
#[derive(Debug, Clone)]
pub struct FileWorkspace {
    files: Vec<InputFile>,
    active: usize,
}

impl Default for FileWorkspace {
    /// The built-in templates with `scf.in` active.
    fn default() -> Self {
        let files = template_files();
        let active = files
            .iter()
            .position(|f| f.name == DEFAULT_ACTIVE_FILE)
            .unwrap_or(0);
        Self { files, active }
    }
}

impl FileWorkspace {
    /// Opens `files`, selecting `active` when present and the first file otherwise.
    ///
    /// Returns `None` for an empty file list.
    pub fn new(files: Vec<InputFile>, active: &str) -> Option<Self> {
        if files.is_empty() {
            return None;
        }
        let active = files.iter().position(|f| f.name == active).unwrap_or(0);
        Some(Self { files, active })
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    pub fn active(&self) -> &InputFile {
        &self.files[self.active]
    }

    pub fn get(&self, name: &str) -> Option<&InputFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Adds a file, replacing any open file with the same name. The active file is unchanged.
    pub fn add(&mut self, file: InputFile) {
        match self.files.iter_mut().find(|f| f.name == file.name) {
            Some(existing) => existing.content = file.content,
            None => self.files.push(file),
        }
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), FileLoadError> {
        let index = self
            .files
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| FileLoadError::NotOpen(name.to_string()))?;
        self.active = index;
        Ok(())
    }

    pub fn edit_active(&mut self, content: impl Into<String>) {
        self.files[self.active].content = content.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, tempdir};

    #[test]
    fn whitelist_is_case_insensitive_on_extension() {
        assert!(is_accepted("scf.in"));
        assert!(is_accepted("bands.DAT"));
        assert!(is_accepted("plot.py"));
        assert!(!is_accepted("notes.txt"));
        assert!(!is_accepted("Makefile"));
    }

    #[test]
    fn load_reads_whole_file_and_keeps_basename() {
        let mut file = Builder::new().suffix(".in").tempfile().unwrap();
        write!(file, "&CONTROL\n/\n").unwrap();
        let loaded = InputFile::load(file.path()).unwrap();
        assert_eq!(loaded.content, "&CONTROL\n/\n");
        assert!(loaded.name.ends_with(".in"));
        assert!(!loaded.name.contains('/'));
    }

    #[test]
    fn load_rejects_unlisted_extension_before_touching_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(
            InputFile::load(&path),
            Err(FileLoadError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn load_reports_io_error_for_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.out");
        assert!(matches!(InputFile::load(&path), Err(FileLoadError::Io { .. })));
    }

    #[test]
    fn load_errors_carry_the_full_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relax.dat");
        match InputFile::load(&path) {
            Err(FileLoadError::Io { path: shown, .. }) => {
                assert_eq!(shown, path.to_string_lossy());
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn workspace_add_replaces_same_name_and_keeps_active() {
        let mut ws = FileWorkspace::new(
            vec![InputFile::new("a.in", "1"), InputFile::new("b.in", "2")],
            "b.in",
        )
        .unwrap();
        ws.add(InputFile::new("a.in", "changed"));
        ws.add(InputFile::new("c.dat", "3"));
        assert_eq!(ws.files().len(), 3);
        assert_eq!(ws.get("a.in").unwrap().content, "changed");
        assert_eq!(ws.active().name, "b.in");
    }

    #[test]
    fn default_workspace_opens_templates_on_scf() {
        let ws = FileWorkspace::default();
        let names: Vec<_> = ws.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["scf.in", "relax.in", "bands.in", "plot.py"]);
        assert_eq!(ws.active().name, "scf.in");
    }

    #[test]
    fn workspace_edit_targets_active_file() {
        let mut ws = FileWorkspace::new(vec![InputFile::new("a.in", "1")], "zzz").unwrap();
        assert_eq!(ws.active().name, "a.in");
        ws.edit_active("new");
        assert_eq!(ws.active().content, "new");
        assert!(ws.set_active("ghost.in").is_err());
        assert!(FileWorkspace::new(Vec::new(), "a.in").is_none());
    }
}
