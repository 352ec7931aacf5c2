//! A directory of saved diagrams.
//!
//! [`Storage`] owns one directory. Each saved diagram is `<name>.json` in that
//! directory; the names saved so far are listed in a catalog file,
//! `saved_list.json`, next to them. Storage also owns the [`SessionContext`]
//! recording which saved diagram is currently active.

use std::{
    fmt, fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{
    config::StorageConfig,
    error::UmlError,
    manager::DiagramManager,
    persistence::document::{self, LoadReport},
};

/// Text shown when no diagram file is active.
pub const NO_ACTIVE_FILE: &str = "No active file!";

const CATALOG_NAME: &str = "saved_list";
const EXTENSION: &str = "json";

/// Which saved diagram, if any, the current session is working on.
///
/// Starts out with no active file, is replaced on every save or load, and
/// is reset when the session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    active_file: Option<String>,
}

impl SessionContext {
    /// Creates a session with no active file.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active diagram name, without extension.
    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    fn activate(&mut self, name: &str) {
        self.active_file = Some(name.to_string());
    }

    fn reset(&mut self) {
        self.active_file = None;
    }
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.active_file {
            Some(name) => write!(f, "{name}.{EXTENSION}"),
            None => f.write_str(NO_ACTIVE_FILE),
        }
    }
}

/// On-disk catalog of saved diagram names.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct Catalog {
    names: Vec<String>,
}

/// A directory of saved diagrams plus the session's active file.
#[derive(Debug)]
pub struct Storage {
    directory: PathBuf,
    pretty: bool,
    catalog: Catalog,
    session: SessionContext,
}

impl Storage {
    /// Opens (creating if needed) the storage directory and reads its catalog.
    ///
    /// Catalog entries whose file has disappeared are dropped. An unreadable
    /// catalog is rebuilt from the `*.json` files in the directory. Either
    /// repair is written back.
    ///
    /// # Errors
    ///
    /// Returns `UmlError` if the directory cannot be created or read, or the
    /// repaired catalog cannot be written.
    pub fn open(config: &StorageConfig) -> Result<Self, UmlError> {
        let directory = config.directory().to_path_buf();
        fs::create_dir_all(&directory)?;

        let mut storage = Self {
            directory,
            pretty: config.pretty(),
            catalog: Catalog::default(),
            session: SessionContext::new(),
        };

        let catalog_path = storage.path_for(CATALOG_NAME);
        if catalog_path.exists() {
            let text = fs::read_to_string(&catalog_path)?;
            let (names, mut repaired) = match serde_json::from_str::<Catalog>(&text) {
                Ok(catalog) => (catalog.names, false),
                Err(err) => {
                    warn!(
                        path = catalog_path.display().to_string(),
                        error:% = err;
                        "Saved-file catalog is unreadable, rebuilding it from the directory"
                    );
                    (storage.scan_directory()?, true)
                }
            };

            let (present, missing): (Vec<_>, Vec<_>) = names
                .into_iter()
                .partition(|name| storage.path_for(name).is_file());
            for name in &missing {
                warn!(name; "Saved diagram listed in catalog is missing");
            }
            repaired |= !missing.is_empty();

            storage.catalog.names = present;
            if repaired {
                storage.write_catalog()?;
            }
        }

        debug!(
            directory = storage.directory.display().to_string(),
            saved = storage.catalog.names.len();
            "Storage opened"
        );
        Ok(storage)
    }

    /// The storage directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The session state.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The active diagram name, if any.
    pub fn active_file(&self) -> Option<&str> {
        self.session.active_file()
    }

    /// Saved diagram names, in the order they were first saved.
    pub fn list_saved(&self) -> &[String] {
        &self.catalog.names
    }

    /// Returns `true` if a diagram with this name has been saved.
    pub fn is_saved(&self, name: &str) -> bool {
        self.catalog.names.iter().any(|saved| saved == name)
    }

    /// The file path a diagram with this name is saved to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{EXTENSION}"))
    }

    /// Saves the diagram under `name` and makes it the active file.
    ///
    /// # Errors
    ///
    /// Returns `UmlError::Storage` for an unusable name, or the I/O or JSON
    /// error if writing fails.
    pub fn save(&mut self, manager: &DiagramManager, name: &str) -> Result<PathBuf, UmlError> {
        check_name(name)?;

        let path = self.path_for(name);
        let json = document::to_json(manager, self.pretty)?;
        self.write_atomic(&path, &json)?;

        if !self.is_saved(name) {
            self.catalog.names.push(name.to_string());
            self.write_catalog()?;
        }
        self.session.activate(name);

        info!(name, path = path.display().to_string(); "Diagram saved");
        Ok(path)
    }

    /// Saves the diagram back to the active file.
    ///
    /// # Errors
    ///
    /// Returns `UmlError::Storage` if there is no active file, otherwise as
    /// [`Storage::save`].
    pub fn save_active(&mut self, manager: &DiagramManager) -> Result<PathBuf, UmlError> {
        let name = self
            .active_file()
            .map(str::to_string)
            .ok_or_else(|| UmlError::storage("no active file to save to"))?;
        self.save(manager, &name)
    }

    /// Loads the named diagram and makes it the active file.
    ///
    /// The caller replaces its whole in-memory diagram with the returned one.
    ///
    /// # Errors
    ///
    /// Returns `UmlError::Storage` for an unusable or unknown name, the I/O
    /// error if reading fails, or the JSON error if the file is unreadable
    /// at the top level. Individual bad records are reported, not failed.
    pub fn load(&mut self, name: &str) -> Result<(DiagramManager, LoadReport), UmlError> {
        check_name(name)?;

        let path = self.path_for(name);
        if !path.is_file() {
            return Err(UmlError::storage(format!("no saved diagram named '{name}'")));
        }

        let text = fs::read_to_string(&path)?;
        let (manager, report) = document::from_json(&text)?;

        if !self.is_saved(name) {
            self.catalog.names.push(name.to_string());
            self.write_catalog()?;
        }
        self.session.activate(name);

        info!(
            name,
            classes = manager.store().len(),
            skipped = report.skipped().len();
            "Diagram loaded"
        );
        Ok((manager, report))
    }

    /// Deletes a saved diagram and its catalog entry.
    ///
    /// If it was the active file, the session no longer has one.
    ///
    /// # Errors
    ///
    /// Returns `UmlError::Storage` if no diagram with this name was saved, or
    /// the I/O error if removal fails.
    pub fn delete_saved(&mut self, name: &str) -> Result<(), UmlError> {
        if !self.is_saved(name) {
            return Err(UmlError::storage(format!("no saved diagram named '{name}'")));
        }

        let path = self.path_for(name);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        self.catalog.names.retain(|saved| saved != name);
        self.write_catalog()?;

        if self.active_file() == Some(name) {
            self.session.reset();
        }

        info!(name; "Saved diagram deleted");
        Ok(())
    }

    /// Empties the in-memory diagram. The active file stays as it was.
    pub fn clear_active_data(&self, manager: &mut DiagramManager) {
        manager.clear();
    }

    /// Empties the in-memory diagram and forgets the active file.
    pub fn end_session(&mut self, manager: &mut DiagramManager) {
        manager.clear();
        self.session.reset();
        info!("Session ended");
    }

    /// Names of the saved diagrams found in the directory, sorted.
    fn scan_directory(&self) -> Result<Vec<String>, UmlError> {
        let mut names: Vec<String> = fs::read_dir(&self.directory)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
            .filter(|name| check_name(name).is_ok())
            .collect();
        names.sort();
        Ok(names)
    }

    fn write_catalog(&self) -> Result<(), UmlError> {
        let json = serde_json::to_string_pretty(&self.catalog)?;
        self.write_atomic(&self.path_for(CATALOG_NAME), &json)
    }

    /// Writes to a temporary file in the same directory, then renames it
    /// over `path`.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), UmlError> {
        let mut file = NamedTempFile::new_in(&self.directory)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        file.persist(path)?;
        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), UmlError> {
    if name.trim().is_empty() {
        return Err(UmlError::storage("diagram name must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(UmlError::storage(format!(
            "diagram name '{name}' must not contain path separators"
        )));
    }
    if name == CATALOG_NAME {
        return Err(UmlError::storage(format!(
            "'{CATALOG_NAME}' is reserved for the saved-file catalog"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use umlkit_core::model::RelationshipKind;

    use super::*;

    fn open_in(dir: &Path) -> Storage {
        Storage::open(&StorageConfig::new(dir, true)).unwrap()
    }

    fn sample() -> DiagramManager {
        let mut manager = DiagramManager::new();
        manager.add_class("A").unwrap();
        manager.add_class("B").unwrap();
        manager
            .add_relationship("A", "B", RelationshipKind::Aggregation)
            .unwrap();
        manager
    }

    #[test]
    fn test_session_display() {
        let mut session = SessionContext::new();
        assert_eq!(session.to_string(), NO_ACTIVE_FILE);

        session.activate("zoo");
        assert_eq!(session.to_string(), "zoo.json");
        assert_eq!(session.active_file(), Some("zoo"));

        session.reset();
        assert_eq!(session.active_file(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_in(dir.path());

        let path = storage.save(&sample(), "zoo").unwrap();
        assert!(path.is_file());
        assert_eq!(storage.list_saved(), ["zoo"]);
        assert_eq!(storage.active_file(), Some("zoo"));

        let (loaded, report) = storage.load("zoo").unwrap();
        assert!(report.is_clean());
        assert!(loaded.relationship("A", "B").is_some());
    }

    #[test]
    fn test_catalog_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = open_in(dir.path());
            storage.save(&sample(), "one").unwrap();
            storage.save(&sample(), "two").unwrap();
            storage.save(&sample(), "one").unwrap();
        }

        let storage = open_in(dir.path());
        assert_eq!(storage.list_saved(), ["one", "two"]);
        assert_eq!(storage.active_file(), None);
    }

    #[test]
    fn test_catalog_drops_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = open_in(dir.path());
            storage.save(&sample(), "kept").unwrap();
            storage.save(&sample(), "gone").unwrap();
        }
        fs::remove_file(dir.path().join("gone.json")).unwrap();

        let storage = open_in(dir.path());
        assert_eq!(storage.list_saved(), ["kept"]);
    }

    #[test]
    fn test_pruned_catalog_is_written_back() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = open_in(dir.path());
            storage.save(&sample(), "kept").unwrap();
            storage.save(&sample(), "gone").unwrap();
        }
        fs::remove_file(dir.path().join("gone.json")).unwrap();

        open_in(dir.path());

        let text = fs::read_to_string(dir.path().join("saved_list.json")).unwrap();
        let names: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(names, ["kept"]);
    }

    #[test]
    fn test_corrupt_catalog_is_rebuilt_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = open_in(dir.path());
            storage.save(&sample(), "zoo").unwrap();
            storage.save(&sample(), "farm").unwrap();
        }
        fs::write(dir.path().join("saved_list.json"), "{ not a catalog").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a diagram").unwrap();

        let mut storage = open_in(dir.path());
        assert_eq!(storage.list_saved(), ["farm", "zoo"]);

        let (loaded, _) = storage.load("zoo").unwrap();
        assert!(loaded.relationship("A", "B").is_some());

        let text = fs::read_to_string(dir.path().join("saved_list.json")).unwrap();
        let names: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(names, ["farm", "zoo"]);
    }

    #[test]
    fn test_save_active_requires_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_in(dir.path());

        assert!(matches!(
            storage.save_active(&sample()),
            Err(UmlError::Storage(_))
        ));

        storage.save(&sample(), "zoo").unwrap();
        let mut changed = sample();
        changed.add_class("C").unwrap();
        storage.save_active(&changed).unwrap();

        let (loaded, _) = storage.load("zoo").unwrap();
        assert!(loaded.class("C").is_some());
    }

    #[test]
    fn test_delete_saved_resets_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_in(dir.path());
        storage.save(&sample(), "zoo").unwrap();

        storage.delete_saved("zoo").unwrap();

        assert!(!storage.is_saved("zoo"));
        assert!(!dir.path().join("zoo.json").exists());
        assert_eq!(storage.active_file(), None);
        assert!(storage.delete_saved("zoo").is_err());
    }

    #[test]
    fn test_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_in(dir.path());

        for name in ["", "  ", "../evil", "a/b", "saved_list"] {
            assert!(
                matches!(storage.save(&sample(), name), Err(UmlError::Storage(_))),
                "name {name:?} should be rejected"
            );
        }
        assert!(storage.list_saved().is_empty());
    }

    #[test]
    fn test_load_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_in(dir.path());

        assert!(matches!(storage.load("ghost"), Err(UmlError::Storage(_))));
        assert_eq!(storage.active_file(), None);
    }

    #[test]
    fn test_clear_and_end_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_in(dir.path());
        let mut manager = sample();
        storage.save(&manager, "zoo").unwrap();

        storage.clear_active_data(&mut manager);
        assert!(manager.is_empty());
        assert_eq!(storage.active_file(), Some("zoo"));

        manager.add_class("X").unwrap();
        storage.end_session(&mut manager);
        assert!(manager.is_empty());
        assert_eq!(storage.active_file(), None);
    }
}
