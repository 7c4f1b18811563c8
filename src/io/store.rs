use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::list::TodoList;
use crate::parse::{parse_todos, serialize_todos};

/// Error type for store and config I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse todo.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

/// A list loaded from disk, plus any records that could not be parsed.
#[derive(Debug)]
pub struct LoadedList {
    pub list: TodoList,
    pub dropped: Vec<String>,
}

/// Load the list stored at `path`. A missing file is an empty list.
pub fn load_todos(path: &Path) -> Result<LoadedList, StoreError> {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(StoreError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let (items, dropped) = parse_todos(&source);
    for record in &dropped {
        log::warn!("{}: skipping unreadable record {:?}", path.display(), record);
    }
    Ok(LoadedList {
        list: TodoList::from_items(items),
        dropped,
    })
}

/// Write the list to `path` in persisted order, atomically.
pub fn save_todos(path: &Path, list: &TodoList) -> Result<(), StoreError> {
    let content = serialize_todos(&list.items);
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::info!("saved {} items to {}", list.items.len(), path.display());
    Ok(())
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
