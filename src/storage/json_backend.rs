use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};

use super::{Result, StorageBackend};

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const BACKUP_SUFFIX: &str = "bak";
const CORRUPT_SUFFIX: &str = "corrupt";

/// Stores each collection as `<key>.json` under a collections directory.
///
/// Writes are staged to a temporary file and renamed into place; the previous
/// file is kept as `<key>.json.bak`. A file that failed to decode is copied to
/// `<key>.json.corrupt` by [`StorageBackend::preserve`].
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    collections_dir: PathBuf,
    pretty: bool,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let collections_dir = PathResolver::collections_dir_in(&root);
        ensure_dir(&collections_dir)?;
        Ok(Self {
            root,
            collections_dir,
            pretty: true,
        })
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.collections_dir
            .join(format!("{}.{}", canonical_name(key), BLOB_EXTENSION))
    }

    pub fn backup_path(&self, key: &str) -> PathBuf {
        with_suffix(&self.blob_path(key), BACKUP_SUFFIX)
    }

    pub fn corrupt_path(&self, key: &str) -> PathBuf {
        with_suffix(&self.blob_path(key), CORRUPT_SUFFIX)
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        fs::copy(path, self.backup_path(key))?;
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        let path = self.blob_path(key);
        self.backup_existing_file(key, &path)?;
        let tmp = with_suffix(&path, TMP_SUFFIX);
        write_file(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn preserve(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::copy(&path, self.corrupt_path(key))?;
        }
        Ok(())
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "collection".into()
    } else {
        sanitized
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    out.set_extension(ext);
    out
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
