use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::error::{MolduraError, MolduraResult};

/// Overlay identifier selected when a catalog carries the stock entries.
pub const DEFAULT_OVERLAY_ID: &str = "evento";

/// On-disk catalog shape: a flat `identifier -> relative path` JSON object.
#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
struct CatalogFile(BTreeMap<String, String>);

/// Immutable mapping from symbolic overlay identifiers to frame assets.
///
/// The catalog is configuration: it is loaded once (or built from the stock
/// entries) and never mutated afterwards. Asset paths are stored relative to
/// the catalog root and resolved lazily at load-staging time.
#[derive(Debug, Clone)]
pub struct OverlayCatalog {
    root: PathBuf,
    paths_by_id: BTreeMap<String, String>,
}

impl OverlayCatalog {
    /// Build the stock three-entry catalog.
    pub fn builtin(root: impl Into<PathBuf>) -> Self {
        let mut paths_by_id = BTreeMap::new();
        paths_by_id.insert("evento".to_string(), "1N.png".to_string());
        paths_by_id.insert("hallfama".to_string(), "2N.png".to_string());
        paths_by_id.insert("eventovip".to_string(), "3N.png".to_string());
        Self {
            root: root.into(),
            paths_by_id,
        }
    }

    /// Parse a catalog from a JSON reader holding an `id -> relative path` map.
    pub fn from_reader<R: std::io::Read>(r: R, root: impl Into<PathBuf>) -> MolduraResult<Self> {
        let raw: CatalogFile = serde_json::from_reader(r)
            .map_err(|e| MolduraError::validation(format!("parse overlay catalog JSON: {e}")))?;
        Self::from_entries(raw.0, root)
    }

    /// Parse a catalog from a JSON file on disk.
    ///
    /// Relative asset paths are resolved against the catalog file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> MolduraResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MolduraError::validation(format!("open overlay catalog '{}': {e}", path.display()))
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        Self::from_reader(BufReader::new(f), root)
    }

    fn from_entries(
        raw: BTreeMap<String, String>,
        root: impl Into<PathBuf>,
    ) -> MolduraResult<Self> {
        if raw.is_empty() {
            return Err(MolduraError::validation(
                "overlay catalog must contain at least one entry",
            ));
        }

        let mut paths_by_id = BTreeMap::new();
        for (id, source) in raw {
            if id.is_empty() {
                return Err(MolduraError::validation(
                    "overlay identifiers must be non-empty",
                ));
            }
            paths_by_id.insert(id, normalize_rel_path(&source)?);
        }

        Ok(Self {
            root: root.into(),
            paths_by_id,
        })
    }

    /// Return root directory used when resolving relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `id` names a catalog entry.
    pub fn contains(&self, id: &str) -> bool {
        self.paths_by_id.contains_key(id)
    }

    /// Catalog-relative asset path for `id`, if present.
    pub fn path_for(&self, id: &str) -> Option<&str> {
        self.paths_by_id.get(id).map(String::as_str)
    }

    /// Absolute (root-joined) asset path for `id`, if present.
    pub fn resolve(&self, id: &str) -> Option<PathBuf> {
        self.path_for(id).map(|rel| self.root.join(rel))
    }

    /// Identifier used as the initial selection for this catalog.
    ///
    /// The stock `evento` entry wins when present; otherwise the first entry
    /// in identifier order.
    pub fn default_id(&self) -> &str {
        if self.paths_by_id.contains_key(DEFAULT_OVERLAY_ID) {
            return DEFAULT_OVERLAY_ID;
        }
        self.paths_by_id
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or(DEFAULT_OVERLAY_ID)
    }

    /// Iterate `(identifier, relative path)` entries in identifier order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths_by_id
            .iter()
            .map(|(id, p)| (id.as_str(), p.as_str()))
    }
}

/// Normalize and validate catalog-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> MolduraResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(MolduraError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(MolduraError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MolduraError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MolduraError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/catalog.rs"]
mod tests;
