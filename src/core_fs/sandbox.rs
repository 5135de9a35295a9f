use crate::core_error::FtpError;
use crate::core_fs::list_format::is_glob;
use std::io;
use std::path::{Component, Path, PathBuf};

const MAX_SYMLINK_DEPTH: usize = 40;

/// Confines every client supplied path to a single directory tree.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: PathBuf,
}

impl PathSandbox {
    /// The root is canonicalized once, here.
    pub fn new(root: &Path) -> io::Result<Self> {
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute client paths hang off the sandbox root, relative ones off
    /// the working directory. Nothing is checked yet.
    pub fn target_path(&self, cwd: &Path, raw: &str) -> PathBuf {
        match raw.strip_prefix('/') {
            Some(rest) => self.root.join(rest.trim_start_matches('/')),
            None => cwd.join(raw),
        }
    }

    /// Returns the canonical form of `path` if it lies inside the root.
    ///
    /// The check runs on the lexically cleaned path first and then on the
    /// canonical one, so `..` escapes are denied even when their target does
    /// not exist and symlinks cannot lead outside. A path whose last
    /// component does not exist yet is canonicalized through its parent.
    pub fn ensure_in_sandbox(&self, path: &Path) -> Result<PathBuf, FtpError> {
        let cleaned = clean_path(path);
        if !cleaned.starts_with(&self.root) {
            return Err(FtpError::access_denied());
        }
        let canonical = canonicalize_lenient(&cleaned).map_err(FtpError::system)?;
        if !canonical.starts_with(&self.root) {
            return Err(FtpError::access_denied());
        }
        Ok(canonical)
    }

    /// Display form of a path inside the sandbox: `/` for the root itself.
    pub fn relative_display(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        format!("/{}", parts.join("/"))
    }

    /// Splits a LIST/NLST argument into the directory to list and an
    /// optional entry name or glob within it. Leading `-options` are dropped.
    pub fn resolve_listing(
        &self,
        cwd: &Path,
        raw: Option<&str>,
    ) -> Result<(PathBuf, Option<String>), FtpError> {
        let raw = strip_list_options(raw.unwrap_or_default());
        let raw = if raw.is_empty() { "." } else { raw };
        let target = self.target_path(cwd, raw);

        if let Some(name) = target.file_name().map(|n| n.to_string_lossy().into_owned()) {
            if is_glob(&name) {
                let parent = target.parent().unwrap_or(self.root.as_path());
                let dir = self.ensure_in_sandbox(parent)?;
                return Ok((dir, Some(name)));
            }
        }

        let resolved = self.ensure_in_sandbox(&target)?;
        let metadata = std::fs::metadata(&resolved).map_err(FtpError::system)?;
        if metadata.is_dir() {
            return Ok((resolved, None));
        }
        let name = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let dir = resolved.parent().unwrap_or(self.root.as_path()).to_path_buf();
        Ok((dir, name))
    }
}

fn strip_list_options(mut raw: &str) -> &str {
    loop {
        let trimmed = raw.trim_start();
        if !trimmed.starts_with('-') {
            return trimmed.trim_end();
        }
        raw = trimmed.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
    }
}

/// Resolves `.` and `..` without touching the filesystem.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Canonicalizes through the parent when the last component is missing.
/// A dangling symlink in that position is followed to where it points.
fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    resolve_missing(path, 0)
}

fn resolve_missing(path: &Path, depth: usize) -> io::Result<PathBuf> {
    let err = match path.canonicalize() {
        Ok(canonical) => return Ok(canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => e,
        Err(e) => return Err(e),
    };
    let (parent, name) = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => (parent.canonicalize()?, name),
        _ => return Err(err),
    };
    let joined = parent.join(name);
    match std::fs::symlink_metadata(&joined) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if depth >= MAX_SYMLINK_DEPTH {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "too many levels of symbolic links",
                ));
            }
            let target = std::fs::read_link(&joined)?;
            resolve_missing(&clean_path(&parent.join(target)), depth + 1)
        }
        _ => Ok(joined),
    }
}
