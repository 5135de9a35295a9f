use chrono::{DateTime, Local};
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, warn};
use regex::Regex;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

/// LIST produces long lines, NLST bare names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Long,
    NamesOnly,
}

impl ListStyle {
    fn ls_option(self) -> &'static str {
        match self {
            ListStyle::Long => "-l",
            ListStyle::NamesOnly => "-1",
        }
    }
}

/// Produces the text sent over the data connection for LIST and NLST.
///
/// `remainder` is an entry name or glob inside `dir`, already checked
/// against the sandbox. Lines are separated by `\n`.
pub trait ListFormatter: Send + Sync {
    fn list(&self, dir: &Path, remainder: Option<&str>, style: ListStyle) -> io::Result<String>;
}

pub fn is_glob(name: &str) -> bool {
    name.contains(['*', '?', '['])
}

/// Compiles a shell glob for matching single entry names.
pub fn glob_matcher(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?;
    Ok(glob.compile_matcher())
}

/// Names in `dir` selected by `remainder`, sorted. Hidden entries are only
/// matched by a pattern that itself starts with a dot.
pub fn matching_names(dir: &Path, remainder: Option<&str>) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    match remainder {
        Some(name) if !is_glob(name) => {
            if fs::symlink_metadata(dir.join(name)).is_ok() {
                names.push(name.to_string());
            }
        }
        _ => {
            let pattern = match remainder {
                Some(glob) => Some(
                    glob_matcher(glob)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
                ),
                None => None,
            };
            let show_hidden = remainder.is_some_and(|glob| glob.starts_with('.'));
            for entry in fs::read_dir(dir)? {
                let name = entry?.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') && !show_hidden {
                    continue;
                }
                if pattern.as_ref().map_or(true, |glob| glob.is_match(&name)) {
                    names.push(name);
                }
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Shells out to `ls`, as a real Unix FTP daemon would.
#[derive(Debug, Default)]
pub struct LsFormatter;

fn total_line() -> &'static Regex {
    static TOTAL: OnceLock<Regex> = OnceLock::new();
    TOTAL.get_or_init(|| Regex::new(r"(?m)^total \d+\n").expect("static regex"))
}

impl ListFormatter for LsFormatter {
    fn list(&self, dir: &Path, remainder: Option<&str>, style: ListStyle) -> io::Result<String> {
        let mut command = Command::new("ls");
        command.arg(style.ls_option()).current_dir(dir);

        if let Some(remainder) = remainder {
            let names = matching_names(dir, Some(remainder))?;
            if names.is_empty() {
                return Ok(String::new());
            }
            command.arg("--").args(names);
        }

        let output = command.output()?;
        if !output.status.success() {
            warn!(
                "ls in {:?} exited with {}: {}",
                dir,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(String::new());
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        Ok(total_line().replace_all(&listing, "").into_owned())
    }
}

/// Builds `ls -l` style lines without spawning a process.
#[derive(Debug, Default)]
pub struct NativeFormatter;

impl ListFormatter for NativeFormatter {
    fn list(&self, dir: &Path, remainder: Option<&str>, style: ListStyle) -> io::Result<String> {
        let mut listing = String::new();

        for name in matching_names(dir, remainder)? {
            if style == ListStyle::NamesOnly {
                listing.push_str(&name);
                listing.push('\n');
                continue;
            }

            let metadata = match fs::symlink_metadata(dir.join(&name)) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("Skipping {:?} in listing: {}", name, e);
                    continue;
                }
            };
            listing.push_str(&long_line(&name, &metadata));
        }

        Ok(listing)
    }
}

fn long_line(name: &str, metadata: &Metadata) -> String {
    let file_type = if metadata.is_dir() {
        'd'
    } else if metadata.file_type().is_symlink() {
        'l'
    } else {
        '-'
    };
    let date = metadata
        .modified()
        .map(|time| DateTime::<Local>::from(time).format("%b %d %H:%M").to_string())
        .unwrap_or_else(|_| "Jan 01 00:00".to_string());
    let (links, owner, group) = ownership(metadata);

    format!(
        "{}{} {:>3} {:<8} {:<8} {:>8} {} {}\n",
        file_type,
        permissions(metadata),
        links,
        owner,
        group,
        metadata.len(),
        date,
        name
    )
}

#[cfg(unix)]
fn permissions(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode();
    let flags = ['r', 'w', 'x'];
    (0..9)
        .map(|bit| {
            if mode & (0o400 >> bit) != 0 {
                flags[bit % 3]
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(not(unix))]
fn permissions(metadata: &Metadata) -> String {
    if metadata.permissions().readonly() {
        "r--r--r--".to_string()
    } else {
        "rw-r--r--".to_string()
    }
}

#[cfg(unix)]
fn ownership(metadata: &Metadata) -> (u64, String, String) {
    use std::os::unix::fs::MetadataExt;

    (
        metadata.nlink(),
        metadata.uid().to_string(),
        metadata.gid().to_string(),
    )
}

#[cfg(not(unix))]
fn ownership(_metadata: &Metadata) -> (u64, String, String) {
    (1, "owner".to_string(), "group".to_string())
}
