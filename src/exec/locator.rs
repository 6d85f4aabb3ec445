//! Executable resolution on the host search path.

use std::env;
use std::path::PathBuf;

/// Something that can resolve a program name to an absolute path.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutableLocator: Send + Sync {
    /// Resolve `name` on the search path, or `None` if it is not there.
    /// Pure lookup; callers own any caching.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

/// Walks the `PATH` environment variable. On Unix a hit must be a regular
/// file with an execute bit; on Windows the `PATHEXT` extensions are tried.
pub struct PathLocator;

impl ExecutableLocator for PathLocator {
    #[tracing::instrument(skip(self))]
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let path_var = env::var_os("PATH")?;

        for dir in env::split_paths(&path_var) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            for candidate in candidates(dir.join(name)) {
                if is_executable(&candidate) {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

#[cfg(unix)]
fn candidates(base: PathBuf) -> Vec<PathBuf> {
    vec![base]
}

#[cfg(windows)]
fn candidates(base: PathBuf) -> Vec<PathBuf> {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    let mut out = vec![base.clone()];
    for ext in exts.split(';').filter(|e| !e.is_empty()) {
        let mut with_ext = base.as_os_str().to_os_string();
        with_ext.push(ext);
        out.push(PathBuf::from(with_ext));
    }
    out
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(windows)]
fn is_executable(path: &std::path::Path) -> bool {
    path.is_file()
}
