//! Static page-fragment loading.
//!
//! A page name maps to `<name>.html` under the pages root and comes back as
//! raw text; no structure is imposed on the content. Names are restricted to
//! a flat token alphabet so a request can never resolve outside the pages
//! directory. One read, no retry, no cache.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Why a page fragment could not be served.
#[derive(Debug)]
pub enum PageError {
    /// The name is empty or contains characters outside `[A-Za-z0-9_-]`.
    InvalidName { name: String },
    /// No fragment with that name exists under the pages root.
    NotFound { name: String },
    /// The fragment exists but could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::InvalidName { name } => write!(f, "invalid page name '{name}'"),
            PageError::NotFound { name } => write!(f, "no page named '{name}'"),
            PageError::Io { path, source } => {
                write!(f, "could not read page {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn valid_page_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

/// Fetch the raw text of the fragment `name` under `pages_root`.
pub fn load_page(pages_root: &Path, name: &str) -> Result<String, PageError> {
    if !valid_page_name(name) {
        return Err(PageError::InvalidName {
            name: name.to_string(),
        });
    }

    let path = pages_root.join(format!("{name}.html"));
    if !path.is_file() {
        return Err(PageError::NotFound {
            name: name.to_string(),
        });
    }
    fs::read_to_string(&path).map_err(|source| PageError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn serves_existing_fragment_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let body = "<section><h1>Welcome</h1></section>\n";
        let mut file = std::fs::File::create(dir.path().join("home.html")).unwrap();
        file.write_all(body.as_bytes()).unwrap();

        assert_eq!(load_page(dir.path(), "home").unwrap(), body);
    }

    #[test]
    fn missing_fragment_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match load_page(dir.path(), "absent") {
            Err(PageError::NotFound { name }) => assert_eq!(name, "absent"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn traversal_and_junk_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["", "../secrets", "a/b", "/etc/passwd", "home.html", "a b"] {
            match load_page(dir.path(), name) {
                Err(PageError::InvalidName { .. }) => {}
                other => panic!("expected InvalidName for {name:?}, got {other:?}"),
            }
        }
    }
}
