//! File intake: loading files from disk and turning terminal drops into paths.
//!
//! Dropping files onto most terminals pastes their paths, either one per line
//! or space separated with shell quoting, and some emit `file://` URIs.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

/// Which list a batch of files is headed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeTarget {
    /// Multi-file list used for documentation generation.
    Documentation,
    /// Single-file slot used for quality analysis.
    Quality,
}

/// A file picked by the user, with its contents read at intake time.
///
/// No type or size checks: binaries are forwarded to the backend untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name only, used for de-duplication and the multipart filename.
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            bytes,
        }
    }

    /// Read a file from disk.
    pub fn from_path(path: &Path) -> crate::error::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self {
            name,
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Human-readable size for file lists.
    pub fn size_label(&self) -> String {
        let size = self.bytes.len() as f64;
        if size < 1024.0 {
            format!("{} B", self.bytes.len())
        } else if size < 1024.0 * 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        }
    }
}

/// Split pasted text into paths.
///
/// Handles newline or whitespace separation, single and double quotes,
/// backslash escapes, `~/` expansion and `file://` URIs.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(|t| token_to_path(&t))
        .collect()
}

fn token_to_path(token: &str) -> PathBuf {
    if token.starts_with("file://") {
        if let Some(path) = Url::parse(token).ok().and_then(|u| u.to_file_path().ok()) {
            return path;
        }
    }
    expand_home(token)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return PathBuf::from(home.to_string_lossy().to_string() + rest);
            }
        }
    }
    PathBuf::from(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_separated_paths() {
        let paths = parse_dropped_paths("/tmp/a.rs\n/tmp/b.py\n");
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/a.rs"), PathBuf::from("/tmp/b.py")]
        );
    }

    #[test]
    fn quoted_and_escaped_spaces_stay_in_one_path() {
        let paths = parse_dropped_paths(r#"'/tmp/my file.rs' /tmp/other\ file.go "/tmp/x y.md""#);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/tmp/my file.rs"),
                PathBuf::from("/tmp/other file.go"),
                PathBuf::from("/tmp/x y.md"),
            ]
        );
    }

    #[test]
    fn file_uris_are_decoded() {
        let paths = parse_dropped_paths("file:///tmp/with%20space.txt");
        assert_eq!(paths, vec![PathBuf::from("/tmp/with space.txt")]);
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(parse_dropped_paths("  \n\t ").is_empty());
    }

    #[test]
    fn from_path_reads_binary_contents_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0u8, 159, 146, 150]).unwrap();

        let file = UploadedFile::from_path(&path).unwrap();

        assert_eq!(file.name, "blob.bin");
        assert_eq!(file.bytes, vec![0u8, 159, 146, 150]);
        assert_eq!(file.size_label(), "4 B");
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = UploadedFile::from_path(Path::new("/definitely/not/here.rs")).unwrap_err();
        assert!(matches!(err, crate::error::DocsmithError::Io(_)));
    }
}
