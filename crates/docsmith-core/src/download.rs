//! Saving generated content and rendered previews to disk.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::session::GeneratedDoc;

/// Write the generated content as `README.md` or `commented_code.txt`.
pub fn save_generated(dir: &Path, doc: &GeneratedDoc) -> crate::error::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(doc.purpose.download_name());
    std::fs::write(&path, &doc.content)?;
    info!(path = %path.display(), bytes = doc.content.len(), "Saved generated content");
    Ok(path)
}

/// Write a rendered HTML fragment, named after `stem`, wrapped in a minimal page.
pub fn save_preview(dir: &Path, stem: &str, html_fragment: &str) -> crate::error::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.html"));
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{stem}</title></head>\n<body>\n{html_fragment}</body>\n</html>\n"
    );
    std::fs::write(&path, page)?;
    info!(path = %path.display(), "Saved HTML preview");
    Ok(path)
}

/// File stem used for a preview of generated content.
pub fn preview_stem(doc: &GeneratedDoc) -> &'static str {
    match doc.purpose {
        crate::request::Purpose::Readme => "README",
        crate::request::Purpose::InlineComments => "commented_code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Purpose;
    use chrono::Utc;

    fn doc(content: &str, purpose: Purpose) -> GeneratedDoc {
        GeneratedDoc {
            content: content.to_string(),
            purpose,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn readme_is_saved_as_readme_md() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_generated(dir.path(), &doc("# Hello", Purpose::Readme)).unwrap();

        assert_eq!(path.file_name().unwrap(), "README.md");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Hello");
    }

    #[test]
    fn inline_comments_are_saved_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let path = save_generated(&out, &doc("// hi", Purpose::InlineComments)).unwrap();

        assert_eq!(path, out.join("commented_code.txt"));
    }

    #[test]
    fn preview_wraps_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let d = doc("x", Purpose::InlineComments);
        let path = save_preview(dir.path(), preview_stem(&d), "<p>x</p>\n").unwrap();

        assert_eq!(path.file_name().unwrap(), "commented_code.html");
        let page = std::fs::read_to_string(path).unwrap();
        assert!(page.contains("<body>\n<p>x</p>\n</body>"));
    }
}
