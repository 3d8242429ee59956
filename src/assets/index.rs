//! Startup check of the assets folder against the content bundle

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::loader::resolve;

/// Extensions the loader can decode
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetReport {
    /// Content references with no file behind them
    pub missing: Vec<String>,
    /// Image files under the assets root that nothing references
    pub unreferenced: Vec<PathBuf>,
}

impl AssetReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unreferenced.is_empty()
    }
}

/// Compare the image references of the catalog with the files on disk
pub fn scan<'a>(assets_dir: &Path, references: impl IntoIterator<Item = &'a str>) -> AssetReport {
    let mut expected = BTreeSet::new();
    let mut missing = Vec::new();

    for reference in references {
        let path = resolve(assets_dir, reference);
        if !path.is_file() && !missing.iter().any(|m| m == reference) {
            missing.push(reference.to_string());
        }
        expected.insert(path);
    }

    let unreferenced: Vec<PathBuf> = WalkDir::new(assets_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_image(path) && !expected.contains(path))
        .collect();

    let report = AssetReport {
        missing,
        unreferenced,
    };

    if report.is_clean() {
        log::info!("✅ All {} referenced images present", expected.len());
    } else {
        log::info!(
            "📊 Asset check: {} missing, {} unreferenced",
            report.missing.len(),
            report.unreferenced.len()
        );
        for reference in &report.missing {
            log::warn!("⚠️  Missing image: {}", reference);
        }
    }

    report
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test_log::test]
    fn test_scan_reports_missing_and_unreferenced() {
        let root = std::env::temp_dir()
            .join(format!("portfolio-gallery-index-{}", std::process::id()));
        fs::create_dir_all(root.join("images/tvorba")).unwrap();
        fs::write(root.join("images/a.jpg"), b"").unwrap();
        fs::write(root.join("images/tvorba/stray.PNG"), b"").unwrap();
        fs::write(root.join("images/notes.txt"), b"").unwrap();

        let report = scan(&root, ["/images/a.jpg", "/images/b.jpg", "/images/b.jpg"]);

        assert_eq!(report.missing, vec!["/images/b.jpg".to_string()]);
        assert_eq!(report.unreferenced, vec![root.join("images/tvorba/stray.PNG")]);
        assert!(!report.is_clean());

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn test_missing_root_reports_everything_missing() {
        let root = Path::new("/definitely/not/here");
        let report = scan(root, ["/images/a.jpg"]);
        assert_eq!(report.missing.len(), 1);
        assert!(report.unreferenced.is_empty());
    }
}
