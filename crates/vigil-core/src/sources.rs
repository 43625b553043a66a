use std::fs;
use std::path::Path;

use tracing::warn;
use vigil_config::Config;

use crate::batch::run_batch_with_skipped;
use crate::model::{BatchReport, Document, SkippedDocument};
use crate::rules::RuleError;

/// Files larger than this are skipped unless the config raises the cap.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

// NUL sniffing window; matches the common "is this binary" heuristic.
const BINARY_SNIFF_BYTES: usize = 1024;

/// Maps a file extension to the language recorded in scan metadata.
/// Unrecognized or missing extensions fall back to "unknown".
pub fn language_hint(path: &Path) -> &'static str {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return "unknown",
    };
    match ext.as_str() {
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" => "python",
        "rb" => "ruby",
        "go" => "go",
        "java" => "java",
        "php" => "php",
        "rs" => "rust",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "sh" | "bash" => "shell",
        "sql" => "sql",
        "yml" | "yaml" => "yaml",
        "json" => "json",
        _ => "unknown",
    }
}

/// Loads one file into a scannable document. Returns the human-readable
/// skip reason when the file cannot be scanned.
pub fn load_document(path: &Path, max_file_size: u64) -> Result<Document, String> {
    let metadata = fs::metadata(path).map_err(|e| format!("unreadable: {}", e))?;
    if metadata.len() > max_file_size {
        return Err(format!(
            "file size ({} bytes) exceeds limit ({} bytes)",
            metadata.len(),
            max_file_size
        ));
    }

    let bytes = fs::read(path).map_err(|e| format!("unreadable: {}", e))?;
    if bytes.iter().take(BINARY_SNIFF_BYTES).any(|&b| b == 0) {
        return Err("binary file".to_string());
    }

    let text = String::from_utf8(bytes).map_err(|_| "not valid UTF-8".to_string())?;
    let language = language_hint(path);
    Ok(Document::new(path.display().to_string(), text, language))
}

/// Scans a set of filesystem paths. Unloadable files become skipped
/// entries in the report; the batch continues with the rest.
pub fn scan_paths<P: AsRef<Path>>(paths: &[P], config: &Config) -> Result<BatchReport, RuleError> {
    let max_file_size = config.scan.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE);

    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        let path = path.as_ref();
        match load_document(path, max_file_size) {
            Ok(document) => documents.push(document),
            Err(reason) => {
                warn!(path = %path.display(), %reason, "Skipping file");
                skipped.push(SkippedDocument {
                    id: path.display().to_string(),
                    reason,
                });
            }
        }
    }

    run_batch_with_skipped(&documents, skipped, config)
}

// ==========================
// Tests
// ==========================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_language_hint_known_extensions() {
        assert_eq!(language_hint(Path::new("app.js")), "javascript");
        assert_eq!(language_hint(Path::new("app.TSX")), "typescript");
        assert_eq!(language_hint(Path::new("job.py")), "python");
        assert_eq!(language_hint(Path::new("main.go")), "go");
    }

    #[test]
    fn test_language_hint_unknown() {
        assert_eq!(language_hint(Path::new("notes.txt")), "unknown");
        assert_eq!(language_hint(Path::new("Makefile")), "unknown");
    }

    #[test]
    fn test_load_document_reads_utf8_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.js", b"let x = 1;\n");

        let doc = load_document(&path, DEFAULT_MAX_FILE_SIZE).unwrap();
        assert_eq!(doc.language, "javascript");
        assert_eq!(doc.text, "let x = 1;\n");
        assert!(doc.id.ends_with("a.js"));
    }

    #[test]
    fn test_load_document_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        let reason = load_document(&dir.path().join("gone.js"), DEFAULT_MAX_FILE_SIZE)
            .unwrap_err();

        assert!(reason.starts_with("unreadable:"));
    }

    #[test]
    fn test_load_document_rejects_oversize_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "big.js", b"0123456789012345678901234567890123456789");

        let reason = load_document(&path, 16).unwrap_err();
        assert!(reason.contains("exceeds limit (16 bytes)"));
    }

    #[test]
    fn test_load_document_rejects_binary_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "blob.js", b"let x = 1;\x00\x01\x02");

        let reason = load_document(&path, DEFAULT_MAX_FILE_SIZE).unwrap_err();
        assert_eq!(reason, "binary file");
    }

    #[test]
    fn test_load_document_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "latin.js", &[0xff, 0xfe, b'a', b'b']);

        let reason = load_document(&path, DEFAULT_MAX_FILE_SIZE).unwrap_err();
        assert_eq!(reason, "not valid UTF-8");
    }

    #[test]
    fn test_scan_paths_partitions_skips_from_results() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "app.js", b"let token = Math.random();\n");
        let bad = write_file(&dir, "blob.js", b"\x00\x01\x02");

        let config = Config::default();
        let report = scan_paths(&[good.clone(), bad.clone()], &config).unwrap();

        assert_eq!(report.summary.total_files, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id, bad.display().to_string());
        assert_eq!(report.skipped[0].reason, "binary file");
        assert!(report.per_file.get(&good.display().to_string()).is_some());
    }
}
