use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use pii_config::Config;
use pii_core::Finding;
use pii_detect::scan;

use crate::cli::ScanArgs;

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    num_findings: usize,
    findings: Vec<Finding>,
}

#[derive(Debug, Serialize)]
struct Report {
    results: Vec<FileReport>,
    /// Finding counts per identifier type tag
    summary: BTreeMap<String, usize>,
}

pub fn handle(args: ScanArgs, config: &Config) -> Result<()> {
    let registry = super::registry_from_config(config);
    let mask = !args.no_mask && config.mask;
    let min_score = args.min_score.unwrap_or(config.min_score);

    let files = eligible_files(&args.input, args.recursive, &config.scan.extensions);
    if files.is_empty() {
        println!("No scannable files under {}", args.input.display());
        return Ok(());
    }

    if let Some(dir) = &args.redact_output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut results = Vec::new();
    let mut summary: BTreeMap<String, usize> = BTreeMap::new();

    for path in &files {
        tracing::debug!(file = %path.display(), "scanning");
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                // per-file failures are recorded, not fatal
                results.push(FileReport {
                    file: path.display().to_string(),
                    error: Some(e.to_string()),
                    num_findings: 0,
                    findings: Vec::new(),
                });
                continue;
            }
        };

        let output = scan(&registry, &text, mask);
        let findings: Vec<Finding> = output
            .findings
            .into_iter()
            .filter(|f| f.score >= min_score)
            .collect();

        for f in &findings {
            *summary.entry(f.kind.to_string()).or_insert(0) += 1;
        }

        if let Some(dir) = &args.redact_output_dir {
            write_redacted(dir, &args.input, path, &output.redacted_text)?;
        }

        results.push(FileReport {
            file: path.display().to_string(),
            error: None,
            num_findings: findings.len(),
            findings,
        });
    }

    let report = Report { results, summary };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("✓ Scanned {} file(s)", files.len());
    for (kind, count) in &report.summary {
        println!("  {}: {}", kind, count);
    }
    if report.summary.is_empty() {
        println!("  no findings");
    }
    println!("  Report: {}", args.output.display());

    Ok(())
}

fn eligible_files(input: &Path, recursive: bool, extensions: &[String]) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    let max_depth = if recursive { usize::MAX } else { 1 };
    WalkDir::new(input)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    let ext = ext.to_ascii_lowercase();
                    extensions.iter().any(|e| e == &ext)
                })
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Mirror the scanned file's path relative to `root` under `dir`, so
/// that `a/notes.txt` and `b/notes.txt` do not collide.
fn write_redacted(dir: &Path, root: &Path, source: &Path, redacted: &str) -> Result<()> {
    let rel = match source.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        // root was the file itself
        _ => Path::new(source.file_name().and_then(|n| n.to_str()).unwrap_or("output")),
    };
    let stem = rel
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = dir.join(rel.parent().unwrap_or_else(|| Path::new("")));
    fs::create_dir_all(&parent)
        .with_context(|| format!("creating {}", parent.display()))?;
    let out_path = parent.join(format!("{}.redacted.txt", stem));
    fs::write(&out_path, redacted)
        .with_context(|| format!("writing {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligible_files_respects_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::write(dir.path().join("b.log"), "x").unwrap();
        fs::write(dir.path().join("c.pdf"), "x").unwrap();

        let exts = vec!["txt".to_string(), "log".to_string()];
        let mut files = eligible_files(dir.path(), false, &exts);
        files.sort();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_eligible_files_single_file_bypasses_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.pdf");
        fs::write(&path, "x").unwrap();

        let files = eligible_files(&path, false, &["txt".to_string()]);
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_non_recursive_skips_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::write(sub.join("b.txt"), "x").unwrap();

        let exts = vec!["txt".to_string()];
        assert_eq!(eligible_files(dir.path(), false, &exts).len(), 1);
        assert_eq!(eligible_files(dir.path(), true, &exts).len(), 2);
    }

    #[test]
    fn test_redacted_outputs_mirror_relative_paths() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("a")).unwrap();
        fs::create_dir_all(root.path().join("b")).unwrap();
        let out = tempfile::tempdir().unwrap();

        // same file name in two subdirectories
        write_redacted(out.path(), root.path(), &root.path().join("a/notes.txt"), "one").unwrap();
        write_redacted(out.path(), root.path(), &root.path().join("b/notes.txt"), "two").unwrap();

        let a = fs::read_to_string(out.path().join("a/notes.redacted.txt")).unwrap();
        let b = fs::read_to_string(out.path().join("b/notes.redacted.txt")).unwrap();
        assert_eq!(a, "one");
        assert_eq!(b, "two");
    }

    #[test]
    fn test_redacted_output_for_single_file_input() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("notes.txt");
        fs::write(&file, "x").unwrap();
        let out = tempfile::tempdir().unwrap();

        // scanning a file directly: the file is its own root
        write_redacted(out.path(), &file, &file, "cleaned").unwrap();
        let text = fs::read_to_string(out.path().join("notes.redacted.txt")).unwrap();
        assert_eq!(text, "cleaned");
    }

    #[test]
    fn test_registry_scan_smoke() {
        let registry = pii_detect::Registry::built_in();
        let output = scan(registry, "reach me at 9876543210", true);
        assert_eq!(output.findings.len(), 1);
    }
}
