use crate::error::CliError;
use std::fs;
use std::path::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// Recursively visits directories and collects entries.
///
/// Directories or entries that cannot be read are skipped.
pub fn find_all_files(dir: &Path, entries: &mut Vec<fs::DirEntry>) -> std::io::Result<()> {
    let dir_entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(()), // Silently return if directory can't be read
    };

    for entry in dir_entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue, // Skip problematic entries, e.g. those without access.
        };

        let path = entry.path();
        if path.is_dir() {
            find_all_files(&path, entries)?;
        } else {
            entries.push(entry);
        }
    }
    Ok(())
}

/// Prints a failed file to stderr so the remaining files still get processed.
pub fn handle_process_entry_error(result: Result<(), CliError>) {
    if let Err(e) = result {
        eprintln!("{e}");
    }
}

/// Canonicalizes a CLI path argument, creating the directory if it doesn't exist.
pub fn canonicalize_cli_path(value: &str) -> Result<PathBuf, String> {
    let path = Path::new(value);

    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| format!("Failed to create directory: {e}"))?;
    }

    fs::canonicalize(path).map_err(|e| format!("Invalid path: {e}"))
}

/// Mirrors `path` from `input_dir` into `output_dir`, replacing the extension and
/// appending `suffix` to the file stem. Parent directories are created.
pub fn output_path(
    path: &Path,
    input_dir: &Path,
    output_dir: &Path,
    suffix: &str,
    extension: &str,
) -> Result<PathBuf, CliError> {
    let relative = path.strip_prefix(input_dir).unwrap_or(path);
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut target = output_dir.join(relative);
    target.set_file_name(format!("{stem}{suffix}.{extension}"));

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(target)
}

/// Adds the size of `path` to the running byte counter.
pub fn count_file_bytes(path: &Path, bytes_processed: &AtomicU64) {
    if let Ok(metadata) = fs::metadata(path) {
        bytes_processed.fetch_add(metadata.len(), Ordering::Relaxed);
    }
}

/// Runs `op` for every entry, in parallel when built with `multithreaded`.
pub fn for_each_entry<F>(entries: &[fs::DirEntry], op: F)
where
    F: Fn(&fs::DirEntry) -> Result<(), CliError> + Sync + Send,
{
    #[cfg(feature = "multithreaded")]
    {
        use rayon::prelude::*;
        entries
            .par_iter()
            .for_each(|entry| handle_process_entry_error(op(entry)));
    }

    #[cfg(not(feature = "multithreaded"))]
    {
        entries
            .iter()
            .for_each(|entry| handle_process_entry_error(op(entry)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_mirrors_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");

        let target = output_path(
            &input.join("sub").join("brick.jpg"),
            &input,
            &output,
            "_mip2",
            "png",
        )
        .unwrap();

        assert_eq!(target, output.join("sub").join("brick_mip2.png"));
        assert!(output.join("sub").is_dir());
    }

    #[test]
    fn finds_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("top.png"), b"x").unwrap();
        fs::write(dir.path().join("a/b/deep.png"), b"x").unwrap();

        let mut entries = Vec::new();
        find_all_files(dir.path(), &mut entries).unwrap();
        assert_eq!(entries.len(), 2);
    }
}
