use std::io;
use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions};
use log::debug;
use walkdir::WalkDir;

use crate::*;

// Expand every token into the files it names. A token matching nothing as
// a wildcard pattern is taken as a literal path; directories are walked.
pub fn resolve_files<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        for path in expand_pattern(token) {
            if path.is_dir() {
                files.append(&mut walk_dir(&path)?);
            } else {
                files.push(path);
            }
        }
    }

    debug!("Resolved {} candidate files", files.len());
    Ok(files)
}

fn expand_pattern(token: &str) -> Vec<PathBuf> {
    // Hidden entries only match a pattern that spells out the leading dot
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let matches: Vec<PathBuf> = match glob_with(token, options) {
        // Unreadable entries are skipped, same as a shell would
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
        Err(_) => Vec::new(),
    };

    if matches.is_empty() {
        vec![PathBuf::from(token)]
    } else {
        matches
    }
}

// All regular files below `dir`, at any depth, in file-name order
fn walk_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            JoinError::io(path, io::Error::from(e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
