use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::*;

pub const UNMATCHED_WARNING: &str = "reference contains unmatched IDs";

/// A candidate file paired with the rank it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub path: PathBuf,
    pub rank: usize,
}

/// Outcome of checking the candidate files against the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub files: Vec<Ranked>,
    pub unmatched_ids: usize,
}

// Look the basename up as-is, then with everything from the first "_0"
// dropped. Returns the identifier that matched along with its rank.
pub fn resolve_id(order: &Order, path: &Path) -> Option<(String, usize)> {
    let basename = basename(path);
    if let Some(rank) = order.rank(&basename) {
        return Some((basename, rank));
    }
    let prefix = &basename[..basename.find(SUFFIX_MARKER)?];
    order.rank(prefix).map(|rank| (prefix.to_string(), rank))
}

#[cfg(test)]
fn resolve_rank(order: &Order, path: &Path) -> Option<usize> {
    resolve_id(order, path).map(|(_, rank)| rank)
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// Every file must resolve, and there may not be more files than identifiers.
// Identifiers no file resolved to are counted for the warning.
pub fn validate(order: &Order, files: Vec<PathBuf>) -> Result<Validation> {
    let mut ranked: Vec<Ranked> = Vec::with_capacity(files.len());
    let mut missing: Vec<String> = Vec::new();
    let mut matched: HashMap<String, usize> = HashMap::new();

    for path in files {
        match resolve_id(order, &path) {
            Some((id, rank)) => {
                *matched.entry(id).or_insert(0) += 1;
                ranked.push(Ranked { path, rank });
            }
            None => missing.push(path.display().to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(JoinError::MissingInReference(missing));
    }

    // Every file resolved, so the surplus comes from IDs claimed more than once
    if ranked.len() > order.len() {
        let mut shared: Vec<(usize, String)> = matched
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, _)| (order.rank(id).unwrap_or(0), id.clone()))
            .collect();
        shared.sort();
        return Err(JoinError::SharedIds(
            shared.into_iter().map(|(_, id)| id).collect(),
        ));
    }

    let unmatched_ids = order.ids().filter(|id| !matched.contains_key(*id)).count();
    Ok(Validation {
        files: ranked,
        unmatched_ids,
    })
}
