use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::*;

lazy_static! {
    static ref NUMBERED_ID: Regex = Regex::new(NUMBERED_ID_PATTERN).unwrap();
    static ref SENT_ID: Regex = Regex::new(SENT_ID_PATTERN).unwrap();
}

/// Identifier -> 1-based rank of its first appearance in the reference.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Order {
    ranks: HashMap<String, usize>,
}

impl Order {
    /// Number identifiers in the order given. A repeated identifier keeps
    /// its first rank and does not use up a number.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        for id in ids {
            let next = ranks.len() + 1;
            ranks.entry(id.into()).or_insert(next);
        }
        Order { ranks }
    }

    // Read every line of the reference and keep the identifiers found
    pub fn from_reference(path: &Path, extractor: &IdExtractor) -> Result<Self> {
        let file = File::open(path).map_err(|e| JoinError::io(path, e))?;

        let mut ids: Vec<String> = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| JoinError::io(path, e))?;
            if let Some(id) = extractor.extract(&line) {
                ids.push(id.to_string());
            }
        }

        let order = Order::from_ids(ids);
        debug!(
            "Found {} identifiers in {}",
            order.len(),
            path.display()
        );
        Ok(order)
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ranks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Pulls the identifier out of a reference line. The custom pattern is
/// tried first, then the numbered header, then the `sent_id` header.
#[derive(Debug, Clone)]
pub struct IdExtractor {
    custom: Regex,
}

impl IdExtractor {
    // Patterns only match at the start of the line
    pub fn new(pattern: &str) -> Result<Self> {
        let custom = Regex::new(&format!("^(?:{})", pattern))?;
        if custom.captures_len() < 2 {
            return Err(JoinError::NoCaptureGroup(pattern.to_string()));
        }
        Ok(IdExtractor { custom })
    }

    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        [&self.custom, &*NUMBERED_ID, &*SENT_ID]
            .iter()
            .find_map(|re| re.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for IdExtractor {
    fn default() -> Self {
        IdExtractor {
            custom: Regex::new(&format!("^(?:{})", DEFAULT_ID_PATTERN)).unwrap(),
        }
    }
}
