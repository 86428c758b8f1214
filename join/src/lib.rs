pub mod concat;
pub mod order;
pub mod resolve;
pub mod validate;

pub use concat::*;
pub use order::*;
pub use resolve::*;
pub use validate::*;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

// <----------------- IDENTIFIERS ----------------- >
// AMR header, e.g. "# ::id bolt12_64556_5627.1 ::date ..."
pub const DEFAULT_ID_PATTERN: &str = r"#\s*::id\s+(\S+)";

// Numbered comment header, e.g. "# 42"
pub const NUMBERED_ID_PATTERN: &str = r"^#\s*(\d+)";

// CoNLL-U header, e.g. "# sent_id = weblog-juancole.com_20051126063000_ENG_0001"
pub const SENT_ID_PATTERN: &str = r"^#\s*sent_id\s*=\s*(\S+)";

// Everything from the first occurrence of this marker onward is dropped
// when a basename is not found in the reference as-is.
pub const SUFFIX_MARKER: &str = "_0";

// <----------------- OUTPUT ----------------- >
#[cfg(windows)]
pub const LINE_SEPARATOR: &[u8] = b"\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &[u8] = b"\n";

// <----------------- ERRORS ----------------- >
#[derive(Error, Debug)]
pub enum JoinError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Files missing in reference: {}", .0.join(", "))]
    MissingInReference(Vec<String>),

    #[error("More files than identifiers in reference, several files resolve to: {}", .0.join(", "))]
    SharedIds(Vec<String>),

    #[error("Invalid identifier pattern: {0}")]
    InvalidIdPattern(#[from] regex::Error),

    #[error("Identifier pattern has no capture group: {0}")]
    NoCaptureGroup(String),
}

impl JoinError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        JoinError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, JoinError>;

// <----------------- PIPELINE ----------------- >
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub files: usize,
    pub bytes: u64,
    pub unmatched_ids: usize,
}

impl Summary {
    // At most one warning, whatever the number of unmatched identifiers.
    // Reported by the caller on stderr, whatever the log configuration.
    pub fn warning(&self) -> Option<&'static str> {
        if self.unmatched_ids > 0 {
            Some(UNMATCHED_WARNING)
        } else {
            None
        }
    }
}

// Reference -> candidates -> validation -> sorted copy. Nothing is written
// to `out` unless validation passes.
pub fn join<S: AsRef<str>, W: Write>(
    out: &Path,
    reference: &Path,
    tokens: &[S],
    extractor: &IdExtractor,
    status: W,
    show_progress: bool,
) -> Result<Summary> {
    let order = Order::from_reference(reference, extractor)?;
    info!(
        "Read {} identifiers from {}",
        order.len(),
        reference.display()
    );

    let files = resolve_files(tokens)?;
    let validation = validate(&order, files)?;
    debug!("{} reference identifiers have no file", validation.unmatched_ids);

    let unmatched_ids = validation.unmatched_ids;
    let sorted = sort_by_rank(validation.files);
    let desc = format!("Writing {}", out.display());
    let mut progress = Progress::new(status, &desc, sorted.len()).enabled(show_progress);
    let bytes = write_output(out, &sorted, &mut progress)?;

    Ok(Summary {
        files: sorted.len(),
        bytes,
        unmatched_ids,
    })
}
