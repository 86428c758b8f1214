use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::*;

/// Per-file status line, redrawn in place: `Writing out.txt: 3/10 files [f=...]`
pub struct Progress<W: Write> {
    sink: W,
    desc: String,
    total: usize,
    done: usize,
    enabled: bool,
}

impl<W: Write> Progress<W> {
    pub fn new(sink: W, desc: &str, total: usize) -> Self {
        Progress {
            sink,
            desc: desc.to_string(),
            total,
            done: 0,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[cfg(test)]
    fn done(&self) -> usize {
        self.done
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.sink
    }

    // Status output is best effort, a broken terminal must not fail the copy
    fn update(&mut self, current: &Path) {
        self.done += 1;
        if !self.enabled {
            return;
        }
        let _ = write!(
            self.sink,
            "\r{}: {}/{} files [f={}]",
            self.desc,
            self.done,
            self.total,
            current.display()
        );
        let _ = self.sink.flush();
    }

    fn finish(&mut self) {
        if self.enabled && self.done > 0 {
            let _ = writeln!(self.sink);
        }
    }
}

// Stable, so files sharing a rank stay in enumeration order
pub fn sort_by_rank(mut files: Vec<Ranked>) -> Vec<PathBuf> {
    files.sort_by_key(|f| f.rank);
    files.into_iter().map(|f| f.path).collect()
}

// Copy each file verbatim into `out`, followed by a line separator.
// Only one input is open at a time.
pub fn copy_in_order<W: Write, P: Write>(
    files: &[PathBuf],
    out: &mut W,
    progress: &mut Progress<P>,
) -> Result<u64> {
    let mut written: u64 = 0;

    for path in files {
        progress.update(path);

        let mut input = File::open(path).map_err(|e| JoinError::io(path, e))?;
        written += io::copy(&mut input, out).map_err(|e| JoinError::io(path, e))?;
        out.write_all(LINE_SEPARATOR)
            .map_err(|e| JoinError::io(path, e))?;
        written += LINE_SEPARATOR.len() as u64;
    }

    progress.finish();
    Ok(written)
}

// Create (or truncate) `out_path` and fill it. A failure part way through
// leaves whatever was written so far on disk.
pub fn write_output<P: Write>(
    out_path: &Path,
    files: &[PathBuf],
    progress: &mut Progress<P>,
) -> Result<u64> {
    let file = File::create(out_path).map_err(|e| JoinError::io(out_path, e))?;
    let mut out = BufWriter::new(file);

    let written = copy_in_order(files, &mut out, progress)?;
    out.flush().map_err(|e| JoinError::io(out_path, e))?;

    debug!("Wrote {} bytes to {}", written, out_path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ranked(name: &str, rank: usize) -> Ranked {
        Ranked {
            path: PathBuf::from(name),
            rank,
        }
    }

    #[test]
    fn sort_is_stable_for_equal_ranks() {
        let files = vec![
            ranked("c", 3),
            ranked("b2", 2),
            ranked("a", 1),
            ranked("b1", 2),
        ];
        let sorted = sort_by_rank(files);
        assert_eq!(
            sorted,
            vec![
                PathBuf::from("a"),
                PathBuf::from("b2"),
                PathBuf::from("b1"),
                PathBuf::from("c")
            ]
        );
    }

    #[test]
    fn copies_bytes_verbatim_with_separators() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::write(&first, b"\xff\x00binary").unwrap();
        fs::write(&second, b"text\n").unwrap();

        let mut out: Vec<u8> = Vec::new();
        let mut progress = Progress::new(io::sink(), "Writing out", 2);
        let written = copy_in_order(&[first, second], &mut out, &mut progress).unwrap();

        let mut expected: Vec<u8> = b"\xff\x00binary".to_vec();
        expected.extend_from_slice(LINE_SEPARATOR);
        expected.extend_from_slice(b"text\n");
        expected.extend_from_slice(LINE_SEPARATOR);
        assert_eq!(out, expected);
        assert_eq!(written, expected.len() as u64);
        assert_eq!(progress.done(), 2);
    }

    #[test]
    fn progress_reports_count_and_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("doc1");
        fs::write(&doc, "A").unwrap();

        let mut progress = Progress::new(Vec::new(), "Writing joined.txt", 1);
        copy_in_order(&[doc.clone()], &mut io::sink(), &mut progress).unwrap();

        let status = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(
            status,
            format!("\rWriting joined.txt: 1/1 files [f={}]\n", doc.display())
        );
    }

    #[test]
    fn disabled_progress_stays_silent() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("doc1");
        fs::write(&doc, "A").unwrap();

        let mut progress = Progress::new(Vec::new(), "Writing", 1).enabled(false);
        copy_in_order(&[doc], &mut io::sink(), &mut progress).unwrap();
        assert_eq!(progress.done(), 1);
        assert!(progress.into_inner().is_empty());
    }

    #[test]
    fn missing_input_leaves_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present");
        let absent = dir.path().join("absent");
        let out_path = dir.path().join("out");
        fs::write(&present, "kept").unwrap();

        let mut progress = Progress::new(io::sink(), "Writing", 2);
        let err = write_output(&out_path, &[present, absent.clone()], &mut progress).unwrap_err();
        assert!(matches!(err, JoinError::Io { ref path, .. } if *path == absent));

        // BufWriter flushes on drop
        let mut expected = b"kept".to_vec();
        expected.extend_from_slice(LINE_SEPARATOR);
        assert_eq!(fs::read(&out_path).unwrap(), expected);
    }

    #[test]
    fn output_is_truncated_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("doc");
        let out_path = dir.path().join("out");
        fs::write(&doc, "new").unwrap();
        fs::write(&out_path, "old contents that are longer").unwrap();

        let mut progress = Progress::new(io::sink(), "Writing", 1);
        write_output(&out_path, &[doc], &mut progress).unwrap();

        let mut expected = b"new".to_vec();
        expected.extend_from_slice(LINE_SEPARATOR);
        assert_eq!(fs::read(&out_path).unwrap(), expected);
    }
}
