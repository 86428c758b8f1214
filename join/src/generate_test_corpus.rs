use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::seq::SliceRandom;

use join::LINE_SEPARATOR;

pub const REFERENCE_FILE: &str = "reference.txt";
pub const EXPECTED_FILE: &str = "expected.txt";
pub const FILES_DIR: &str = "files";

/// Write a reference file plus one file per document, in shuffled order
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to fill
    dir: PathBuf,

    /// Number of documents
    docs: usize,

    /// Name files docN_0001 instead of docN
    #[arg(long)]
    suffixed: bool,

    /// Leave the last N documents without a file
    #[arg(long, default_value_t = 0)]
    drop: usize,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    generate_corpus(&args)
}

fn generate_corpus(args: &Args) -> io::Result<()> {
    let files_dir = args.dir.join(FILES_DIR);
    fs::create_dir_all(&files_dir)?;

    // Reference lists every document, header first, like an AMR file
    let mut reference = File::create(args.dir.join(REFERENCE_FILE))?;
    for doc in 1..=args.docs {
        writeln!(reference, "# ::id doc{} ::snt sentence number {}", doc, doc)?;
        writeln!(reference, "(s{} / sentence :quant {})", doc, doc)?;
        writeln!(reference)?;
    }

    let kept = args.docs.saturating_sub(args.drop);

    // Expected join output, in reference order
    let mut expected = File::create(args.dir.join(EXPECTED_FILE))?;
    for doc in 1..=kept {
        expected.write_all(doc_contents(doc).as_bytes())?;
        expected.write_all(LINE_SEPARATOR)?;
    }

    let mut docs: Vec<usize> = (1..=kept).collect();
    docs.shuffle(&mut rand::thread_rng());
    for doc in docs {
        println!("Generating document #{}", doc);
        write_doc(&files_dir, doc, args.suffixed)?;
    }

    Ok(())
}

fn write_doc(files_dir: &Path, doc: usize, suffixed: bool) -> io::Result<()> {
    let name = if suffixed {
        format!("doc{}_0001", doc)
    } else {
        format!("doc{}", doc)
    };
    let mut file = File::create(files_dir.join(name))?;
    file.write_all(doc_contents(doc).as_bytes())
}

fn doc_contents(doc: usize) -> String {
    format!("# ::id doc{}\n(s{} / sentence :quant {})\n", doc, doc, doc)
}
