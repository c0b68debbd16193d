//! CSV loaders. Each file has a header row; blank cells mean "not set" and
//! lines starting with `#` are ignored.

pub mod accounts;
pub mod automations;
pub mod disputes;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub(crate) fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(rdr)
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("opening {}", path.display()))
}
