//! Line-oriented text mutation
//!
//! The RC file and the sudoers scratch copy are edited as plain lines of
//! bytes. Content is never decoded, so files in a legacy encoding pass
//! through untouched. Every whole-file rewrite goes through [`write_atomic`],
//! so readers never observe a partially written file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Create the parent directory and an empty file if either is missing
pub fn ensure_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::path(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::path(path, e))?;
    Ok(())
}

/// Append one line, creating the file first if needed
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_file(path)?;
    append_raw(path, format!("{}\n", line).as_bytes())
}

/// Append bytes verbatim to an existing file
pub fn append_raw(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| Error::path(path, e))?;
    file.write_all(data).map_err(|e| Error::path(path, e))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "appended");
    Ok(())
}

/// Lazily yield lines whose trimmed form starts with `prefix`
///
/// Matching lines are returned untrimmed. Each call re-reads the file.
pub fn lines_with_prefix(path: &Path, prefix: &str) -> Result<MatchingLines> {
    ensure_file(path)?;
    MatchingLines::open(path, LineFilter::Prefix(prefix.as_bytes().to_vec()))
}

/// Lazily yield lines that are neither blank nor `#` comments
pub fn non_comment_lines(path: &Path) -> Result<MatchingLines> {
    MatchingLines::open(path, LineFilter::NonComment)
}

enum LineFilter {
    Prefix(Vec<u8>),
    NonComment,
}

impl LineFilter {
    fn matches(&self, line: &[u8]) -> bool {
        let trimmed = line.trim_ascii();
        match self {
            LineFilter::Prefix(prefix) => trimmed.starts_with(prefix),
            LineFilter::NonComment => !trimmed.is_empty() && !trimmed.starts_with(b"#"),
        }
    }
}

/// Iterator returned by [`lines_with_prefix`] and [`non_comment_lines`]
///
/// Lines are yielded as raw bytes without the line terminator.
pub struct MatchingLines {
    reader: BufReader<File>,
    path: PathBuf,
    filter: LineFilter,
}

impl MatchingLines {
    fn open(path: &Path, filter: LineFilter) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::path(path, e))?;
        Ok(Self {
            reader: BufReader::new(file),
            path: path.to_path_buf(),
            filter,
        })
    }
}

impl Iterator for MatchingLines {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = buf.strip_suffix(b"\n").unwrap_or(&buf);
                    let line = line.strip_suffix(b"\r").unwrap_or(line);
                    if self.filter.matches(line) {
                        return Some(Ok(line.to_vec()));
                    }
                }
                Err(e) => return Some(Err(Error::path(&self.path, e))),
            }
        }
    }
}

/// Drop every line whose trimmed form starts with `key_prefix`
///
/// Returns the number of lines removed. With no match the file is rewritten
/// with identical content.
pub fn remove_lines_with_prefix(path: &Path, key_prefix: &str) -> Result<usize> {
    let key_prefix = key_prefix.as_bytes();
    rewrite_lines(path, |line| !line.trim_ascii().starts_with(key_prefix))
}

/// Drop every line containing `pattern`
///
/// An empty pattern matches every line.
pub fn remove_lines_containing(path: &Path, pattern: &str) -> Result<usize> {
    let pattern = pattern.as_bytes();
    rewrite_lines(path, |line| !contains(line, pattern))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

fn rewrite_lines<F>(path: &Path, keep: F) -> Result<usize>
where
    F: Fn(&[u8]) -> bool,
{
    let content = fs::read(path).map_err(|e| Error::path(path, e))?;
    let lines: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
    let survivors: Vec<&[u8]> = lines.iter().copied().filter(|l| keep(l)).collect();
    let removed = lines.len() - survivors.len();
    write_atomic(path, &survivors.join(&b'\n'))?;
    tracing::debug!(path = %path.display(), removed, "rewrote lines");
    Ok(removed)
}

/// Write content to a sibling temp file, then rename it over `path`
///
/// The target's permission bits are carried over when it already exists.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::path(dir, e))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::path(dir, e))?;
    temp.write_all(content)
        .map_err(|e| Error::path(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::path(temp.path(), e))?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(temp.path(), meta.permissions())
            .map_err(|e| Error::path(temp.path(), e))?;
    }

    temp.persist(path).map_err(|e| Error::path(path, e.error))?;
    Ok(())
}
