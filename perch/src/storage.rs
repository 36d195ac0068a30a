use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Durable, line-oriented storage backing the sensor resource
///
/// Implementors are expected to make `append_line` atomic with respect to
/// other appends; the server never calls it concurrently with itself.
pub trait Storage {
  /// Append `line` followed by a line terminator
  fn append_line(&self, line: &str) -> io::Result<()>;

  /// The most recently appended line that isn't empty, if any.
  ///
  /// Trailing `\r` and `\n` are not part of the line.
  fn read_last_nonempty_line(&self) -> Option<String>;
}

impl<'a, S: Storage + ?Sized> Storage for &'a S {
  fn append_line(&self, line: &str) -> io::Result<()> {
    (**self).append_line(line)
  }

  fn read_last_nonempty_line(&self) -> Option<String> {
    (**self).read_last_nonempty_line()
  }
}

/// [`Storage`] backed by a text file, one value per line
///
/// The file is created on first append. A missing file reads as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
  path: PathBuf,
}

impl FileStorage {
  /// Create a storage that reads from & appends to the file at `path`
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self { path: path.as_ref().to_path_buf() }
  }

  /// The file this storage writes to
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Storage for FileStorage {
  fn append_line(&self, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true)
                                     .append(true)
                                     .open(&self.path)?;
    file.write_all(format!("{}\n", line).as_bytes())?;
    file.flush()
  }

  fn read_last_nonempty_line(&self) -> Option<String> {
    let file = match File::open(&self.path) {
      | Ok(file) => file,
      | Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
      | Err(e) => {
        log::warn!("failed to open {}: {}", self.path.display(), e);
        return None;
      },
    };

    last_nonempty_line(BufReader::new(file)).unwrap_or_else(|e| {
                                              log::warn!("failed to read {}: {}", self.path.display(), e);
                                              None
                                            })
  }
}

/// Read `lines` to the end, keeping only the last line that isn't empty
/// (ignoring a trailing `\r`). Invalid UTF-8 is replaced.
pub(crate) fn last_nonempty_line(lines: impl BufRead) -> io::Result<Option<String>> {
  let mut last: Option<Vec<u8>> = None;

  for line in lines.split(b'\n') {
    let mut line = line?;
    if line.last() == Some(&b'\r') {
      line.pop();
    }

    if !line.is_empty() {
      last = Some(line);
    }
  }

  Ok(last.map(|line| String::from_utf8_lossy(&line).into_owned()))
}
