use std::fs;

use perch::req::Method;
use perch::resp::code;
use perch::server::dispatch;
use perch::storage::{FileStorage, Storage};

#[test]
fn append_creates_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("data.txt");
  let storage = FileStorage::new(&path);

  assert_eq!(storage.read_last_nonempty_line(), None);

  storage.append_line("21.0").unwrap();
  storage.append_line("23.5").unwrap();

  assert_eq!(fs::read_to_string(&path).unwrap(), "21.0\n23.5\n");
  assert_eq!(storage.read_last_nonempty_line(), Some("23.5".to_string()));
}

#[test]
fn skips_blank_lines() {
  let file = tempfile::NamedTempFile::new().unwrap();
  fs::write(file.path(), "21.0\r\n\r\n\n").unwrap();

  let storage = FileStorage::new(file.path());
  assert_eq!(storage.read_last_nonempty_line(), Some("21.0".to_string()));

  storage.append_line("").unwrap();
  assert_eq!(storage.read_last_nonempty_line(), Some("21.0".to_string()));
}

#[test]
fn append_to_missing_directory_fails() {
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path().join("nope").join("data.txt"));

  assert!(storage.append_line("23.5").is_err());
  assert_eq!(dispatch(&storage, "sensor", "sensor", Method::POST, b"23.5", 1024).code,
             code::INTERNAL_SERVER_ERROR);
}

#[test]
fn dispatch_against_file() {
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path().join("data.txt"));

  let rep = dispatch(&storage, "sensor", "sensor", Method::GET, b"", 1024);
  assert_eq!((rep.code, rep.payload.as_slice()), (code::CONTENT, &b"NO_DATA"[..]));

  let rep = dispatch(&storage, "sensor", "sensor", Method::POST, b"23.5", 1024);
  assert_eq!((rep.code, rep.payload.as_slice()), (code::CHANGED, &b"UPDATED"[..]));

  let rep = dispatch(&storage, "sensor", "sensor", Method::GET, b"", 1024);
  assert_eq!((rep.code, rep.payload.as_slice()), (code::CONTENT, &b"23.5"[..]));
}
