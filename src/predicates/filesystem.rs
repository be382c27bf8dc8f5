//! Filesystem predicates. The subject is a path string.

use std::fs;
use std::path::Path;

use crate::call::Invocation;
use crate::code::Code;
use crate::error::Error;
use crate::message::describe;

use super::{ensure, text};

fn path_check(
    call: &Invocation<'_>,
    code: Code,
    holds: impl Fn(&Path) -> bool,
    expectation: &str,
) -> Result<(), Error> {
    let ok = text(call.value).is_some_and(|s| !s.is_empty() && holds(Path::new(s)));
    ensure(ok, || {
        call.fail(
            code,
            format!("Path {} {}.", describe(call.value), expectation),
            &[],
        )
    })
}

pub fn file(call: &Invocation<'_>) -> Result<(), Error> {
    path_check(call, Code::InvalidFile, Path::is_file, "was expected to be an existing file")
}

pub fn directory(call: &Invocation<'_>) -> Result<(), Error> {
    path_check(call, Code::InvalidDirectory, Path::is_dir, "was expected to be an existing directory")
}

pub fn readable(call: &Invocation<'_>) -> Result<(), Error> {
    path_check(
        call,
        Code::InvalidReadable,
        |p| {
            if p.is_dir() {
                fs::read_dir(p).is_ok()
            } else {
                fs::File::open(p).is_ok()
            }
        },
        "was expected to be readable",
    )
}

pub fn writeable(call: &Invocation<'_>) -> Result<(), Error> {
    path_check(
        call,
        Code::InvalidWriteable,
        |p| fs::metadata(p).is_ok_and(|m| !m.permissions().readonly()),
        "was expected to be writeable",
    )
}

pub fn file_not_exists(call: &Invocation<'_>) -> Result<(), Error> {
    path_check(call, Code::InvalidFileNotExists, |p| !p.exists(), "was not expected to exist")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::test_support::{code_of, run};
    use serde_json::json;

    #[test]
    fn test_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        fs::write(&file_path, "hello").unwrap();

        let file_str = json!(file_path.to_str().unwrap());
        let dir_str = json!(dir.path().to_str().unwrap());

        assert!(run(file, file_str.clone(), &[]).is_ok());
        assert_eq!(code_of(run(file, dir_str.clone(), &[])), Code::InvalidFile);
        assert!(run(directory, dir_str.clone(), &[]).is_ok());
        assert_eq!(code_of(run(directory, file_str.clone(), &[])), Code::InvalidDirectory);
        assert!(run(readable, file_str.clone(), &[]).is_ok());
        assert!(run(readable, dir_str, &[]).is_ok());
        assert!(run(writeable, file_str, &[]).is_ok());
    }

    #[test]
    fn test_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = json!(dir.path().join("missing").to_str().unwrap());

        assert!(run(file_not_exists, missing.clone(), &[]).is_ok());
        assert_eq!(code_of(run(file, missing.clone(), &[])), Code::InvalidFile);
        assert_eq!(code_of(run(readable, missing.clone(), &[])), Code::InvalidReadable);
        assert_eq!(code_of(run(writeable, missing, &[])), Code::InvalidWriteable);

        let existing = json!(dir.path().to_str().unwrap());
        assert_eq!(code_of(run(file_not_exists, existing, &[])), Code::InvalidFileNotExists);
    }

    #[test]
    fn test_non_string_subject() {
        assert_eq!(code_of(run(file, json!(42), &[])), Code::InvalidFile);
        assert_eq!(code_of(run(file, json!(""), &[])), Code::InvalidFile);
    }
}
