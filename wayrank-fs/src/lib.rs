//! Filesystem helpers built on `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Read;

    #[rstest]
    fn missing_file_reports_not_found() {
        let err = open_utf8_file(Utf8Path::new("no/such/rank-request.json"))
            .expect_err("file should not exist");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn opens_existing_file() {
        let manifest = Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let mut contents = String::new();
        open_utf8_file(&manifest)
            .expect("manifest should open")
            .read_to_string(&mut contents)
            .expect("manifest should be UTF-8");
        assert!(contents.contains("wayrank-fs"));
    }
}
