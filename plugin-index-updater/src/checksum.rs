use crate::error::UpdaterError;
use sha1::{Digest as _, Sha1};
use std::fs::File;
use std::io::Read as _;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute the SHA-1 of a file as lowercase hex.
///
/// The file is streamed through the hasher, so artifacts of any size are fine.
pub fn sha1_file(path: &Path) -> Result<String, UpdaterError> {
    let read_error = |source| UpdaterError::ReadArtifact {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_error)?;
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; BUF_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(read_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            sha1_file(file.path()).unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn known_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello\n").unwrap();
        file.flush().unwrap();

        assert_eq!(
            sha1_file(file.path()).unwrap(),
            "f572d396fae9206628714fb2ce00f72e94f2258f"
        );
    }

    #[test]
    fn larger_than_buffer_matches_one_shot_digest() {
        let data: Vec<u8> = (0..BUF_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        let expected = hex::encode(Sha1::digest(&data));
        let first = sha1_file(file.path()).unwrap();
        let second = sha1_file(file.path()).unwrap();

        assert_eq!(first, expected);
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
    }

    #[test]
    fn missing_file_is_an_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.bin");

        match sha1_file(&path) {
            Err(UpdaterError::ReadArtifact { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
