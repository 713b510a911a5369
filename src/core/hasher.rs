//! Multi-digest file hashing.
//!
//! Computes md5, sha1, and sha256 in a single streaming pass, the
//! three hash forms the scanning service speaks. Directory submission
//! hashes every file it finds and submits the sha256.

use crate::core::error::VtResult;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// The three digests of one input, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSet {
    /// md5 digest.
    pub md5: String,
    /// sha1 digest.
    pub sha1: String,
    /// sha256 digest.
    pub sha256: String,
}

/// Computes all three digests of a byte slice.
pub fn digest_bytes(data: &[u8]) -> DigestSet {
    let mut md5 = Md5::new();
    let mut sha1 = Sha1::new();
    let mut sha256 = Sha256::new();
    md5.update(data);
    sha1.update(data);
    sha256.update(data);
    finalize(md5, sha1, sha256)
}

/// Computes all three digests of a file, streaming its contents.
pub fn digest_file(path: &Path) -> VtResult<DigestSet> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    digest_reader(&mut reader)
}

/// Computes all three digests from a reader in a single pass.
pub fn digest_reader<R: Read>(reader: &mut R) -> VtResult<DigestSet> {
    let mut md5 = Md5::new();
    let mut sha1 = Sha1::new();
    let mut sha256 = Sha256::new();

    let mut buffer = [0u8; 64 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        let chunk = &buffer[..bytes_read];
        md5.update(chunk);
        sha1.update(chunk);
        sha256.update(chunk);
    }

    Ok(finalize(md5, sha1, sha256))
}

fn finalize(md5: Md5, sha1: Sha1, sha256: Sha256) -> DigestSet {
    DigestSet {
        md5: format!("{:x}", md5.finalize()),
        sha1: format!("{:x}", sha1.finalize()),
        sha256: format!("{:x}", sha256.finalize()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_digest_known_vectors() {
        let set = digest_bytes(b"hello world");
        assert_eq!(set.md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
        assert_eq!(set.sha1, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(
            set.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_digest_empty_input() {
        let set = digest_bytes(b"");
        assert_eq!(set.md5, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(set.sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            set.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_file_matches_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let from_file = digest_file(file.path()).unwrap();
        let from_bytes = digest_bytes(b"hello world");
        assert_eq!(from_file, from_bytes);
    }

    #[test]
    fn test_digest_missing_file() {
        let err = digest_file(Path::new("/nonexistent/sample.bin")).unwrap_err();
        assert!(matches!(err, crate::core::error::VtError::Io(_)));
    }
}
