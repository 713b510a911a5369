//! Batch assembly.
//!
//! A batch aggregates everything one invocation asked for: hash
//! arguments, files of newline-delimited hashes, a directory to hash
//! recursively, files to upload, and URLs. `resolve` flattens the
//! indirect sources into the hash list before processing begins,
//! preserving order: arguments first, then directory-derived hashes,
//! then file-list hashes.

use crate::core::error::VtResult;
use crate::core::hasher;
use std::io::BufRead;
use std::path::PathBuf;
use walkdir::WalkDir;

/// The work requested by one invocation.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    /// Hashes given directly as arguments.
    pub hashes: Vec<String>,

    /// Files containing newline-delimited hashes.
    pub hash_files: Vec<PathBuf>,

    /// Directory whose files are hashed recursively and appended to
    /// the hash list.
    pub directory: Option<PathBuf>,

    /// Local files to upload for analysis.
    pub uploads: Vec<PathBuf>,

    /// URLs to scan.
    pub urls: Vec<String>,

    /// Whether hashes are rescanned instead of looked up.
    pub rescan: bool,
}

/// A batch with every indirect source flattened into the hash list.
#[derive(Debug, Clone)]
pub struct ResolvedBatch {
    /// All hashes to process, in submission order.
    pub hashes: Vec<String>,
    /// Files to upload.
    pub uploads: Vec<PathBuf>,
    /// URLs to scan.
    pub urls: Vec<String>,
    /// Whether hashes are rescanned instead of looked up.
    pub rescan: bool,
}

impl Batch {
    /// Returns `true` when the batch requests no work at all.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
            && self.hash_files.is_empty()
            && self.directory.is_none()
            && self.uploads.is_empty()
            && self.urls.is_empty()
    }

    /// Reads hash-list files and hashes the directory tree, producing
    /// the flat work list. Missing or unreadable inputs are logged and
    /// skipped rather than failing the whole batch.
    pub fn resolve(self) -> VtResult<ResolvedBatch> {
        let mut hashes = self.hashes;

        if let Some(directory) = &self.directory {
            for entry in WalkDir::new(directory) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable directory entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                match hasher::digest_file(entry.path()) {
                    Ok(digests) => {
                        tracing::debug!(
                            path = %entry.path().display(),
                            sha256 = %digests.sha256,
                            "hashed file"
                        );
                        hashes.push(digests.sha256);
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %entry.path().display(),
                            error = %e,
                            "skipping unhashable file"
                        );
                    }
                }
            }
        }

        for path in &self.hash_files {
            let file = match std::fs::File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping hash file");
                    continue;
                }
            };
            for line in std::io::BufReader::new(file).lines() {
                let line = line?;
                let hash = line.trim();
                if !hash.is_empty() {
                    hashes.push(hash.to_string());
                }
            }
        }

        let mut uploads = Vec::with_capacity(self.uploads.len());
        for path in self.uploads {
            if path.is_file() {
                uploads.push(path);
            } else {
                tracing::warn!(path = %path.display(), "skipping missing upload");
            }
        }

        Ok(ResolvedBatch {
            hashes,
            uploads,
            urls: self.urls,
            rescan: self.rescan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    #[test]
    fn test_empty_batch() {
        assert!(Batch::default().is_empty());

        let batch = Batch {
            urls: vec!["http://example.com/".to_string()],
            ..Default::default()
        };
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_resolve_reads_hash_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{MD5}").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  {MD5}  ").unwrap();

        let batch = Batch {
            hashes: vec!["argfirst".to_string()],
            hash_files: vec![file.path().to_path_buf()],
            ..Default::default()
        };
        let resolved = batch.resolve().unwrap();
        assert_eq!(resolved.hashes, vec!["argfirst", MD5, MD5]);
    }

    #[test]
    fn test_resolve_hashes_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.bin"), b"hello world").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/b.bin"), b"hello world").unwrap();

        let batch = Batch {
            directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let resolved = batch.resolve().unwrap();

        assert_eq!(resolved.hashes.len(), 2);
        for hash in &resolved.hashes {
            assert_eq!(
                hash,
                "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
            );
        }
    }

    #[test]
    fn test_resolve_skips_missing_inputs() {
        let batch = Batch {
            hash_files: vec![PathBuf::from("/nonexistent/hashes.txt")],
            uploads: vec![PathBuf::from("/nonexistent/sample.bin")],
            ..Default::default()
        };
        let resolved = batch.resolve().unwrap();
        assert!(resolved.hashes.is_empty());
        assert!(resolved.uploads.is_empty());
    }
}
