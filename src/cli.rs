//! Command-line argument definitions.

use crate::output::Format;
use crate::runner::Batch;
use clap::Parser;
use std::path::PathBuf;

/// Submit hashes, files, and URLs to VirusTotal and render normalized
/// reports.
#[derive(Debug, Parser)]
#[command(name = "vtsweep", version, about)]
pub struct Args {
    /// Search for a single hash (repeatable)
    #[arg(short = 'H', long = "search-hash", value_name = "HASH")]
    pub hashes: Vec<String>,

    /// Request a rescan of a hash or a comma-joined hash list (repeatable)
    #[arg(short = 'r', long = "rescan-hash", value_name = "HASH[,HASH]")]
    pub rescans: Vec<String>,

    /// Search each hash in a file of newline-delimited hashes (repeatable)
    #[arg(short = 'f', long = "search-hash-file", value_name = "FILE")]
    pub hash_files: Vec<PathBuf>,

    /// Upload a file for analysis (repeatable)
    #[arg(short = 'u', long = "upload-file", value_name = "FILE")]
    pub uploads: Vec<PathBuf>,

    /// Search for a single URL (repeatable)
    #[arg(short = 's', long = "search-site", value_name = "URL")]
    pub sites: Vec<String>,

    /// Hash every file under a directory recursively and search the hashes
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Output encoding
    #[arg(short = 'o', long = "output", value_enum, default_value_t = Format::Stdout)]
    pub output: Format,

    /// Proxy server for all requests (overrides the config file)
    #[arg(short = 'p', long = "proxy-server", value_name = "URL")]
    pub proxy: Option<String>,

    /// Retry attempts per resource on transport failures
    #[arg(long = "attempts", value_name = "N", default_value_t = 5)]
    pub attempts: u32,

    /// Config file location (defaults to ~/.vtsweep)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Create a skeleton config file and exit
    #[arg(long = "create-config")]
    pub create_config: bool,

    /// Print verbose information to stderr
    #[arg(long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Assembles the work batch. Rescan hashes join the plain hash
    /// list and flip the batch into rescan mode, as in the original
    /// tool's interface.
    pub fn batch(&self) -> Batch {
        let mut hashes = self.hashes.clone();
        hashes.extend(self.rescans.iter().cloned());

        Batch {
            hashes,
            hash_files: self.hash_files.clone(),
            directory: self.directory.clone(),
            uploads: self.uploads.clone(),
            urls: self.sites.clone(),
            rescan: !self.rescans.is_empty(),
        }
    }
}
