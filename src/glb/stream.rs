//! Named byte-stream resolution

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Opens resources for reading by logical name
pub trait StreamReader {
    /// Open the resource called `name`
    fn input_stream(&self, name: &str) -> Result<Box<dyn Read>>;
}

/// Creates resources for writing by logical name
pub trait StreamWriter {
    /// Create or truncate the resource called `name`
    fn output_stream(&self, name: &str) -> Result<Box<dyn Write>>;
}

/// Streams backed by files under a root directory
#[derive(Debug, Clone)]
pub struct FileStreams {
    root: PathBuf,
}

impl FileStreams {
    /// Resolve names relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl StreamReader for FileStreams {
    fn input_stream(&self, name: &str) -> Result<Box<dyn Read>> {
        let file = File::open(self.resolve(name))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

impl StreamWriter for FileStreams {
    fn output_stream(&self, name: &str) -> Result<Box<dyn Write>> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
