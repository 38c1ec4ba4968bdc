//! Byte-level collaborators: where recorded streams come from and go to.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::error::PlaybackError;

/// Lazily produced byte blocks, one recorded stream per block.
pub type BlockStream<'a> = BoxStream<'a, Result<Vec<u8>, PlaybackError>>;

/// Source of recorded streams. Dropping the stream stops loading.
pub trait BlockLoader: Send + Sync {
    fn load_blocks(&self) -> BlockStream<'_>;
}

/// Persists one finished stream.
#[async_trait]
pub trait Saver: Send + Sync {
    async fn save(&self, bytes: &[u8]) -> Result<(), PlaybackError>;
}

/// Optional block transform applied around save/load.
#[async_trait]
pub trait Compressor: Send + Sync {
    async fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, PlaybackError>;
    async fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>, PlaybackError>;
}

/// Blocks held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    blocks: Vec<Vec<u8>>,
}

impl MemoryLoader {
    pub fn new(blocks: Vec<Vec<u8>>) -> Self {
        Self { blocks }
    }

    pub fn push(&mut self, block: Vec<u8>) {
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl BlockLoader for MemoryLoader {
    fn load_blocks(&self) -> BlockStream<'_> {
        stream::iter(self.blocks.iter().cloned().map(Ok)).boxed()
    }
}

/// Every regular file of a directory, read in file-name order.
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    dir: PathBuf,
    extension: Option<String>,
}

impl DirectoryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: None,
        }
    }

    /// Only read files ending in `.{extension}`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

fn io_error(path: &Path, err: std::io::Error) -> PlaybackError {
    PlaybackError::load(format!("{}: {err}", path.display()))
}

async fn list_files(dir: &Path, extension: Option<&str>) -> Result<Vec<PathBuf>, PlaybackError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| io_error(dir, e))?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(dir, e))? {
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(|e| io_error(&path, e))?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(ext) = extension {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}

impl BlockLoader for DirectoryLoader {
    fn load_blocks(&self) -> BlockStream<'_> {
        let dir = self.dir.clone();
        let extension = self.extension.clone();
        stream::once(async move {
            match list_files(&dir, extension.as_deref()).await {
                Ok(paths) => {
                    log::debug!("directory loader: {} files in {}", paths.len(), dir.display());
                    paths.into_iter().map(Ok).collect::<Vec<_>>()
                }
                Err(err) => vec![Err(err)],
            }
        })
        .flat_map(stream::iter)
        .and_then(|path| async move {
            tokio::fs::read(&path).await.map_err(|e| io_error(&path, e))
        })
        .boxed()
    }
}

/// Writes the stream to a single file, replacing it.
#[derive(Clone, Debug)]
pub struct FileSaver {
    path: PathBuf,
}

impl FileSaver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Saver for FileSaver {
    async fn save(&self, bytes: &[u8]) -> Result<(), PlaybackError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| PlaybackError::save(format!("{}: {e}", parent.display())))?;
            }
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| PlaybackError::save(format!("{}: {e}", self.path.display())))
    }
}

/// Keeps saved streams in memory; handy for tests and in-process round trips.
#[derive(Debug, Default)]
pub struct MemorySaver {
    saved: Mutex<Vec<Vec<u8>>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far, oldest first.
    pub fn saved(&self) -> Vec<Vec<u8>> {
        match self.saved.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Loader replaying everything saved so far.
    pub fn to_loader(&self) -> MemoryLoader {
        MemoryLoader::new(self.saved())
    }
}

#[async_trait]
impl Saver for MemorySaver {
    async fn save(&self, bytes: &[u8]) -> Result<(), PlaybackError> {
        let mut guard = self
            .saved
            .lock()
            .map_err(|_| PlaybackError::save("memory saver lock poisoned"))?;
        guard.push(bytes.to_vec());
        Ok(())
    }
}

/// LZ4 block compression with the decompressed size prepended.
#[cfg(feature = "lz4")]
#[derive(Copy, Clone, Debug, Default)]
pub struct Lz4Compressor;

#[cfg(feature = "lz4")]
#[async_trait]
impl Compressor for Lz4Compressor {
    async fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, PlaybackError> {
        Ok(lz4_flex::compress_prepend_size(bytes))
    }

    async fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>, PlaybackError> {
        lz4_flex::decompress_size_prepended(bytes)
            .map_err(|e| PlaybackError::compression(e.to_string()))
    }
}
