// src/split/storage.rs
use crate::error::{SegyError, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// Minimal storage capability the planner and readers depend on.
pub trait Storage: Send + Sync {
    type Reader: Read + Seek + Send;

    /// Open a seekable byte stream positioned at the start of `path`
    fn open_for_read(&self, path: &Path) -> Result<Self::Reader>;

    /// Length of `path` in bytes
    fn length(&self, path: &Path) -> Result<u64>;

    /// Hosts holding the bytes at `[offset, offset + length)`. Advisory only.
    fn block_locations(&self, path: &Path, offset: u64, length: u64) -> Result<Vec<String>>;

    /// `path` itself when it names a file, otherwise the files directly
    /// under it, sorted by name.
    fn list(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Local filesystem access through buffered `std::fs::File` handles.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    buffer_capacity: usize,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::with_buffer_capacity(65536)
    }

    pub fn with_buffer_capacity(buffer_capacity: usize) -> Self {
        LocalStorage { buffer_capacity }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LocalStorage {
    type Reader = BufReader<File>;

    fn open_for_read(&self, path: &Path) -> Result<Self::Reader> {
        let file = File::open(path)?;
        Ok(BufReader::with_capacity(self.buffer_capacity, file))
    }

    fn length(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn block_locations(&self, _path: &Path, _offset: u64, _length: u64) -> Result<Vec<String>> {
        Ok(vec!["localhost".to_string()])
    }

    fn list(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.is_dir() {
            if !path.exists() {
                return Err(SegyError::InvalidInput(format!("{} does not exist", path.display())));
            }
            return Ok(vec![path.to_path_buf()]);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Memory-mapped local files (requires "mmap" feature)
#[cfg(feature = "mmap")]
#[derive(Debug, Clone, Default)]
pub struct MmapStorage {
    local: LocalStorage,
}

#[cfg(feature = "mmap")]
impl MmapStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "mmap")]
impl Storage for MmapStorage {
    type Reader = Cursor<Mmap>;

    fn open_for_read(&self, path: &Path) -> Result<Self::Reader> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Cursor::new(mmap))
    }

    fn length(&self, path: &Path) -> Result<u64> {
        self.local.length(path)
    }

    fn block_locations(&self, path: &Path, offset: u64, length: u64) -> Result<Vec<String>> {
        self.local.block_locations(path, offset, length)
    }

    fn list(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.local.list(path)
    }
}

/// In-memory files with a simulated block layout.
///
/// Block `n` (of `block_size` bytes) lives on `hosts[n % hosts.len()]`.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    files: BTreeMap<PathBuf, Bytes>,
    block_size: u64,
    hosts: Vec<String>,
}

impl MemoryStorage {
    pub const DEFAULT_BLOCK_SIZE: u64 = 128 * 1024 * 1024;

    pub fn new() -> Self {
        MemoryStorage {
            files: BTreeMap::new(),
            block_size: Self::DEFAULT_BLOCK_SIZE,
            hosts: Vec::new(),
        }
    }

    pub fn with_blocks(block_size: u64, hosts: Vec<String>) -> Self {
        MemoryStorage {
            files: BTreeMap::new(),
            block_size: block_size.max(1),
            hosts,
        }
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, data: impl Into<Bytes>) {
        self.files.insert(path.into(), data.into());
    }

    fn get(&self, path: &Path) -> Result<&Bytes> {
        self.files.get(path).ok_or_else(|| {
            SegyError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    type Reader = Cursor<Bytes>;

    fn open_for_read(&self, path: &Path) -> Result<Self::Reader> {
        // Bytes clones share the underlying buffer
        Ok(Cursor::new(self.get(path)?.clone()))
    }

    fn length(&self, path: &Path) -> Result<u64> {
        Ok(self.get(path)?.len() as u64)
    }

    fn block_locations(&self, path: &Path, offset: u64, _length: u64) -> Result<Vec<String>> {
        self.get(path)?;
        if self.hosts.is_empty() {
            return Ok(Vec::new());
        }
        let block = (offset / self.block_size) as usize;
        Ok(vec![self.hosts[block % self.hosts.len()].clone()])
    }

    fn list(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if self.files.contains_key(path) {
            return Ok(vec![path.to_path_buf()]);
        }
        let files: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        if files.is_empty() {
            return Err(SegyError::InvalidInput(format!("{} does not exist", path.display())));
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::SeekFrom;

    #[test]
    fn test_memory_storage_read_and_length() {
        let mut storage = MemoryStorage::new();
        storage.insert("/data/a.sgy", vec![1u8, 2, 3, 4]);

        assert_eq!(storage.length(Path::new("/data/a.sgy")).unwrap(), 4);

        let mut reader = storage.open_for_read(Path::new("/data/a.sgy")).unwrap();
        reader.seek(SeekFrom::Start(2)).unwrap();
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [3, 4]);
    }

    #[test]
    fn test_memory_storage_missing_file() {
        let storage = MemoryStorage::new();
        let err = storage.length(Path::new("/nope.sgy")).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_memory_storage_block_hosts() {
        let mut storage = MemoryStorage::with_blocks(1000, vec!["h0".into(), "h1".into()]);
        storage.insert("/f.sgy", vec![0u8; 5000]);

        let path = Path::new("/f.sgy");
        assert_eq!(storage.block_locations(path, 0, 10).unwrap(), vec!["h0"]);
        assert_eq!(storage.block_locations(path, 1500, 10).unwrap(), vec!["h1"]);
        assert_eq!(storage.block_locations(path, 2000, 10).unwrap(), vec!["h0"]);
    }

    #[test]
    fn test_memory_storage_list() {
        let mut storage = MemoryStorage::new();
        storage.insert("/in/b.sgy", vec![0u8]);
        storage.insert("/in/a.sgy", vec![0u8]);
        storage.insert("/other/c.sgy", vec![0u8]);

        assert_eq!(
            storage.list(Path::new("/in")).unwrap(),
            vec![PathBuf::from("/in/a.sgy"), PathBuf::from("/in/b.sgy")]
        );
        assert_eq!(storage.list(Path::new("/other/c.sgy")).unwrap().len(), 1);
        assert!(storage.list(Path::new("/missing")).is_err());
    }

    #[test]
    fn test_local_storage_list_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.sgy"), b"z").unwrap();
        fs::write(dir.path().join("a.sgy"), b"aa").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let storage = LocalStorage::new();
        let files = storage.list(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.sgy"), dir.path().join("z.sgy")]);
        assert_eq!(storage.length(&files[0]).unwrap(), 2);
        assert_eq!(storage.block_locations(&files[0], 0, 2).unwrap(), vec!["localhost"]);
    }
}
