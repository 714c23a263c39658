//! Byte Source (C1): a bounded, random-access view of a file's head and
//! trailer.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Worst-case bytes read from the front of the file, bounding memory
/// regardless of embedded art.
const HEAD_CAP: usize = 5 * 1024 * 1024;

const TRAILER_LEN: usize = 128;

pub(crate) struct ByteSource {
    head: Vec<u8>,
    trailer: Option<[u8; TRAILER_LEN]>,
    total_size: u64,
}

impl ByteSource {
    /// Opens `path`, reading at most [`HEAD_CAP`] bytes from the front and
    /// the trailing 128 bytes (if the file is at least that long).
    ///
    /// Fails with an I/O error if the file cannot be opened or is empty.
    pub(crate) fn open(path: &Path) -> io::Result<Self> {
        let mut file = open_without_touching_atime(path)?;
        let total_len = file.metadata()?.len();

        if total_len == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "file is empty"));
        }

        let head_len = usize::try_from(total_len.min(HEAD_CAP as u64)).unwrap_or(HEAD_CAP);
        let mut head = vec![0u8; head_len];
        file.read_exact(&mut head)?;

        let trailer = if total_len >= TRAILER_LEN as u64 {
            let mut buf = [0u8; TRAILER_LEN];
            file.seek(SeekFrom::End(-(TRAILER_LEN as i64)))?;
            file.read_exact(&mut buf)?;
            Some(buf)
        } else {
            None
        };

        Ok(Self {
            head,
            trailer,
            total_size: total_len,
        })
    }

    pub(crate) fn head(&self) -> &[u8] {
        &self.head
    }

    pub(crate) fn trailer128(&self) -> Option<&[u8; TRAILER_LEN]> {
        self.trailer.as_ref()
    }

    pub(crate) fn total_size(&self) -> u64 {
        self.total_size
    }
}

#[cfg(unix)]
fn open_without_touching_atime(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    use std::fs::OpenOptions;

    match OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NOATIME)
        .open(path)
    {
        Ok(file) => Ok(file),
        // O_NOATIME requires the opening user to own the file (or CAP_FOWNER);
        // fall back to a normal open rather than failing the extraction.
        Err(_) => File::open(path),
    }
}

#[cfg(not(unix))]
fn open_without_touching_atime(path: &Path) -> io::Result<File> {
    File::open(path)
}
