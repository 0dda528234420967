use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Seekable container input, either a file or stdin buffered in memory.
///
/// Track extraction seeks around the container, so a pipe is read to the end
/// up front.
#[derive(Debug)]
pub enum InputReader {
    File(BufReader<File>),
    Memory(Cursor<Vec<u8>>),
}

impl InputReader {
    /// Opens a container path.
    /// Use "-" for stdin pipe input
    pub fn new<P: AsRef<Path>>(input_path: P) -> Result<Self> {
        let path = input_path.as_ref();

        if path.to_string_lossy() == "-" {
            let mut data = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut data)
                .context("could not read stdin")?;
            log::debug!("Buffered {} bytes from stdin", data.len());
            return Ok(Self::Memory(Cursor::new(data)));
        }

        let metadata = fs::metadata(path)
            .with_context(|| format!("could not stat file {:?}", path.display().to_string()))?;

        if metadata.is_dir() {
            bail!("file {:?} is a directory", path.display().to_string());
        }

        let file = File::open(path).context("could not open file")?;
        Ok(Self::File(BufReader::new(file)))
    }

    pub fn is_pipe(&self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

impl Read for InputReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(r) => r.read(buf),
            Self::Memory(r) => r.read(buf),
        }
    }
}

impl Seek for InputReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(r) => r.seek(pos),
            Self::Memory(r) => r.seek(pos),
        }
    }
}
