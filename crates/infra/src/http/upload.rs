//! File sources for multipart uploads
//!
//! Files on disk are streamed through a [`ProgressReader`] so they never
//! need to fit in memory.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::blocking::multipart::Part;
use tracing::{debug, info};
use vectara_domain::{Result, VectaraError};

use crate::errors::conversions::io_error;

/// Called with `(bytes_sent, total_bytes)` as an upload progresses
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Emit a progress event at most once per this many bytes
const PROGRESS_STEP_BYTES: u64 = 1024 * 1024;

/// Content of the `file` field of an upload
#[derive(Clone)]
pub enum FileSource {
    /// Streamed from disk
    Path { path: PathBuf, progress: Option<ProgressCallback> },
    /// Already in memory
    Bytes { file_name: String, contents: Vec<u8> },
}

impl FileSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path { path: path.into(), progress: None }
    }

    pub fn bytes(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self::Bytes { file_name: file_name.into(), contents: contents.into() }
    }

    /// Attach a progress callback; ignored for in-memory sources
    #[must_use]
    pub fn with_progress(self, callback: ProgressCallback) -> Self {
        match self {
            Self::Path { path, .. } => Self::Path { path, progress: Some(callback) },
            bytes @ Self::Bytes { .. } => bytes,
        }
    }

    /// File name sent in the multipart header
    pub fn file_name(&self) -> String {
        match self {
            Self::Path { path, .. } => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned()),
            Self::Bytes { file_name, .. } => file_name.clone(),
        }
    }

    /// MIME type guessed from the file extension
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(self.file_name()).first_or_octet_stream().essence_str().to_string()
    }

    /// Build the multipart part for this source.
    ///
    /// Path sources are opened here and read lazily while the request body
    /// is written.
    pub fn into_part(self) -> Result<Part> {
        let file_name = self.file_name();
        let mime = self.mime_type();

        let part = match self {
            Self::Path { path, progress } => {
                let file = File::open(&path).map_err(|err| io_error(&path, &err))?;
                let total = file.metadata().map_err(|err| io_error(&path, &err))?.len();
                info!(file = %file_name, total_bytes = total, mime = %mime, "Streaming upload");

                let reader = ProgressReader::new(file, &file_name, total, progress);
                Part::reader_with_length(reader, total)
            }
            Self::Bytes { contents, .. } => {
                debug!(file = %file_name, total_bytes = contents.len(), "Uploading in-memory contents");
                Part::bytes(contents)
            }
        };

        part.file_name(file_name).mime_str(&mime).map_err(|err| {
            VectaraError::InvalidArgument(format!("invalid MIME type {mime}: {err}"))
        })
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path { path, progress } => f
                .debug_struct("Path")
                .field("path", path)
                .field("progress", &progress.is_some())
                .finish(),
            Self::Bytes { file_name, contents } => f
                .debug_struct("Bytes")
                .field("file_name", file_name)
                .field("len", &contents.len())
                .finish(),
        }
    }
}

/// Reader that reports how many bytes have passed through it
pub struct ProgressReader<R> {
    inner: R,
    file_name: String,
    sent: u64,
    total: u64,
    last_reported: u64,
    callback: Option<ProgressCallback>,
}

impl<R: Read> ProgressReader<R> {
    pub fn new(inner: R, file_name: &str, total: u64, callback: Option<ProgressCallback>) -> Self {
        Self { inner, file_name: file_name.to_string(), sent: 0, total, last_reported: 0, callback }
    }

    pub fn bytes_sent(&self) -> u64 {
        self.sent
    }

    fn report(&mut self) {
        let finished = self.sent >= self.total;
        if !finished && self.sent - self.last_reported < PROGRESS_STEP_BYTES {
            return;
        }
        if finished && self.last_reported == self.sent {
            return;
        }
        self.last_reported = self.sent;

        debug!(file = %self.file_name, sent = self.sent, total = self.total, "Upload progress");
        if let Some(callback) = &self.callback {
            callback(self.sent, self.total);
        }
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        if read > 0 {
            self.sent += read as u64;
            self.report();
        }
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use parking_lot::Mutex;
    use tempfile::NamedTempFile;
    use vectara_domain::ErrorKind;

    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(FileSource::bytes("report.pdf", vec![]).mime_type(), "application/pdf");
        assert_eq!(FileSource::bytes("notes.txt", vec![]).mime_type(), "text/plain");
        assert_eq!(FileSource::bytes("blob", vec![]).mime_type(), "application/octet-stream");
        assert_eq!(FileSource::path("/data/page.html").file_name(), "page.html");
    }

    #[test]
    fn test_progress_reader_reports_completion() {
        let data = vec![7u8; 3000];
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: ProgressCallback = Arc::new(move |sent, total| sink.lock().push((sent, total)));

        let mut reader = ProgressReader::new(data.as_slice(), "x.bin", 3000, Some(callback));
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();

        assert_eq!(out.len(), 3000);
        assert_eq!(reader.bytes_sent(), 3000);
        assert_eq!(seen.lock().last(), Some(&(3000, 3000)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FileSource::path("/definitely/not/here.pdf").into_part().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_path_source_builds_part() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        assert!(FileSource::path(file.path()).into_part().is_ok());
    }
}
