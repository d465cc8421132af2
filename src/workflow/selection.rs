use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

pub(crate) const FALLBACK_MIME: &str = "application/octet-stream";

/// Where the bytes of a selected video live.
#[derive(Clone, Debug, PartialEq)]
pub enum FileSource {
    /// On disk; read when the file is uploaded.
    Path(PathBuf),
    /// Already in memory, e.g. dropped from a sandboxed source.
    Bytes(Arc<[u8]>),
}

/// The video the user picked or dropped. Replaced wholesale by the next selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    file_name: String,
    mime_type: String,
    source: FileSource,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime_type = mime_for_path(&path).to_string();
        Self {
            file_name,
            mime_type,
            source: FileSource::Path(path),
        }
    }

    /// `mime_type` is trusted when it looks like a MIME type, otherwise it is guessed
    /// from the file name.
    pub fn from_bytes(file_name: &str, mime_type: Option<&str>, bytes: Arc<[u8]>) -> Self {
        let mime_type = match mime_type {
            Some(mime) if is_mime_like(mime) => mime.to_string(),
            _ => mime_for_path(Path::new(file_name)).to_string(),
        };
        Self {
            file_name: file_name.to_string(),
            mime_type,
            source: FileSource::Bytes(bytes),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Size in bytes, if it can be determined without reading the file.
    pub fn size_bytes(&self) -> Option<u64> {
        match &self.source {
            FileSource::Path(path) => fs::metadata(path).ok().map(|m| m.len()),
            FileSource::Bytes(bytes) => Some(bytes.len() as u64),
        }
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => fs::read(path),
            FileSource::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }

    pub fn display_path(&self) -> String {
        match &self.source {
            FileSource::Path(path) => path.display().to_string(),
            FileSource::Bytes(_) => self.file_name.clone(),
        }
    }
}

fn is_mime_like(mime: &str) -> bool {
    matches!(mime.split_once('/'), Some((kind, sub)) if !kind.is_empty() && !sub.is_empty())
        && !mime.chars().any(char::is_whitespace)
}

pub(crate) fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("mpeg") | Some("mpg") => "video/mpeg",
        Some("ogv") => "video/ogg",
        _ => FALLBACK_MIME,
    }
}

/// Extensions offered by the file picker.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "webm", "mov", "mkv", "avi", "mpeg", "mpg", "ogv"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_path_selection_uses_file_name_and_extension() {
        let file = SelectedFile::from_path("/videos/clip.MP4");
        assert_eq!(file.file_name(), "clip.MP4");
        assert_eq!(file.mime_type(), "video/mp4");
        assert_eq!(file.display_path(), "/videos/clip.MP4");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(SelectedFile::from_path("notes.txt").mime_type(), FALLBACK_MIME);
        assert_eq!(SelectedFile::from_path("no_extension").mime_type(), FALLBACK_MIME);
    }

    #[test]
    fn test_dropped_mime_is_used_when_valid() {
        let bytes: Arc<[u8]> = Arc::from(vec![1u8, 2, 3]);
        let file = SelectedFile::from_bytes("clip.bin", Some("video/webm"), bytes.clone());
        assert_eq!(file.mime_type(), "video/webm");
        assert_eq!(file.size_bytes(), Some(3));

        let file = SelectedFile::from_bytes("clip.mov", Some(""), bytes.clone());
        assert_eq!(file.mime_type(), "video/quicktime");

        let file = SelectedFile::from_bytes("clip.mov", Some("not a mime"), bytes);
        assert_eq!(file.mime_type(), "video/quicktime");
    }

    #[test]
    fn test_read_bytes_from_disk() {
        let mut video = NamedTempFile::new().unwrap();
        video.write_all(b"fake video payload").unwrap();
        video.flush().unwrap();

        let file = SelectedFile::from_path(video.path());
        assert_eq!(file.read_bytes().unwrap(), b"fake video payload");
        assert_eq!(file.size_bytes(), Some(18));
    }

    #[test]
    fn test_missing_file_reports_read_error() {
        let file = SelectedFile::from_path("/definitely/not/here.mp4");
        assert!(file.read_bytes().is_err());
        assert_eq!(file.size_bytes(), None);
    }
}
