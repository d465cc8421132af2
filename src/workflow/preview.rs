use log::debug;

use super::selection::{FileSource, SelectedFile};

/// A local URI standing in for the selected video while it is previewed.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewHandle {
    pub uri: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: Option<u64>,
}

/// Whatever renders previews. URIs handed to `acquire` stay valid until the
/// matching `release`.
pub trait PreviewSink {
    fn acquire(&mut self, uri: &str, file: &SelectedFile);
    fn release(&mut self, uri: &str);
}

/// Sink for runs without a window.
pub struct NoPreview;

impl PreviewSink for NoPreview {
    fn acquire(&mut self, _uri: &str, _file: &SelectedFile) {}
    fn release(&mut self, _uri: &str) {}
}

/// Holds at most one preview; showing a new one releases the old one first.
pub(crate) struct PreviewSlot {
    sink: Box<dyn PreviewSink>,
    current: Option<PreviewHandle>,
    generation: u64,
}

impl PreviewSlot {
    pub(crate) fn new(sink: Box<dyn PreviewSink>) -> Self {
        Self {
            sink,
            current: None,
            generation: 0,
        }
    }

    pub(crate) fn show(&mut self, file: &SelectedFile) {
        self.release_current();
        self.generation += 1;
        let uri = match file.source() {
            FileSource::Path(path) => format!("file://{}", path.display()),
            FileSource::Bytes(_) => {
                format!("bytes://preview/{}/{}", self.generation, file.file_name())
            }
        };
        self.sink.acquire(&uri, file);
        debug!("Showing preview {}", uri);
        self.current = Some(PreviewHandle {
            uri,
            file_name: file.file_name().to_string(),
            mime_type: file.mime_type().to_string(),
            size_bytes: file.size_bytes(),
        });
    }

    pub(crate) fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    fn release_current(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!("Releasing preview {}", previous.uri);
            self.sink.release(&previous.uri);
        }
    }
}

impl Drop for PreviewSlot {
    fn drop(&mut self) {
        self.release_current();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc, sync::Arc};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum SinkCall {
        Acquire(String),
        Release(String),
    }

    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        pub(crate) calls: Rc<RefCell<Vec<SinkCall>>>,
    }

    impl PreviewSink for RecordingSink {
        fn acquire(&mut self, uri: &str, _file: &SelectedFile) {
            self.calls.borrow_mut().push(SinkCall::Acquire(uri.to_string()));
        }

        fn release(&mut self, uri: &str) {
            self.calls.borrow_mut().push(SinkCall::Release(uri.to_string()));
        }
    }

    fn dropped(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, Some("video/mp4"), Arc::from(vec![0u8; 4]))
    }

    #[test]
    fn test_new_preview_releases_previous() {
        let sink = RecordingSink::default();
        let calls = sink.calls.clone();
        let mut slot = PreviewSlot::new(Box::new(sink));

        slot.show(&dropped("first.mp4"));
        slot.show(&dropped("second.mp4"));

        assert_eq!(
            *calls.borrow(),
            vec![
                SinkCall::Acquire("bytes://preview/1/first.mp4".to_string()),
                SinkCall::Release("bytes://preview/1/first.mp4".to_string()),
                SinkCall::Acquire("bytes://preview/2/second.mp4".to_string()),
            ]
        );
        assert_eq!(slot.current().unwrap().file_name, "second.mp4");
    }

    #[test]
    fn test_reselecting_same_blob_gets_fresh_uri() {
        let mut slot = PreviewSlot::new(Box::new(NoPreview));
        slot.show(&dropped("clip.mp4"));
        let first = slot.current().unwrap().uri.clone();
        slot.show(&dropped("clip.mp4"));
        assert_ne!(slot.current().unwrap().uri, first);
    }

    #[test]
    fn test_path_preview_uses_file_uri() {
        let mut slot = PreviewSlot::new(Box::new(NoPreview));
        slot.show(&SelectedFile::from_path("/videos/clip.webm"));
        let handle = slot.current().unwrap();
        assert_eq!(handle.uri, "file:///videos/clip.webm");
        assert_eq!(handle.mime_type, "video/webm");
    }

    #[test]
    fn test_drop_releases_current_preview() {
        let sink = RecordingSink::default();
        let calls = sink.calls.clone();
        {
            let mut slot = PreviewSlot::new(Box::new(sink));
            slot.show(&dropped("clip.mp4"));
        }
        assert_eq!(
            calls.borrow().last(),
            Some(&SinkCall::Release("bytes://preview/1/clip.mp4".to_string()))
        );
    }
}
