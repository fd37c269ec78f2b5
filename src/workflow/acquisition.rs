use std::sync::Arc;

use crate::models::SelectedFile;

/// Extensions suggested to the file picker; never enforced
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".txt", ".json", ".csv"];

/// Whether a file name carries one of the suggested extensions
pub fn matches_accept_hint(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// The upload region: holds at most one file and tracks drag hover
#[derive(Debug, Default)]
pub struct FileAcquisition {
    current: Option<Arc<SelectedFile>>,
    dragging: bool,
}

impl FileAcquisition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_file(&self) -> Option<&Arc<SelectedFile>> {
        self.current.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn on_drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Captures the first dropped file. Returns true when the selection changed.
    pub fn on_drop(&mut self, files: Vec<SelectedFile>) -> bool {
        self.dragging = false;
        self.capture(files, "drop")
    }

    /// Captures the first picked file. Returns true when the selection changed.
    pub fn on_pick(&mut self, files: Vec<SelectedFile>) -> bool {
        self.capture(files, "pick")
    }

    fn capture(&mut self, files: Vec<SelectedFile>, source: &'static str) -> bool {
        let ignored = files.len().saturating_sub(1);
        let Some(file) = files.into_iter().next() else {
            return false;
        };

        if ignored > 0 {
            tracing::debug!(ignored, source, "Extra files ignored, keeping the first");
        }
        if !matches_accept_hint(&file.name) {
            tracing::debug!(file = %file.name, "File has no suggested extension, accepting anyway");
        }

        tracing::info!(file = %file.name, bytes = file.len(), source, "File selected");
        self.current = Some(Arc::new(file));
        true
    }
}
