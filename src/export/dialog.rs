use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{EmojiError, EmojiResult};

/// What the save prompt shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRequest {
    /// Prompt title.
    pub title: String,
    /// Suggested file name, e.g. `emoji.png`.
    pub default_file_name: String,
}

/// Collaborator presenting a save prompt. `None` means the user cancelled.
pub trait SaveDialog {
    /// Ask for a destination path.
    fn prompt(&mut self, request: &SaveRequest) -> Option<PathBuf>;
}

/// Collaborator persisting export bytes.
pub trait FileWriter {
    /// Write `bytes` to `path`, replacing any existing file.
    fn write(&mut self, path: &Path, bytes: &[u8]) -> EmojiResult<()>;
}

/// Dialog with a predetermined answer.
#[derive(Clone, Debug, Default)]
pub struct FixedDialog {
    answer: Option<PathBuf>,
}

impl FixedDialog {
    /// Always answer `path`.
    pub fn answering(path: impl Into<PathBuf>) -> Self {
        Self {
            answer: Some(path.into()),
        }
    }

    /// Always cancel.
    pub fn cancelling() -> Self {
        Self { answer: None }
    }
}

impl SaveDialog for FixedDialog {
    fn prompt(&mut self, _request: &SaveRequest) -> Option<PathBuf> {
        self.answer.clone()
    }
}

/// Line-based prompt: writes the title and suggestion to `out`, reads one line from `input`.
///
/// An empty line accepts the suggested name; a line of `-` (or end of input) cancels.
pub struct LinePromptDialog<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePromptDialog<R, W> {
    /// Create a prompt over the given streams.
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }
}

impl<R: BufRead, W: Write> SaveDialog for LinePromptDialog<R, W> {
    fn prompt(&mut self, request: &SaveRequest) -> Option<PathBuf> {
        let shown = write!(
            self.out,
            "{} [{}] ('-' cancels): ",
            request.title, request.default_file_name
        )
        .and_then(|()| self.out.flush());
        if let Err(e) = shown {
            tracing::debug!(error = %e, "failed to write save prompt");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "failed to read save prompt answer");
                return None;
            }
            Ok(_) => {}
        }
        match line.trim() {
            "-" => None,
            "" => Some(PathBuf::from(&request.default_file_name)),
            path => Some(PathBuf::from(path)),
        }
    }
}

/// Writes to the local filesystem, creating missing parent directories.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsWriter;

impl FileWriter for FsWriter {
    fn write(&mut self, path: &Path, bytes: &[u8]) -> EmojiResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, bytes)
            .with_context(|| format!("write '{}'", path.display()))
            .map_err(EmojiError::from)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/dialog.rs"]
mod tests;
