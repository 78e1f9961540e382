//! Dataset upload: two file slots that must both be filled before submitting.

use std::fmt;

use api::{ApiError, StatsBackend, UploadFile, UploadReceipt};
use thiserror::Error;
use tracing::{info, warn};

pub const MISSING_FILES: &str = "Please select both files before uploading.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Posts,
    Comments,
}

impl DatasetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Posts => "Posts file",
            Self::Comments => "Comments file",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadSlot {
    #[default]
    Empty,
    Selected(UploadFile),
}

impl UploadSlot {
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Selected(file) => Some(&file.name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("{MISSING_FILES}")]
    MissingFiles,
    #[error("the {0} file is empty")]
    EmptyFile(DatasetKind),
    #[error("Error uploading files. Error details: {0}")]
    Rejected(#[from] ApiError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    posts: UploadSlot,
    comments: UploadSlot,
}

impl UploadForm {
    pub fn slot(&self, kind: DatasetKind) -> &UploadSlot {
        match kind {
            DatasetKind::Posts => &self.posts,
            DatasetKind::Comments => &self.comments,
        }
    }

    fn slot_mut(&mut self, kind: DatasetKind) -> &mut UploadSlot {
        match kind {
            DatasetKind::Posts => &mut self.posts,
            DatasetKind::Comments => &mut self.comments,
        }
    }

    pub fn select(&mut self, kind: DatasetKind, file: UploadFile) {
        *self.slot_mut(kind) = UploadSlot::Selected(file);
    }

    pub fn clear(&mut self, kind: DatasetKind) {
        *self.slot_mut(kind) = UploadSlot::Empty;
    }

    pub fn is_ready(&self) -> bool {
        self.request().is_ok()
    }

    /// Both files, or why the form can't be sent yet.
    pub fn request(&self) -> Result<(UploadFile, UploadFile), UploadError> {
        match (&self.posts, &self.comments) {
            (UploadSlot::Selected(posts), UploadSlot::Selected(comments)) => {
                if posts.bytes.is_empty() {
                    return Err(UploadError::EmptyFile(DatasetKind::Posts));
                }
                if comments.bytes.is_empty() {
                    return Err(UploadError::EmptyFile(DatasetKind::Comments));
                }
                Ok((posts.clone(), comments.clone()))
            }
            _ => Err(UploadError::MissingFiles),
        }
    }
}

pub async fn submit<B: StatsBackend>(
    backend: &B,
    form: &UploadForm,
) -> Result<UploadReceipt, UploadError> {
    let (posts, comments) = form.request()?;
    info!(posts = %posts.name, comments = %comments.name, "uploading dataset");

    let receipt = backend.upload(posts, comments).await.map_err(|err| {
        warn!(error = %err, "upload rejected");
        UploadError::from(err)
    })?;
    info!(
        posts = receipt.posts_count,
        comments = receipt.comments_count,
        "dataset uploaded"
    );
    Ok(receipt)
}

pub fn receipt_message(receipt: &UploadReceipt) -> String {
    format!(
        "Upload successful! Posts: {}, Comments: {}",
        receipt.posts_count, receipt.comments_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, body: &str) -> UploadFile {
        UploadFile {
            name: name.into(),
            bytes: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn both_slots_are_required() {
        let mut form = UploadForm::default();
        assert_eq!(form.request(), Err(UploadError::MissingFiles));

        form.select(DatasetKind::Posts, file("posts.jsonl", "{}"));
        assert!(!form.is_ready());

        form.select(DatasetKind::Comments, file("comments.jsonl", "{}"));
        assert!(form.is_ready());
        assert_eq!(form.slot(DatasetKind::Comments).file_name(), Some("comments.jsonl"));

        form.clear(DatasetKind::Posts);
        assert_eq!(form.slot(DatasetKind::Posts), &UploadSlot::Empty);
        assert_eq!(
            UploadError::MissingFiles.to_string(),
            "Please select both files before uploading."
        );
    }

    #[test]
    fn empty_file_is_rejected_before_sending() {
        let mut form = UploadForm::default();
        form.select(DatasetKind::Posts, file("posts.jsonl", ""));
        form.select(DatasetKind::Comments, file("comments.jsonl", "{}"));
        assert_eq!(
            form.request(),
            Err(UploadError::EmptyFile(DatasetKind::Posts))
        );
    }

    #[test]
    fn receipt_message_reports_both_counts() {
        let receipt = UploadReceipt {
            posts_count: 120,
            comments_count: 3_400,
        };
        assert_eq!(
            receipt_message(&receipt),
            "Upload successful! Posts: 120, Comments: 3400"
        );
    }
}
