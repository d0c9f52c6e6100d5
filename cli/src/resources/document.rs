//! A generated snapshot document as an output resource.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::helpers::fs::{read_bytes_optional, write_file};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A generated document that should exist with exactly `content`.
#[derive(Debug, Clone)]
pub struct DocumentResource {
    /// Destination path.
    pub path: PathBuf,
    /// Desired file content.
    pub content: String,
}

impl DocumentResource {
    /// Create a new document resource.
    #[must_use]
    pub const fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Applicable for DocumentResource {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.current_state()? == ResourceState::Correct {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        write_file(&self.path, &self.content)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DocumentResource {
    fn current_state(&self) -> Result<ResourceState> {
        Ok(match read_bytes_optional(&self.path)? {
            None => ResourceState::Missing,
            Some(current) if current == self.content.as_bytes() => ResourceState::Correct,
            Some(current) => ResourceState::Incorrect {
                current: String::from_utf8_lossy(&current).into_owned(),
            },
        })
    }
}
