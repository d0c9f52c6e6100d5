//! Idempotent output primitives (check + apply pattern).
//!
//! Generated documents and the design note are both files whose desired
//! content is known up front. `--check` only asks for their state; a normal
//! run applies them.
pub mod design_note;
pub mod document;
pub mod helpers;

use anyhow::Result;

/// Minimal interface for outputs that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Bring the resource to its desired state.
    ///
    /// Creates parent directories as needed and leaves an already correct
    /// resource untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be read or written.
    fn apply(&self) -> Result<ResourceChange>;
}

/// State of an output file relative to its desired content.
///
/// # Examples
///
/// ```
/// use hsi_docs::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let stale = ResourceState::Incorrect { current: "old text".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(stale, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// The file does not exist.
    Missing,
    /// The file exists with exactly the desired content.
    Correct,
    /// The file exists but its content differs.
    Incorrect {
        /// Content currently on disk.
        current: String,
    },
}

/// Result of applying a resource.
///
/// # Examples
///
/// ```
/// use hsi_docs::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let skipped = ResourceChange::Skipped { reason: "design note not found".into() };
///
/// assert_ne!(applied, ResourceChange::AlreadyCorrect);
/// assert_ne!(applied, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The file was created or rewritten.
    Applied,
    /// The file already had the desired content.
    AlreadyCorrect,
    /// Nothing was done.
    Skipped {
        /// Why the resource was left alone.
        reason: String,
    },
}

/// Resources that can report their state without changing anything.
pub trait Resource: Applicable {
    /// Compare the file on disk with the desired content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn current_state(&self) -> Result<ResourceState>;

    /// Whether [`Applicable::apply`] would write anything.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}
