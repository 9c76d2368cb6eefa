//! Duplication seam between stored fee entries and the allocator.

use super::fees_errors::FeeError;
use super::fees_model::FeeEntry;

/// Something the allocator can take an independent copy of.
///
/// The copy must share no mutable state with `self`. Duplication is fallible
/// so that a host can refuse to copy a malformed or unsupported entry; the
/// allocator skips such entries instead of aborting the whole load.
pub trait FeeEntrySource {
    fn duplicate(&self) -> Result<FeeEntry, FeeError>;

    /// Read-only view of the stored entry, if the host can give one without
    /// copying. A single self-referential entry seen here collapses into a
    /// simple fee without ever being duplicated.
    fn as_entry(&self) -> Option<&FeeEntry> {
        None
    }
}

impl FeeEntrySource for FeeEntry {
    fn duplicate(&self) -> Result<FeeEntry, FeeError> {
        self.validate()?;
        Ok(self.clone())
    }

    fn as_entry(&self) -> Option<&FeeEntry> {
        Some(self)
    }
}

impl<T: FeeEntrySource + ?Sized> FeeEntrySource for &T {
    fn duplicate(&self) -> Result<FeeEntry, FeeError> {
        (**self).duplicate()
    }

    fn as_entry(&self) -> Option<&FeeEntry> {
        (**self).as_entry()
    }
}
