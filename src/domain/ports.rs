use crate::utils::error::Result;

/// Persisted storage slots. Callers always address a slot explicitly; there
/// is no implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// In-progress questionnaire snapshot, overwritten on every change.
    Session,
    /// Append-only log of completed advice records.
    History,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Session => "session",
            Slot::History => "history",
        }
    }
}

pub trait StateStore {
    /// Returns `None` when the slot has never been written.
    fn load(&self, slot: Slot) -> Result<Option<Vec<u8>>>;

    fn save(&self, slot: Slot, data: &[u8]) -> Result<()>;
}

impl<T: StateStore + ?Sized> StateStore for &T {
    fn load(&self, slot: Slot) -> Result<Option<Vec<u8>>> {
        (**self).load(slot)
    }

    fn save(&self, slot: Slot, data: &[u8]) -> Result<()> {
        (**self).save(slot, data)
    }
}
