//! State machine types for the create/edit modal and table sorting.
//!
//! The modal has exactly two states: `Closed`, and `Open` with a mode and a
//! draft. It opens on a create or edit request and closes on submit-complete
//! or explicit cancel. There is no intermediate "submitting" state; the
//! form stays editable while the network attempt is in flight.

/// What an open modal is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Drafting a new record.
    Create,
    /// Editing the record with this identifier.
    Edit(u64),
}

/// The create/edit modal state, parameterized over the draft (patch) type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState<P> {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        draft: P,
    },
}

impl<P> ModalState<P> {
    /// True when the modal is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Direction of an active column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}
