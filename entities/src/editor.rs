use crate::forms::RecordForm;

/// Request-local state of an admin editing screen
///
/// Holds the in-progress form, the id of the record being edited (if any)
/// and whether the add/edit form is shown. The admin service reads it to
/// decide between insert and update, then resets it.
#[derive(Debug, Clone, Default)]
pub struct EditorState<F> {
    pub form: F,
    editing_id: Option<String>,
    show_form: bool,
}

impl<F: RecordForm> EditorState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the add form with a pre-filled draft
    pub fn with_draft(form: F) -> Self {
        Self {
            form,
            editing_id: None,
            show_form: true,
        }
    }

    /// Open an empty add form
    pub fn begin_add(&mut self) {
        *self = Self::with_draft(F::default());
    }

    /// Open the edit form for a stored record
    pub fn begin_edit(&mut self, id: impl Into<String>, record: &F::Record) {
        self.form = F::from_record(record);
        self.editing_id = Some(id.into());
        self.show_form = true;
    }

    /// Close the form and discard the draft
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Check if the add/edit form is visible
    pub fn is_open(&self) -> bool {
        self.show_form || self.editing_id.is_some()
    }
}
