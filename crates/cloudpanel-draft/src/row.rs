//! Collapsible list row

/// Where a click on a row originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    /// Selection checkbox; never toggles expansion
    Checkbox,
    /// Body of a collapsed row
    Row,
    /// Header bar of an expanded detail
    CloseBar,
    /// Input or button inside the detail
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClick {
    pub origin: ClickOrigin,
    pub shift: bool,
}

impl RowClick {
    pub fn new(origin: ClickOrigin) -> Self {
        Self {
            origin,
            shift: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Outcome of a click, forwarded to the owning list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    Opened,
    Closed,
    /// Selection request; range selection is handled by the list
    Select { shift: bool },
    Ignored,
}

/// List row that owns its detail view while expanded
///
/// `D` is whatever backs the detail editor, typically a
/// [`DraftEntity`](crate::DraftEntity) or a commit controller. It is built
/// when the row opens and dropped when it closes, taking any unsaved draft
/// with it.
#[derive(Debug)]
pub struct SelectionRow<D> {
    detail: Option<D>,
}

impl<D> Default for SelectionRow<D> {
    fn default() -> Self {
        Self { detail: None }
    }
}

impl<D> SelectionRow<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.detail.is_some()
    }

    pub fn detail(&self) -> Option<&D> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut D> {
        self.detail.as_mut()
    }

    /// Handle a click, building the detail with `open` when the row expands
    pub fn click(&mut self, click: RowClick, open: impl FnOnce() -> D) -> RowEvent {
        match (click.origin, self.detail.is_some()) {
            (ClickOrigin::Checkbox, _) => RowEvent::Select { shift: click.shift },
            (ClickOrigin::Row, false) => {
                self.detail = Some(open());
                RowEvent::Opened
            }
            (ClickOrigin::CloseBar, true) => {
                self.detail = None;
                RowEvent::Closed
            }
            _ => RowEvent::Ignored,
        }
    }

    /// Collapse the row programmatically, e.g. after the resource is removed
    pub fn close(&mut self) -> Option<D> {
        self.detail.take()
    }
}
