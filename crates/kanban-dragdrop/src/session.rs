//! Per-gesture drag state machine.

/// State of the single active drag gesture.
///
/// `C` is the column key (e.g. a status value).
#[derive(Clone, Debug, PartialEq)]
pub enum DragSession<C> {
    Idle,
    Dragging {
        item: String,
        source: C,
        /// Column currently under the pointer, if any
        over: Option<C>,
    },
}

impl<C> Default for DragSession<C> {
    fn default() -> Self {
        DragSession::Idle
    }
}

/// Result of ending a gesture over a column.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome<C> {
    /// Dropped back into the column it came from
    SameColumn { item: String, column: C },
    /// Dropped into a different column
    Moved { item: String, from: C, to: C },
    /// No drag was in progress
    Ignored,
}

impl<C> DropOutcome<C> {
    pub fn item(&self) -> Option<&str> {
        match self {
            DropOutcome::SameColumn { item, .. } | DropOutcome::Moved { item, .. } => Some(item),
            DropOutcome::Ignored => None,
        }
    }

    /// Column the card ends up in.
    pub fn target(&self) -> Option<&C> {
        match self {
            DropOutcome::SameColumn { column, .. } => Some(column),
            DropOutcome::Moved { to, .. } => Some(to),
            DropOutcome::Ignored => None,
        }
    }
}

impl<C: Clone + PartialEq> DragSession<C> {
    /// Start dragging `item` out of `source`. The browser allows a single
    /// active drag, so any stale session is replaced.
    pub fn begin(&mut self, item: String, source: C) {
        *self = DragSession::Dragging {
            item,
            source,
            over: None,
        };
    }

    /// Record the column under the pointer.
    pub fn hover(&mut self, column: C) {
        if let DragSession::Dragging { over, .. } = self {
            *over = Some(column);
        }
    }

    pub fn leave(&mut self, column: &C) {
        if let DragSession::Dragging { over, .. } = self {
            if over.as_ref() == Some(column) {
                *over = None;
            }
        }
    }

    /// End the gesture over `column`.
    pub fn drop_on(&mut self, column: C) -> DropOutcome<C> {
        match std::mem::take(self) {
            DragSession::Idle => DropOutcome::Ignored,
            DragSession::Dragging { item, source, .. } => {
                if source == column {
                    DropOutcome::SameColumn { item, column }
                } else {
                    DropOutcome::Moved {
                        item,
                        from: source,
                        to: column,
                    }
                }
            }
        }
    }

    /// Browser-native cancel (Esc, or released outside any column).
    pub fn cancel(&mut self) {
        *self = DragSession::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    pub fn item(&self) -> Option<&str> {
        match self {
            DragSession::Dragging { item, .. } => Some(item),
            DragSession::Idle => None,
        }
    }

    pub fn over(&self) -> Option<&C> {
        match self {
            DragSession::Dragging { over, .. } => over.as_ref(),
            DragSession::Idle => None,
        }
    }
}
