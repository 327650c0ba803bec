use std::sync::Arc;

use tracing::debug;

use crate::data::CountryRecord;
use crate::render::LeafClickListener;

/// The country shown in the details panel.
///
/// Closing the panel keeps the last selection around; only a new click
/// replaces it.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    selected: Option<Arc<CountryRecord>>,
    panel_open: bool,
}

impl SelectionState {
    pub fn select(&mut self, country: Arc<CountryRecord>) {
        debug!(country = %country.name, "selected country");
        self.selected = Some(country);
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Selection as the panel should show it; `None` once closed.
    pub fn current(&self) -> Option<&Arc<CountryRecord>> {
        self.selected.as_ref().filter(|_| self.panel_open)
    }

    pub fn last_selected(&self) -> Option<&Arc<CountryRecord>> {
        self.selected.as_ref()
    }

    /// Identity check on the record itself, so a namesake never lights up.
    pub fn is_selected(&self, country: &Arc<CountryRecord>) -> bool {
        self.current()
            .is_some_and(|selected| Arc::ptr_eq(selected, country))
    }
}

impl LeafClickListener for SelectionState {
    fn on_leaf_clicked(&mut self, country: &Arc<CountryRecord>) {
        self.select(Arc::clone(country));
    }
}
