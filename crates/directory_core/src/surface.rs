use std::collections::BTreeMap;

use crate::filter::FilterState;
use crate::options::Dimension;

/// The UI a [`crate::directory::Directory`] talks to.
///
/// Control values are read on demand; option lists and grid markup are
/// pushed back after every sync.
pub trait ControlSurface {
    fn search_term(&self) -> String;
    fn selected(&self, dimension: Dimension) -> Vec<String>;
    fn set_options(&mut self, dimension: Dimension, values: &[String]);
    fn paint(&mut self, markup: &str);
    /// Empty the search box and every selection.
    fn clear_controls(&mut self);

    fn read_filter(&self) -> FilterState {
        Dimension::ALL
            .into_iter()
            .fold(FilterState::new().with_search(&self.search_term()), |state, dimension| {
                state.with_selection(dimension, self.selected(dimension))
            })
    }
}

/// Surface backed by plain values, used by the command line and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSurface {
    pub search: String,
    pub selections: BTreeMap<Dimension, Vec<String>>,
    pub options: BTreeMap<Dimension, Vec<String>>,
    pub markup: String,
}

impl StaticSurface {
    pub fn select(&mut self, dimension: Dimension, values: Vec<String>) {
        self.selections.insert(dimension, values);
    }
}

impl ControlSurface for StaticSurface {
    fn search_term(&self) -> String {
        self.search.clone()
    }

    fn selected(&self, dimension: Dimension) -> Vec<String> {
        self.selections.get(&dimension).cloned().unwrap_or_default()
    }

    fn set_options(&mut self, dimension: Dimension, values: &[String]) {
        self.options.insert(dimension, values.to_vec());
    }

    fn paint(&mut self, markup: &str) {
        self.markup = markup.to_string();
    }

    fn clear_controls(&mut self) {
        self.search.clear();
        self.selections.clear();
    }
}
