use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::LoadError;
use crate::filter::FilterState;
use crate::loader::{Loader, Source};
use crate::options::{Dimension, FilterOptionSet};
use crate::render::{render_grid, RenderModel, RenderSettings};
use crate::schema::ActivityRecord;
use crate::surface::ControlSurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: String,
    pub count: usize,
    pub loaded_at: String,
}

/// Page controller: owns the working set and everything derived from it.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    records: Vec<ActivityRecord>,
    options: FilterOptionSet,
    filter: FilterState,
    settings: RenderSettings,
    loader: Loader,
    last_load: Option<LoadReport>,
}

impl Directory {
    pub fn new(loader: Loader, settings: RenderSettings) -> Self {
        Self {
            loader,
            settings,
            ..Self::default()
        }
    }

    /// Fetch `source` and swap in its records. A failure is logged and the
    /// current working set stays in place.
    pub fn load(&mut self, source: &Source) -> Result<LoadReport, LoadError> {
        let records = match self.loader.load(source) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(source = %source, error = %err, "could not load activities");
                return Err(err);
            }
        };
        self.replace_records(records);

        let report = LoadReport {
            source: source.to_string(),
            count: self.records.len(),
            loaded_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
        };
        tracing::info!(source = %source, count = report.count, "loaded activities");
        self.last_load = Some(report.clone());
        Ok(report)
    }

    pub fn replace_records(&mut self, records: Vec<ActivityRecord>) {
        self.records = records;
        self.options = FilterOptionSet::derive(&self.records);
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptionSet {
        &self.options
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn last_load(&self) -> Option<&LoadReport> {
        self.last_load.as_ref()
    }

    pub fn matching(&self) -> Vec<&ActivityRecord> {
        self.filter.apply(&self.records)
    }

    pub fn view(&self) -> RenderModel {
        RenderModel::build(&self.matching(), &self.settings)
    }

    pub fn apply(&mut self, filter: FilterState) -> RenderModel {
        self.filter = filter;
        let model = self.view();
        tracing::debug!(matches = model.card_count(), "applied filters");
        model
    }

    /// Clear search and selections and rebuild the option vocabulary.
    pub fn reset(&mut self) -> RenderModel {
        self.filter = FilterState::new();
        self.options = FilterOptionSet::derive(&self.records);
        self.view()
    }

    /// Read the surface's controls, then push option lists and grid markup back.
    pub fn sync<S: ControlSurface>(&mut self, surface: &mut S) -> RenderModel {
        let model = self.apply(surface.read_filter());
        self.paint(surface, &model);
        model
    }

    pub fn reset_surface<S: ControlSurface>(&mut self, surface: &mut S) -> RenderModel {
        surface.clear_controls();
        let model = self.reset();
        self.paint(surface, &model);
        model
    }

    fn paint<S: ControlSurface>(&self, surface: &mut S, model: &RenderModel) {
        for dimension in Dimension::ALL {
            surface.set_options(dimension, self.options.get(dimension));
        }
        surface.paint(&render_grid(model));
    }
}
