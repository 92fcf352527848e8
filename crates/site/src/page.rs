use anyhow::Result;
use directory_core::render::{escape_html, render_filter_controls};
use directory_core::surface::ControlSurface;
use directory_core::{Dimension, Directory, FilterOptionSet, FilterState};
use std::fs;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;

pub struct SitePaths {
    pub root: PathBuf,
    pub page: PathBuf,
    pub data: PathBuf,
}

impl SitePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            page: root.join("activities.html"),
            data: root.join("activities.json"),
            root,
        }
    }

    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }
}

/// Surface for a statically written page: controls start from a fixed
/// filter and whatever the directory pushes back is kept for writing.
#[derive(Debug, Default)]
pub struct PageSurface {
    filter: FilterState,
    options: FilterOptionSet,
    grid: String,
}

impl PageSurface {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn grid(&self) -> &str {
        &self.grid
    }

    fn controls(&self) -> String {
        render_filter_controls(&self.options, &self.filter)
    }
}

impl ControlSurface for PageSurface {
    fn search_term(&self) -> String {
        self.filter.search().to_string()
    }

    fn selected(&self, dimension: Dimension) -> Vec<String> {
        self.filter.selected(dimension).to_vec()
    }

    fn set_options(&mut self, dimension: Dimension, values: &[String]) {
        self.options.set(dimension, values);
    }

    fn paint(&mut self, markup: &str) {
        self.grid = markup.to_string();
    }

    fn clear_controls(&mut self) {
        self.filter = FilterState::new();
    }
}

/// Write the activities page for `filter` plus a copy of the working set.
pub fn build_site(
    directory: &mut Directory,
    filter: FilterState,
    site_root: &Path,
    page_title: &str,
) -> Result<SitePaths> {
    let paths = SitePaths::new(site_root);
    paths.ensure()?;

    let mut surface = PageSurface::new(filter);
    let model = directory.sync(&mut surface);

    let generated_at = OffsetDateTime::now_utc()
        .format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))?;
    let html = page_html(page_title, &surface, &generated_at);
    fs::write(&paths.page, html)?;

    let data = serde_json::to_string_pretty(directory.records())?;
    fs::write(&paths.data, data)?;

    tracing::info!(
        page = %paths.page.display(),
        cards = model.card_count(),
        records = directory.records().len(),
        "wrote activities page"
    );
    Ok(paths)
}

fn page_html(title: &str, surface: &PageSurface, generated_at: &str) -> String {
    let title = escape_html(title);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<!-- This page is generated. Do not edit manually. -->\n");
    html.push_str("<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n"));
    html.push_str(&surface.controls());
    html.push_str("<section id=\"activityGrid\" role=\"list\">\n");
    html.push_str(surface.grid());
    html.push_str("</section>\n");
    html.push_str(&format!(
        "<footer><small>Generated {}</small></footer>\n",
        escape_html(generated_at)
    ));
    html.push_str("</body>\n</html>\n");
    html
}
