pub mod page;

pub use page::{build_site, PageSurface, SitePaths};
