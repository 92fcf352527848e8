pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod loader;
pub mod options;
pub mod render;
pub mod schema;
pub mod surface;

pub use directory::{Directory, LoadReport};
pub use error::LoadError;
pub use filter::FilterState;
pub use loader::{Loader, Source};
pub use options::{Dimension, FilterOptionSet};
pub use render::{RenderModel, RenderSettings};
pub use schema::ActivityRecord;
