//! Data module - CSV loading, caching and value extraction

mod cache;
mod loader;
mod processor;
mod table;

pub use cache::LoadCache;
pub use loader::{date_from_epoch_days, DataLoader, LoaderError, LoaderOptions, NULL_MARKERS};
pub use processor::{DataProcessor, ProcessorError};
pub use table::{SunspotTable, DATE_COLUMN};
