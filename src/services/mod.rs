pub mod image_io;
pub mod mosaic_service;
pub mod progress_display;

pub use image_io::{load_image, save_image};
pub use mosaic_service::MosaicService;
pub use progress_display::{DisplaySink, DisplaySummary, ProgressDisplay};
