//! Export engine: walks the page tree and writes one AsciiDoc file per page.

pub mod export_types;
pub mod exporter;
pub mod progress;

pub use export_types::{ExportError, ExportQueue, ExportResult, ExportSummary};
pub use exporter::Exporter;
pub use progress::{ExportProgress, NoOpProgress};
