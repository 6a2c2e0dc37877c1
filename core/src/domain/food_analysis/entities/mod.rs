pub mod analysis_record;
pub mod rendered_report;

pub use analysis_record::*;
pub use rendered_report::*;
