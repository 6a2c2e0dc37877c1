pub mod pdf_exporter;

pub use pdf_exporter::PdfReportExporter;
