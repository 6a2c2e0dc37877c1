pub mod export_report;
