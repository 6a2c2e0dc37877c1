use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AnalysisRecord, RenderedReport},
        helpers::plain_line,
    },
    report::ports::ReportExporter,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;

/// A4 layout: title, metadata block, then one heading per section.
#[derive(Debug, Clone)]
pub struct PdfReportExporter {
    title: String,
    wrap_width: usize,
}

impl Default for PdfReportExporter {
    fn default() -> Self {
        Self {
            title: "Health Analysis Report".to_string(),
            wrap_width: 95,
        }
    }
}

fn pdf_error(e: printpdf::Error) -> CoreError {
    error!("PDF generation failed: {}", e);
    CoreError::ReportGenerationError(e.to_string())
}

/// Built-in PDF fonts only cover Latin-1; emojis and other symbols are
/// dropped, bullets become dashes.
fn latin1(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '•' | '–' | '—' => Some('-'),
            '‘' | '’' => Some('\''),
            '“' | '”' => Some('"'),
            c if (c as u32) < 0x100 && !c.is_control() => Some(c),
            _ => None,
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn wrap(line: &str, width: usize) -> Vec<String> {
    let indent: String = line.chars().take_while(|c| *c == ' ').collect();
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate_len = current.chars().count() + word.chars().count() + 1;
        if !current.is_empty() && indent.len() + candidate_len > width {
            lines.push(format!("{indent}{current}"));
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(format!("{indent}{current}"));
    }

    lines
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    cursor: f32,
}

impl PageWriter<'_> {
    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        let line_height = size * 0.3528 * 1.4;
        self.ensure_space(line_height);
        self.cursor -= line_height;
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.cursor), font);
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }
}

impl ReportExporter for PdfReportExporter {
    fn export(
        &self,
        record: &AnalysisRecord,
        report: &RenderedReport,
    ) -> Result<Vec<u8>, CoreError> {
        let (doc, page, layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            cursor: PAGE_HEIGHT - MARGIN,
        };

        writer.text(&self.title, TITLE_SIZE, &bold);
        writer.gap(3.0);

        let mut meta = vec![
            format!("Date: {}", record.created_at.format("%Y-%m-%d %H:%M UTC")),
            format!("User: {}", record.user_id),
        ];
        if let Some(calories) = record.total_calories {
            meta.push(format!("Total calories: {calories}"));
        }
        if let Some(concern) = record.custom_prompt.as_deref() {
            meta.push(format!("Concerns: {}", latin1(concern)));
        }
        for line in meta {
            for wrapped in wrap(&line, self.wrap_width) {
                writer.text(&wrapped, BODY_SIZE, &regular);
            }
        }

        let mut blocks: Vec<(Option<String>, &str)> = Vec::new();
        if let Some(preamble) = report.preamble.as_deref() {
            blocks.push((None, preamble));
        }
        for section in &report.sections {
            blocks.push((Some(latin1(&section.title)), section.body.as_str()));
        }
        // Unsectioned output with no preamble still gets printed verbatim.
        if blocks.is_empty() {
            blocks.push((None, record.raw_response.as_str()));
        }

        for (heading, body) in blocks {
            writer.gap(4.0);
            if let Some(heading) = heading {
                writer.text(&heading, HEADING_SIZE, &bold);
                writer.gap(1.0);
            }
            for raw in body.lines() {
                let line = latin1(&plain_line(raw));
                if line.trim().is_empty() {
                    writer.gap(2.0);
                    continue;
                }
                for wrapped in wrap(&line, self.wrap_width) {
                    writer.text(&wrapped, BODY_SIZE, &regular);
                }
            }
        }

        drop(writer);
        doc.save_to_bytes().map_err(pdf_error)
    }
}
