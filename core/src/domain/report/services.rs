use tracing::instrument;

use crate::domain::{
    chat::ports::ChatTranscriptRepository,
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        helpers::render_response,
        ports::{AnalysisHistoryRepository, LLMClient},
    },
    image::ports::ImageStore,
    report::{
        entities::{ExportReportInput, ExportedReport, ReportFormat},
        helpers::render_markdown_report,
        ports::{ReportExporter, ReportService},
    },
};

impl<H, L, I, C, E> ReportService for Service<H, L, I, C, E>
where
    H: AnalysisHistoryRepository,
    L: LLMClient,
    I: ImageStore,
    C: ChatTranscriptRepository,
    E: ReportExporter,
{
    #[instrument(skip(self, input), fields(user_id = %input.user_id, format = ?input.format))]
    async fn export_report(&self, input: ExportReportInput) -> Result<ExportedReport, CoreError> {
        let record = self
            .history_repository
            .get_by_id(&input.user_id, input.analysis_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let content = match input.format {
            ReportFormat::Pdf => {
                let report = render_response(&record.raw_response);
                self.report_exporter.export(&record, &report)?
            }
            ReportFormat::Markdown => render_markdown_report(&record).into_bytes(),
        };

        Ok(ExportedReport {
            file_name: input.format.file_name().to_string(),
            content_type: input.format.content_type().to_string(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        common::{
            services::test_support::{TestService, test_service},
            value_objects::UserId,
        },
        food_analysis::{ports::FoodAnalysisService, value_objects::AnalyzeFoodInput},
        image::{
            entities::ImageSource, services::test_images, value_objects::ImageIntakeInput,
        },
    };

    const RESPONSE: &str = "## 🍽️ Food Analysis\n• Sushi - 450 calories\n• Total Calories: 450\n\n## 🏥 Health Assessment\n• Healthiness Score: 7/10";

    async fn stored_analysis(dir: &TempDir) -> (TestService, Uuid) {
        let service = test_service(dir, vec![Ok(RESPONSE.into())], vec![]);
        let view = service
            .analyze_food(AnalyzeFoodInput {
                user_id: UserId::parse("alice").unwrap(),
                image: ImageIntakeInput {
                    data: test_images::png(),
                    declared_mime_type: None,
                    original_name: None,
                    source: ImageSource::Upload,
                },
                custom_prompt: Some("low sodium".into()),
            })
            .await
            .unwrap();
        (service, view.record.id)
    }

    fn export(id: Uuid, format: ReportFormat) -> ExportReportInput {
        ExportReportInput {
            user_id: UserId::parse("alice").unwrap(),
            analysis_id: id,
            format,
        }
    }

    #[tokio::test]
    async fn test_export_pdf() {
        let dir = TempDir::new().unwrap();
        let (service, id) = stored_analysis(&dir).await;

        let exported = service.export_report(export(id, ReportFormat::Pdf)).await.unwrap();

        assert_eq!(exported.file_name, "health_analysis.pdf");
        assert_eq!(exported.content_type, "application/pdf");
        assert!(exported.content.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_markdown() {
        let dir = TempDir::new().unwrap();
        let (service, id) = stored_analysis(&dir).await;

        let exported = service
            .export_report(export(id, ReportFormat::Markdown))
            .await
            .unwrap();
        let text = String::from_utf8(exported.content).unwrap();

        assert_eq!(exported.file_name, "health_analysis.md");
        assert!(text.starts_with("# Health Analysis Report\n"));
        assert!(text.contains("- User: alice\n"));
        assert!(text.contains("- Total calories: 450\n"));
        assert!(text.contains("- Concerns: low sodium\n"));
        assert!(text.contains("• Sushi - 450 calories"));
    }

    #[tokio::test]
    async fn test_export_unknown_analysis() {
        let dir = TempDir::new().unwrap();
        let (service, _) = stored_analysis(&dir).await;

        let err = service
            .export_report(export(Uuid::new_v4(), ReportFormat::Pdf))
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::NotFound);
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!("PDF".parse::<ReportFormat>().unwrap(), ReportFormat::Pdf);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("docx".parse::<ReportFormat>().is_err());
    }
}
