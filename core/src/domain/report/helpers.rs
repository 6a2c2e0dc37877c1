use crate::domain::food_analysis::entities::AnalysisRecord;

/// Markdown download of an analysis: a short header followed by the model
/// output unchanged.
pub fn render_markdown_report(record: &AnalysisRecord) -> String {
    let mut out = String::from("# Health Analysis Report\n\n");

    out.push_str(&format!(
        "- Date: {}\n",
        record.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("- User: {}\n", record.user_id));
    if let Some(calories) = record.total_calories {
        out.push_str(&format!("- Total calories: {calories}\n"));
    }
    if let Some(concern) = record.custom_prompt.as_deref() {
        out.push_str(&format!("- Concerns: {concern}\n"));
    }

    out.push('\n');
    out.push_str(record.raw_response.trim());
    out.push('\n');
    out
}
