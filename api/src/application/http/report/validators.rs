use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ExportReportParams {
    /// `pdf` (default), `markdown` or `md`
    #[schema(example = "pdf")]
    pub format: Option<String>,
}
