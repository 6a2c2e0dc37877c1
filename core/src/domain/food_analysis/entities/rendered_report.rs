use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    FoodAnalysis,
    Exercise,
    HealthAssessment,
    Recommendations,
    Other,
}

impl SectionKind {
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKind::FoodAnalysis => "Food Analysis",
            SectionKind::Exercise => "Exercise to Burn These Calories",
            SectionKind::HealthAssessment => "Health Assessment",
            SectionKind::Recommendations => "Recommendations",
            SectionKind::Other => "Notes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub body: String,
}

/// Model output split on its headings, for display and export.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct RenderedReport {
    pub preamble: Option<String>,
    pub sections: Vec<Section>,
}

impl RenderedReport {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.preamble.is_none() && self.sections.is_empty()
    }
}
