use std::sync::LazyLock;

use regex::Regex;

use crate::domain::food_analysis::entities::{RenderedReport, Section, SectionKind};

static TOTAL_CALORIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)total\s+calories[*_:\s]*(?:(?:approximately|approx\.?|about|around|roughly|estimated|est\.?)\s*)?[~≈]?\s*(\d{1,3}(?:,\d{3})+|\d+)",
    )
    .expect("total calories pattern is valid")
});

/// Split model output into sections on markdown headings (`#` to `######`).
///
/// Text before the first heading becomes the preamble. Headings with no body
/// are dropped, so a response missing a section simply has fewer sections.
pub fn render_response(text: &str) -> RenderedReport {
    let mut preamble: Vec<&str> = Vec::new();
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(title) = heading_title(line) {
            if let Some((title, body)) = current.take() {
                push_section(&mut sections, title, &body);
            }
            current = Some((title, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        } else {
            preamble.push(line);
        }
    }

    if let Some((title, body)) = current.take() {
        push_section(&mut sections, title, &body);
    }

    let preamble = preamble.join("\n").trim().to_string();

    RenderedReport {
        preamble: (!preamble.is_empty()).then_some(preamble),
        sections,
    }
}

fn push_section(sections: &mut Vec<Section>, raw_title: String, body: &[&str]) {
    let body = body.join("\n").trim().to_string();
    if body.is_empty() {
        return;
    }

    let kind = classify_heading(&raw_title);
    let title = clean_title(&raw_title);
    let title = if title.is_empty() {
        kind.default_title().to_string()
    } else {
        title
    };

    sections.push(Section { kind, title, body });
}

fn heading_title(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let rest = &trimmed[hashes..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some(rest.trim().trim_end_matches('#').trim().to_string())
}

pub fn classify_heading(title: &str) -> SectionKind {
    let normalized: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if normalized.contains("recommend") {
        SectionKind::Recommendations
    } else if normalized.contains("exercise") {
        SectionKind::Exercise
    } else if normalized.contains("health") {
        SectionKind::HealthAssessment
    } else if normalized.contains("food") {
        SectionKind::FoodAnalysis
    } else {
        SectionKind::Other
    }
}

fn clean_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || "&-'/(),:".contains(*c))
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First "Total Calories" figure in the response. Ranges yield their lower
/// bound; thousands separators are accepted.
pub fn extract_total_calories(text: &str) -> Option<u32> {
    TOTAL_CALORIES
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

/// Strip inline markdown emphasis and normalise bullets to `- `.
pub fn plain_line(line: &str) -> String {
    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim_start();

    let (bullet, content) = match trimmed.chars().next() {
        Some('•') | Some('*') | Some('-') | Some('+')
            if trimmed.chars().nth(1).is_some_and(char::is_whitespace) =>
        {
            let first = trimmed.chars().next().map(char::len_utf8).unwrap_or(1);
            ("- ", trimmed[first..].trim_start())
        }
        _ => ("", trimmed),
    };

    let content = content.replace("**", "").replace("__", "").replace('`', "");

    format!("{}{}{}", " ".repeat(indent), bullet, content.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
Here is the breakdown of your meal.

## 🍽️ Food Analysis
• List each food item with calories:
  1. Grilled chicken breast - 280 calories
  2. Brown rice (1 cup) - 215 calories
  3. Steamed broccoli - 55 calories
• **Total Calories:** 550

## 💪 Exercise to Burn These Calories
• Walking: 110 minutes
• Running: 50 minutes
• Swimming: 60 minutes
• Cycling: 75 minutes
• Yoga: 140 minutes

## 🏥 Health Assessment
• Healthiness Score: 8/10
• Pros:
  - High protein
• Cons:
  - Low in healthy fats

## 💡 Recommendations
• Add avocado for healthy fats
• Best time to consume: lunch
";

    #[test]
    fn test_render_well_formed_response() {
        let report = render_response(WELL_FORMED);

        assert_eq!(
            report.preamble.as_deref(),
            Some("Here is the breakdown of your meal.")
        );

        let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::FoodAnalysis,
                SectionKind::Exercise,
                SectionKind::HealthAssessment,
                SectionKind::Recommendations,
            ]
        );

        for section in &report.sections {
            assert!(!section.body.is_empty(), "{} is empty", section.title);
        }

        let food = report.section(SectionKind::FoodAnalysis).unwrap();
        assert_eq!(food.title, "Food Analysis");
        assert!(food.body.contains("Brown rice"));

        let exercise = report.section(SectionKind::Exercise).unwrap();
        assert_eq!(exercise.title, "Exercise to Burn These Calories");
        assert!(exercise.body.starts_with("• Walking"));
    }

    #[test]
    fn test_render_missing_section_is_omitted() {
        let text = "\
## Food Analysis
• Apple - 95 calories

## Recommendations
• Pair with nuts";
        let report = render_response(text);

        assert_eq!(report.sections.len(), 2);
        assert!(report.section(SectionKind::Exercise).is_none());
        assert!(report.section(SectionKind::HealthAssessment).is_none());
        assert!(report.preamble.is_none());
    }

    #[test]
    fn test_render_drops_empty_heading() {
        let text = "## Food Analysis\n\n## Health Assessment\nScore: 5/10\n";
        let report = render_response(text);

        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].kind, SectionKind::HealthAssessment);
    }

    #[test]
    fn test_render_keeps_unrecognised_heading() {
        let text = "### ⚠️ Allergy Notes\nContains gluten.";
        let report = render_response(text);

        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].kind, SectionKind::Other);
        assert_eq!(report.sections[0].title, "Allergy Notes");
    }

    #[test]
    fn test_render_plain_text_has_no_sections() {
        let report = render_response("I could not identify any food in this image.");

        assert!(report.sections.is_empty());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_hashtag_is_not_a_heading() {
        let report = render_response("#healthy lunch\n## Food Analysis\nSalad");
        assert_eq!(report.preamble.as_deref(), Some("#healthy lunch"));
        assert_eq!(report.sections.len(), 1);
    }

    #[test]
    fn test_classify_heading() {
        assert_eq!(
            classify_heading("💡 Healthier Recommendations"),
            SectionKind::Recommendations
        );
        assert_eq!(classify_heading("🏥 HEALTH assessment"), SectionKind::HealthAssessment);
        assert_eq!(classify_heading("Food Breakdown"), SectionKind::FoodAnalysis);
        assert_eq!(classify_heading("Summary"), SectionKind::Other);
    }

    #[test]
    fn test_extract_total_calories() {
        assert_eq!(extract_total_calories(WELL_FORMED), Some(550));
        assert_eq!(extract_total_calories("• Total Calories: 650"), Some(650));
        assert_eq!(
            extract_total_calories("**Total Calories:** ~1,200 kcal"),
            Some(1200)
        );
        assert_eq!(
            extract_total_calories("Total calories: approximately 850-950"),
            Some(850)
        );
        assert_eq!(extract_total_calories("TOTAL CALORIES 1200"), Some(1200));
        assert_eq!(extract_total_calories("Total Calories: unknown"), None);
        assert_eq!(extract_total_calories("no numbers here"), None);
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(plain_line("• **Pros:**"), "- Pros:");
        assert_eq!(plain_line("  - High protein"), "  - High protein");
        assert_eq!(plain_line("* `Yoga`: 40 minutes"), "- Yoga: 40 minutes");
        assert_eq!(plain_line("1. Rice - 200 calories"), "1. Rice - 200 calories");
        assert_eq!(plain_line("**Bold** text"), "Bold text");
    }
}
