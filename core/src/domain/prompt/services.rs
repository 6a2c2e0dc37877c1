use std::sync::LazyLock;

use crate::domain::{
    chat::entities::{ChatMessage, ChatRole},
    prompt::entities::PromptTemplate,
};

const ANALYSIS_TEMPLATE: &str = "\
You are an expert nutritionist and fitness coach. Analyze the food in the image and provide:

## 🍽️ Food Analysis
• List each food item with calories:
  1. Item 1 - X calories
  2. Item 2 - X calories
  ...
• Total Calories: X

## 💪 Exercise to Burn These Calories
• Walking: X minutes
• Running: X minutes
• Swimming: X minutes
• Cycling: X minutes
• Yoga: X minutes

## 🏥 Health Assessment
• Healthiness Score: X/10
• Pros:
  - Point 1
  - Point 2
• Cons:
  - Point 1
  - Point 2

## 💡 Recommendations
• Healthier alternatives (if needed)
• Portion size suggestions
• Best time to consume

Please format the response in clean markdown with emojis for better readability.
If you're unsure about any item, provide an estimate and mention it.
";

const CHAT_TEMPLATE: &str = "\
As a nutrition and fitness expert, answer this question about the food in the image:
{question}

Provide a detailed but concise response. If the question is about nutrition or health,
include scientific backing where relevant.
{context}";

static ANALYSIS_PROMPT: LazyLock<PromptTemplate> =
    LazyLock::new(|| PromptTemplate::new("food-analysis", "1", ANALYSIS_TEMPLATE));

static CHAT_PROMPT: LazyLock<PromptTemplate> =
    LazyLock::new(|| PromptTemplate::new("food-chat", "1", CHAT_TEMPLATE));

/// Build the instruction sent with the photo. A non-blank user concern
/// (allergies, diet) is appended on its own line.
pub fn build_analysis_prompt(custom_prompt: Option<&str>) -> String {
    let base = ANALYSIS_PROMPT.render(&[]);

    match custom_prompt.map(str::trim).filter(|c| !c.is_empty()) {
        Some(concern) => format!("{base}\n{concern}"),
        None => base,
    }
}

/// Build a follow-up question prompt carrying the earlier analysis and the
/// conversation so far.
pub fn build_chat_prompt(question: &str, analysis: &str, transcript: &[ChatMessage]) -> String {
    let mut context = String::new();

    if !analysis.trim().is_empty() {
        context.push_str("\nYour earlier analysis of this meal:\n");
        context.push_str(analysis.trim());
        context.push('\n');
    }

    if !transcript.is_empty() {
        context.push_str("\nConversation so far:\n");
        for message in transcript {
            let speaker = match message.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
            };
            context.push_str(&format!("{speaker}: {}\n", message.content.trim()));
        }
    }

    CHAT_PROMPT.render(&[("question", question.trim()), ("context", &context)])
}
