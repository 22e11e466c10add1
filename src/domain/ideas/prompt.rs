use super::model::FormInput;
use serde::Deserialize;

/// Shape the oracle is asked to answer in
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Lines,
}

/// Build the instruction sent to the oracle for one batch of ideas.
///
/// The services clause only appears when the form carries non-blank
/// services text.
pub fn build_prompt(form: &FormInput, batch_size: usize, format: ResponseFormat) -> String {
    let mut prompt = format!(
        "You are a professional content strategist. Generate {} {} content ideas for a {} business that targets {}.",
        batch_size,
        form.content_type.label(),
        form.industry.trim(),
        form.target_audience.trim(),
    );

    if let Some(services) = form.services_text() {
        prompt.push_str(&format!("\nTheir products/services include: {}", services));
    }

    prompt.push_str(
        "\n\nFor each idea, provide:\n\
         - title (max 50 characters)\n\
         - description (max 150 characters)\n\
         - platforms (2-3 social platforms)\n\
         - hashtags (3-5 relevant hashtags with # symbol)\n\n",
    );

    match format {
        ResponseFormat::Json => prompt.push_str(
            "Return ONLY a valid JSON array with this exact structure:\n\
             [\n  {\n    \"title\": \"...\",\n    \"description\": \"...\",\n    \
             \"platforms\": [\"...\", \"...\"],\n    \"hashtags\": [\"#...\", \"#...\"]\n  }\n]\n\n",
        ),
        ResponseFormat::Lines => prompt.push_str(
            "Return one idea per line, with no numbering or extra text, in exactly this format:\n\
             TITLE: <title> | DESC: <description> | PLATFORMS: <platform1, platform2> | TAGS: <#tag1, #tag2>\n\n",
        ),
    }

    prompt.push_str("Make ideas specific, actionable, and engaging.");
    prompt
}
