use super::model::Idea;

const CSV_HEADER: [&str; 4] = ["Title", "Description", "Platforms", "Hashtags"];
const LIST_SEPARATOR: &str = "; ";
const RULE_WIDTH: usize = 50;

/// Export format offered to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Text,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "content-ideas.csv",
            ExportFormat::Text => "content-ideas.txt",
        }
    }

    pub fn render(&self, ideas: &[Idea]) -> String {
        match self {
            ExportFormat::Csv => to_csv(ideas),
            ExportFormat::Text => to_text(ideas),
        }
    }
}

/// Tabular export; every cell quoted, list fields flattened
pub fn to_csv(ideas: &[Idea]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');

    for idea in ideas {
        let row = [
            csv_cell(&idea.title),
            csv_cell(&idea.description),
            csv_cell(&idea.platforms.join(LIST_SEPARATOR)),
            csv_cell(&idea.hashtags.join(LIST_SEPARATOR)),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Human-readable export, one paragraph per idea between rule lines
pub fn to_text(ideas: &[Idea]) -> String {
    let rule = "-".repeat(RULE_WIDTH);

    ideas
        .iter()
        .enumerate()
        .map(|(i, idea)| {
            format!(
                "{}. {}\n{}\nPlatforms: {}\nHashtags: {}",
                i + 1,
                idea.title,
                idea.description,
                idea.platforms.join(", "),
                idea.hashtags.join(" ")
            )
        })
        .collect::<Vec<_>>()
        .join(&format!("\n\n{}\n\n", rule))
}

/// Text placed on the clipboard for a single idea
pub fn clipboard_text(idea: &Idea, with_details: bool) -> String {
    let mut text = format!("{}\n\n{}", idea.title, idea.description);

    if with_details {
        if !idea.platforms.is_empty() {
            text.push_str(&format!("\n\nPlatforms: {}", idea.platforms.join(", ")));
        }
        if !idea.hashtags.is_empty() {
            let separator = if idea.platforms.is_empty() { "\n\n" } else { "\n" };
            text.push_str(&format!("{}Hashtags: {}", separator, idea.hashtags.join(" ")));
        }
    }

    text
}
