//! Prompt templates for the fixed-purpose operations

use std::fmt;

use serde_json::{Map, Value};

/// Characters of tabular data forwarded to the model.
pub const TABULAR_PROMPT_CHARS: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Summary,
    KeyPoints,
    Sentiment,
    Entities,
}

impl AnalysisType {
    /// Unrecognized names fall back to [`AnalysisType::Summary`].
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "key_points" => AnalysisType::KeyPoints,
            "sentiment" => AnalysisType::Sentiment,
            "entities" => AnalysisType::Entities,
            _ => AnalysisType::Summary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Summary => "summary",
            AnalysisType::KeyPoints => "key_points",
            AnalysisType::Sentiment => "sentiment",
            AnalysisType::Entities => "entities",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    /// Unrecognized names fall back to [`SummaryLength::Medium`].
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "short" => SummaryLength::Short,
            "long" => SummaryLength::Long,
            _ => SummaryLength::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            SummaryLength::Short => "in 2-3 sentences",
            SummaryLength::Medium => "in one paragraph",
            SummaryLength::Long => "in 2-3 paragraphs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Story,
    Poem,
    Article,
    Code,
    General,
}

impl ContentKind {
    /// Unrecognized names fall back to [`ContentKind::General`].
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "story" => ContentKind::Story,
            "poem" => ContentKind::Poem,
            "article" => ContentKind::Article,
            "code" => ContentKind::Code,
            _ => ContentKind::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Story => "story",
            ContentKind::Poem => "poem",
            ContentKind::Article => "article",
            ContentKind::Code => "code",
            ContentKind::General => "general",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            ContentKind::Story => "Write a creative story about: ",
            ContentKind::Poem => "Write a poem about: ",
            ContentKind::Article => "Write an informative article about: ",
            ContentKind::Code => "Write well-documented code for: ",
            ContentKind::General => "",
        }
    }
}

pub fn document_prompt(text: &str, analysis: AnalysisType) -> String {
    let instruction = match analysis {
        AnalysisType::Summary => "Provide a concise summary of the following document:",
        AnalysisType::KeyPoints => "Extract the key points of the following document as a list:",
        AnalysisType::Sentiment => {
            "Analyze the sentiment and tone of the following document, explaining your reasoning:"
        }
        AnalysisType::Entities => {
            "Identify the named entities (people, places, organizations, dates) in the following document:"
        }
    };
    format!("{}\n\n{}", instruction, text)
}

pub fn extraction_prompt(text: &str, fields: &Map<String, Value>) -> String {
    let field_lines = fields
        .iter()
        .map(|(key, description)| match description {
            Value::String(s) => format!("- {}: {}", key, s),
            other => format!("- {}: {}", key, other),
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Extract the following fields from the text below:\n{}\n\n\
         Respond ONLY with a valid JSON object using exactly these keys.\n\n\
         Text:\n{}",
        field_lines, text
    )
}

pub fn tabular_prompt(data: &str, question: &str) -> String {
    let excerpt: String = data.chars().take(TABULAR_PROMPT_CHARS).collect();
    format!(
        "You are a data analyst. Here is a dataset in CSV format:\n\n{}\n\n\
         Question: {}\n\nProvide a clear and well-structured answer.",
        excerpt, question
    )
}

pub fn sentiment_prompt(text: &str, detailed: bool) -> String {
    if detailed {
        format!(
            "Analyze the sentiment of the following text. Respond in JSON with the keys \
             \"sentiment\" (positive, negative or neutral), \"confidence\" (0-100), \
             \"emotions\" (list of detected emotions) and \"aspects\" (notable aspects and \
             their sentiment).\n\nText: {}",
            text
        )
    } else {
        format!(
            "Classify the sentiment of the following text as positive, negative or neutral. \
             Respond with a single word.\n\nText: {}",
            text
        )
    }
}

pub fn translation_prompt(text: &str, target: &str, source: &str) -> String {
    let direction = if source.trim().eq_ignore_ascii_case("auto") {
        format!("to {}", target)
    } else {
        format!("from {} to {}", source, target)
    };
    format!(
        "Translate the following text {}. Respond with the translation only.\n\n{}",
        direction, text
    )
}

pub fn summary_prompt(text: &str, length: SummaryLength, bullet_points: bool) -> String {
    let format_hint = if bullet_points {
        "Use bullet points for the key ideas."
    } else {
        "Write it as continuous prose."
    };
    format!(
        "Summarize the following text {}. {}\n\n{}",
        length.instruction(),
        format_hint,
        text
    )
}

pub fn grammar_prompt(text: &str, language: &str) -> String {
    format!(
        "Review the grammar and spelling of the following {} text. Respond in JSON with the \
         keys \"corrected_text\", \"errors\" (list of the mistakes found) and \
         \"suggestions\" (list of style improvements).\n\nText: {}",
        language, text
    )
}

pub fn content_prompt(prompt: &str, kind: ContentKind) -> String {
    format!("{}{}", kind.prefix(), prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_type_fallback() {
        assert_eq!(AnalysisType::parse_lenient("entities"), AnalysisType::Entities);
        assert_eq!(AnalysisType::parse_lenient("KEY_POINTS"), AnalysisType::KeyPoints);
        assert_eq!(AnalysisType::parse_lenient("haiku"), AnalysisType::Summary);
    }

    #[test]
    fn test_extraction_prompt_lists_fields() {
        let schema = json!({"name": "Person name", "age": "Age in years"});
        let prompt = extraction_prompt("John is 30", schema.as_object().unwrap());
        assert!(prompt.contains("- name: Person name"));
        assert!(prompt.contains("- age: Age in years"));
        assert!(prompt.contains("ONLY"));
        assert!(prompt.ends_with("John is 30"));
    }

    #[test]
    fn test_tabular_prompt_truncates_data() {
        let data = "x".repeat(TABULAR_PROMPT_CHARS + 100);
        let prompt = tabular_prompt(&data, "How many rows?");
        assert!(prompt.contains(&"x".repeat(TABULAR_PROMPT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(TABULAR_PROMPT_CHARS + 1)));
        assert!(prompt.contains("Question: How many rows?"));
    }

    #[test]
    fn test_translation_direction() {
        assert!(translation_prompt("hola", "English", "auto").contains("text to English."));
        assert!(translation_prompt("hola", "English", "Spanish")
            .contains("from Spanish to English"));
    }

    #[test]
    fn test_summary_and_content_prompts() {
        let prompt = summary_prompt("body", SummaryLength::Short, true);
        assert!(prompt.contains("2-3 sentences"));
        assert!(prompt.contains("bullet points"));
        assert_eq!(SummaryLength::parse_lenient("epic"), SummaryLength::Medium);

        assert_eq!(content_prompt("a cat", ContentKind::Poem), "Write a poem about: a cat");
        assert_eq!(content_prompt("a cat", ContentKind::parse_lenient("misc")), "a cat");
    }

    #[test]
    fn test_sentiment_prompt_variants() {
        assert!(sentiment_prompt("great", true).contains("confidence"));
        assert!(sentiment_prompt("great", false).contains("single word"));
    }
}
