use serde::Deserialize;

/// Generic question shape handed over by the external file-parsing step.
/// Every field is optional or defaulted; the import service decides what is
/// admissible and what gets skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedQuestion {
    #[serde(default, alias = "questionType", alias = "type")]
    pub question_type: Option<String>,
    #[serde(default, alias = "question")]
    pub text: String,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub answers: Vec<ImportedAnswer>,
    #[serde(default, alias = "correctAnswer")]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportedAnswer {
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "isCorrect", alias = "correct")]
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: ImportedQuestion = serde_json::from_str("{}").unwrap();
        assert!(parsed.question_type.is_none());
        assert!(parsed.text.is_empty());
        assert!(parsed.points.is_none());
        assert!(parsed.answers.is_empty());
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let raw = r#"{
            "questionType": "multiple_choice",
            "question": "Capital of France?",
            "answers": [{"text": "Paris", "isCorrect": true}, {"text": "London"}]
        }"#;
        let parsed: ImportedQuestion = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.question_type.as_deref(), Some("multiple_choice"));
        assert_eq!(parsed.text, "Capital of France?");
        assert!(parsed.answers[0].is_correct);
        assert!(!parsed.answers[1].is_correct);
    }
}
