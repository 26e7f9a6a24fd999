use thiserror::Error;

use crate::domain::models::{new_id, Answer, Question};
use crate::domain::question_list::QuestionList;
use crate::domain::types::{QuestionType, FALSE_LABEL, TRUE_LABEL};
use crate::schemas::import::ImportedQuestion;

const DEFAULT_IMPORT_POINTS: f64 = 1.0;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import payload has invalid format: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("import payload exceeds the {limit} question limit ({actual} supplied)")]
    TooManyQuestions { limit: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Parses the already-file-parsed generic payload. A totally unparseable
/// payload aborts here, before anything touches the question list.
pub fn parse_question_payload(raw: &str) -> Result<Vec<ImportedQuestion>, ImportError> {
    Ok(serde_json::from_str(raw)?)
}

/// Admits imported questions into the list, defaulting every missing field and
/// skipping entries that cannot be repaired. Skips are logged per item so the
/// caller can report "N imported, M skipped".
pub fn admit_questions(list: &mut QuestionList, items: Vec<ImportedQuestion>) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for (index, item) in items.into_iter().enumerate() {
        match admit_question(item) {
            Ok(question) => {
                list.add(question);
                summary.imported += 1;
            }
            Err(reason) => {
                tracing::warn!(index, reason, "Skipping malformed imported question");
                summary.skipped += 1;
            }
        }
    }

    metrics::counter!("quiz_import_questions_total", "outcome" => "imported")
        .increment(summary.imported as u64);
    metrics::counter!("quiz_import_questions_total", "outcome" => "skipped")
        .increment(summary.skipped as u64);

    summary
}

fn admit_question(item: ImportedQuestion) -> Result<Question, &'static str> {
    let text = item.text.trim().to_string();
    if text.is_empty() {
        return Err("question text is empty");
    }

    let question_type = parse_question_type(item.question_type.as_deref());
    let points = match item.points {
        Some(points) if points > 0.0 => points,
        // Missing or non-positive points fall back to the default.
        _ => DEFAULT_IMPORT_POINTS,
    };

    let answers = build_answers(question_type, &item)?;

    Ok(Question {
        id: new_id("q"),
        question_type,
        text,
        points,
        order: 0,
        answers,
        explanation: item.explanation.map(|value| value.trim().to_string()).filter(|value| !value.is_empty()),
    })
}

fn build_answers(
    question_type: QuestionType,
    item: &ImportedQuestion,
) -> Result<Vec<Answer>, &'static str> {
    match question_type {
        QuestionType::FillBlank => {
            let accepted = item
                .correct_answer
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .or_else(|| {
                    item.answers
                        .first()
                        .map(|answer| answer.text.trim())
                        .filter(|value| !value.is_empty())
                })
                .ok_or("fill in the blank question has no accepted answer")?;
            Ok(vec![Answer::new(accepted, true, 0)])
        }
        QuestionType::TrueFalse => {
            let marked: Vec<_> =
                item.answers.iter().filter(|answer| answer.is_correct).collect();
            if marked.len() != 1 {
                return Err("true/false question needs exactly one correct answer");
            }
            let truth = marked[0].text.trim().eq_ignore_ascii_case("true");
            Ok(vec![
                Answer::new(TRUE_LABEL, truth, 0),
                Answer::new(FALSE_LABEL, !truth, 1),
            ])
        }
        QuestionType::MultipleChoice | QuestionType::MultipleSelect => {
            let mut answers: Vec<Answer> = item
                .answers
                .iter()
                .filter(|answer| !answer.text.trim().is_empty())
                .take(question_type.max_answers())
                .enumerate()
                .map(|(order, answer)| {
                    Answer::new(answer.text.trim(), answer.is_correct, order as i32)
                })
                .collect();

            if answers.len() < question_type.min_answers() {
                return Err("choice question has too few usable answers");
            }

            let correct = answers.iter().filter(|answer| answer.is_correct).count();
            match question_type {
                QuestionType::MultipleChoice if correct != 1 => {
                    Err("multiple choice question needs exactly one correct answer")
                }
                QuestionType::MultipleSelect if correct == 0 => {
                    Err("multiple select question needs at least one correct answer")
                }
                _ => {
                    for (index, answer) in answers.iter_mut().enumerate() {
                        answer.order = index as i32;
                    }
                    Ok(answers)
                }
            }
        }
    }
}

fn parse_question_type(raw: Option<&str>) -> QuestionType {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("multiple_select" | "multipleselect" | "multi_select" | "checkbox") => {
            QuestionType::MultipleSelect
        }
        Some("true_false" | "truefalse" | "boolean") => QuestionType::TrueFalse,
        Some("fill_blank" | "fillblank" | "fill_in_the_blank" | "short_answer") => {
            QuestionType::FillBlank
        }
        // Unknown or missing types default to the most common kind.
        _ => QuestionType::MultipleChoice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admit(raw: &str) -> (QuestionList, ImportSummary) {
        let items = parse_question_payload(raw).expect("parseable payload");
        let mut list = QuestionList::new();
        let summary = admit_questions(&mut list, items);
        (list, summary)
    }

    #[test]
    fn unparseable_payload_aborts_without_touching_the_list() {
        let mut list = QuestionList::new();
        let err = parse_question_payload("not json").expect_err("abort");
        assert!(matches!(err, ImportError::InvalidPayload(_)));
        assert!(list.is_empty());
        // Existing content survives an aborted import.
        list.add(crate::test_support::mc_question("Q", 1.0));
        assert!(parse_question_payload("{broken").is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn malformed_entries_are_skipped_and_counted() {
        let raw = r#"[
            {"questionType": "multiple_choice", "text": "Good?",
             "answers": [{"text": "Yes", "isCorrect": true}, {"text": "No"}]},
            {"questionType": "multiple_choice", "text": "",
             "answers": [{"text": "A", "isCorrect": true}, {"text": "B"}]},
            {"questionType": "multiple_choice", "text": "No correct one",
             "answers": [{"text": "A"}, {"text": "B"}]}
        ]"#;
        let (list, summary) = admit(raw);
        assert_eq!(summary, ImportSummary { imported: 1, skipped: 2 });
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().text, "Good?");
        assert_eq!(list.get(0).unwrap().order, 0);
    }

    #[test]
    fn missing_fields_get_safe_defaults() {
        let raw = r#"[
            {"text": "Defaulted?",
             "answers": [{"text": "A", "isCorrect": true}, {"text": "B"}],
             "points": -3}
        ]"#;
        let (list, summary) = admit(raw);
        assert_eq!(summary.imported, 1);

        let question = list.get(0).unwrap();
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        assert_eq!(question.points, DEFAULT_IMPORT_POINTS);
    }

    #[test]
    fn fill_blank_accepts_correct_answer_field_or_first_answer() {
        let raw = r#"[
            {"questionType": "fill_blank", "text": "Capital?", "correctAnswer": "Paris"},
            {"questionType": "fill_blank", "text": "Capital?",
             "answers": [{"text": "Rome", "isCorrect": true}]},
            {"questionType": "fill_blank", "text": "Capital?"}
        ]"#;
        let (list, summary) = admit(raw);
        assert_eq!(summary, ImportSummary { imported: 2, skipped: 1 });
        assert_eq!(list.get(0).unwrap().answers[0].text, "Paris");
        assert_eq!(list.get(1).unwrap().answers[0].text, "Rome");
        assert!(list.get(0).unwrap().answers[0].is_correct);
    }

    #[test]
    fn true_false_rebuilds_fixed_answers() {
        let raw = r#"[
            {"questionType": "true_false", "text": "Water boils at 100C",
             "answers": [{"text": "true", "isCorrect": true}, {"text": "false"}]}
        ]"#;
        let (list, summary) = admit(raw);
        assert_eq!(summary.imported, 1);

        let question = list.get(0).unwrap();
        assert_eq!(question.answers.len(), 2);
        assert_eq!(question.answers[0].text, TRUE_LABEL);
        assert!(question.answers[0].is_correct);
        assert!(!question.answers[1].is_correct);
    }

    #[test]
    fn oversized_choice_lists_are_truncated_to_the_maximum() {
        let answers: Vec<String> = (0..9)
            .map(|index| format!("{{\"text\": \"A{index}\", \"isCorrect\": {}}}", index == 0))
            .collect();
        let raw = format!(
            "[{{\"questionType\": \"multiple_choice\", \"text\": \"Q\", \"answers\": [{}]}}]",
            answers.join(",")
        );
        let (list, summary) = admit(&raw);
        assert_eq!(summary.imported, 1);
        assert_eq!(list.get(0).unwrap().answers.len(), 6);
    }

    #[test]
    fn unknown_type_defaults_to_multiple_choice() {
        assert_eq!(parse_question_type(Some("essay")), QuestionType::MultipleChoice);
        assert_eq!(parse_question_type(None), QuestionType::MultipleChoice);
        assert_eq!(parse_question_type(Some("CHECKBOX")), QuestionType::MultipleSelect);
        assert_eq!(parse_question_type(Some("boolean")), QuestionType::TrueFalse);
    }
}
