use serde::Serialize;

use crate::domain::models::{Question, Quiz};
use crate::domain::types::QuestionType;

/// Totals that don't land on a multiple of this read as arbitrary to students.
const ROUND_POINTS_STEP: f64 = 5.0;
/// Below this much time per question the limit is probably a typo.
const MIN_SECONDS_PER_QUESTION: u64 = 30;

/// Machine-checkable location of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRef {
    pub question_index: Option<usize>,
    pub answer_index: Option<usize>,
    pub field: &'static str,
}

impl FieldRef {
    pub(crate) fn quiz(field: &'static str) -> Self {
        Self { question_index: None, answer_index: None, field }
    }

    pub(crate) fn question(index: Option<usize>, field: &'static str) -> Self {
        Self { question_index: index, answer_index: None, field }
    }

    pub(crate) fn answer(index: Option<usize>, answer_index: usize, field: &'static str) -> Self {
        Self { question_index: index, answer_index: Some(answer_index), field }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field: FieldRef,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: FieldRef, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Checks a draft quiz against the structural rules. Pure: never mutates its
/// input, and warnings are advisory only and do not affect `is_valid`.
pub fn validate_quiz(quiz: &Quiz) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if quiz.title.trim().is_empty() {
        errors.push(ValidationIssue::new(FieldRef::quiz("title"), "title must not be empty"));
    }
    if quiz.questions.is_empty() {
        errors.push(ValidationIssue::new(
            FieldRef::quiz("questions"),
            "a quiz needs at least one question",
        ));
    }

    if let Some(percent) = quiz.settings.passing_score_percent {
        if percent > 100 {
            errors.push(ValidationIssue::new(
                FieldRef::quiz("settings.passing_score_percent"),
                format!("passing_score_percent must be between 0 and 100, got {percent}"),
            ));
        }
    }
    if quiz.settings.time_limit_minutes == Some(0) {
        errors.push(ValidationIssue::new(
            FieldRef::quiz("settings.time_limit_minutes"),
            "time_limit_minutes must be positive when set",
        ));
    }

    for (index, question) in quiz.questions.iter().enumerate() {
        errors.extend(question_issues(question, Some(index)));
    }

    let total = quiz.total_points();
    if total > 0.0 && !is_round_total(total) {
        warnings.push(ValidationIssue::new(
            FieldRef::quiz("points"),
            format!("total points ({total}) is not a round number"),
        ));
    }

    if let Some(limit) = quiz.settings.time_limit_minutes {
        let question_count = quiz.questions.len() as u64;
        if question_count > 0 && u64::from(limit) * 60 < question_count * MIN_SECONDS_PER_QUESTION
        {
            warnings.push(ValidationIssue::new(
                FieldRef::quiz("settings.time_limit_minutes"),
                format!(
                    "time limit of {limit} minutes is tight for {question_count} questions"
                ),
            ));
        }
    }

    ValidationReport { is_valid: errors.is_empty(), errors, warnings }
}

/// Single-question subset of the rules, used by the editor's save path.
pub fn first_question_issue(question: &Question) -> Option<ValidationIssue> {
    question_issues(question, None).into_iter().next()
}

pub(crate) fn question_issues(question: &Question, index: Option<usize>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if question.text.trim().is_empty() {
        issues.push(ValidationIssue::new(
            FieldRef::question(index, "text"),
            "question text must not be empty",
        ));
    }
    // NaN and infinities would poison the quiz total, so require a finite positive value.
    if !question.points.is_finite() || question.points <= 0.0 {
        issues.push(ValidationIssue::new(
            FieldRef::question(index, "points"),
            "points must be greater than zero",
        ));
    }

    match question.question_type {
        QuestionType::FillBlank => {
            if question.answers.len() != 1 {
                issues.push(ValidationIssue::new(
                    FieldRef::question(index, "answers"),
                    "fill in the blank questions have exactly one accepted answer",
                ));
            } else {
                let accepted = &question.answers[0];
                if accepted.text.trim().is_empty() {
                    issues.push(ValidationIssue::new(
                        FieldRef::answer(index, 0, "text"),
                        "the accepted answer must not be empty",
                    ));
                }
                if !accepted.is_correct {
                    issues.push(ValidationIssue::new(
                        FieldRef::answer(index, 0, "is_correct"),
                        "the accepted answer must be marked correct",
                    ));
                }
            }
        }
        QuestionType::TrueFalse => {
            if question.answers.len() != 2 {
                issues.push(ValidationIssue::new(
                    FieldRef::question(index, "answers"),
                    "true/false questions have exactly two answers",
                ));
            }
            for (answer_index, answer) in question.answers.iter().enumerate() {
                if answer.text.trim().is_empty() {
                    issues.push(ValidationIssue::new(
                        FieldRef::answer(index, answer_index, "text"),
                        "answer text must not be empty",
                    ));
                }
            }
            if question.correct_count() != 1 {
                issues.push(ValidationIssue::new(
                    FieldRef::question(index, "answers"),
                    "exactly one answer must be marked correct",
                ));
            }
        }
        QuestionType::MultipleChoice | QuestionType::MultipleSelect => {
            let kind = question.question_type;
            let count = question.answers.len();
            if count < kind.min_answers() || count > kind.max_answers() {
                issues.push(ValidationIssue::new(
                    FieldRef::question(index, "answers"),
                    format!(
                        "choice questions need between {} and {} answers, got {count}",
                        kind.min_answers(),
                        kind.max_answers()
                    ),
                ));
            }
            for (answer_index, answer) in question.answers.iter().enumerate() {
                if answer.text.trim().is_empty() {
                    issues.push(ValidationIssue::new(
                        FieldRef::answer(index, answer_index, "text"),
                        "answer text must not be empty",
                    ));
                }
            }
            if kind.single_correct() {
                if question.correct_count() != 1 {
                    issues.push(ValidationIssue::new(
                        FieldRef::question(index, "answers"),
                        "exactly one answer must be marked correct",
                    ));
                }
            } else if question.correct_count() == 0 {
                issues.push(ValidationIssue::new(
                    FieldRef::question(index, "answers"),
                    "at least one answer must be marked correct",
                ));
            }
        }
    }

    issues
}

fn is_round_total(total: f64) -> bool {
    let remainder = total % ROUND_POINTS_STEP;
    remainder.abs() < f64::EPSILON || (ROUND_POINTS_STEP - remainder).abs() < f64::EPSILON
}
