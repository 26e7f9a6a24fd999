use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::core::time::primitive_now_utc;
use crate::domain::question_list::QuestionList;
use crate::domain::types::{MaxAttempts, QuestionType};

pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
    pub order: i32,
}

impl Answer {
    pub fn new(text: impl Into<String>, is_correct: bool, order: i32) -> Self {
        Self { id: new_id("ans"), text: text.into(), is_correct, order }
    }

    pub(crate) fn blank(order: i32) -> Self {
        Self::new("", false, order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question_type: QuestionType,
    pub text: String,
    pub points: f64,
    pub order: i32,
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    pub fn correct_answer_ids(&self) -> Vec<&str> {
        self.answers
            .iter()
            .filter(|answer| answer.is_correct)
            .map(|answer| answer.id.as_str())
            .collect()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub time_limit_minutes: Option<u32>,
    pub auto_submit_on_timeout: bool,
    pub max_attempts: MaxAttempts,
    pub allow_review: bool,
    pub shuffle_questions: bool,
    pub shuffle_answers: bool,
    pub show_results_immediately: bool,
    pub show_correct_answers: bool,
    pub passing_score_percent: Option<u8>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit_minutes: None,
            auto_submit_on_timeout: false,
            max_attempts: MaxAttempts::default(),
            allow_review: true,
            shuffle_questions: false,
            shuffle_answers: false,
            show_results_immediately: true,
            show_correct_answers: true,
            passing_score_percent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub assignment_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub settings: QuizSettings,
    pub questions: QuestionList,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl Quiz {
    pub fn new(assignment_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = primitive_now_utc();
        Self {
            id: new_id("quiz"),
            assignment_id: assignment_id.into(),
            title: title.into(),
            description: None,
            settings: QuizSettings::default(),
            questions: QuestionList::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Derived on every call; never stored alongside its source.
    pub fn total_points(&self) -> f64 {
        self.questions.total_points()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = primitive_now_utc();
    }
}
