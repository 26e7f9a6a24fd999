use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::models::{Question, Quiz};
use crate::domain::types::QuestionType;

/// What the preview run collected for one question: selected answer ids for
/// choice types, free text for fill in the blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Selected(Vec<String>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionScore {
    pub question_id: String,
    pub earned: f64,
    pub possible: f64,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub earned: f64,
    pub possible: f64,
    pub percent: u32,
    pub passed: Option<bool>,
    pub question_scores: Vec<QuestionScore>,
}

/// Scores a set of user answers against the quiz. Pure and deterministic;
/// every question is all-or-nothing, with no partial credit anywhere.
pub fn score_quiz(quiz: &Quiz, submitted: &HashMap<String, SubmittedAnswer>) -> ScoreSummary {
    let mut earned = 0.0;
    let mut question_scores = Vec::with_capacity(quiz.questions.len());

    for question in quiz.questions.iter() {
        let correct = submitted
            .get(&question.id)
            .map(|answer| is_correct_submission(question, answer))
            .unwrap_or(false);
        let score = if correct { question.points } else { 0.0 };
        earned += score;
        question_scores.push(QuestionScore {
            question_id: question.id.clone(),
            earned: score,
            possible: question.points,
            correct,
        });
    }

    let possible = quiz.total_points();
    let percent =
        if possible > 0.0 { (earned / possible * 100.0).round() as u32 } else { 0 };
    let passed = quiz
        .settings
        .passing_score_percent
        .map(|threshold| percent >= u32::from(threshold));

    ScoreSummary { earned, possible, percent, passed, question_scores }
}

fn is_correct_submission(question: &Question, submitted: &SubmittedAnswer) -> bool {
    match (question.question_type, submitted) {
        (QuestionType::MultipleChoice | QuestionType::TrueFalse, SubmittedAnswer::Selected(ids)) => {
            let correct = question.correct_answer_ids();
            ids.len() == 1 && correct.len() == 1 && ids[0] == correct[0]
        }
        (QuestionType::MultipleSelect, SubmittedAnswer::Selected(ids)) => {
            let selected: HashSet<&str> = ids.iter().map(String::as_str).collect();
            let correct: HashSet<&str> = question.correct_answer_ids().into_iter().collect();
            !correct.is_empty() && selected == correct
        }
        (QuestionType::FillBlank, SubmittedAnswer::Text(text)) => question
            .answers
            .first()
            .map(|accepted| {
                accepted.text.trim().to_lowercase() == text.trim().to_lowercase()
            })
            .unwrap_or(false),
        // Wrong payload kind for the question type scores nothing.
        _ => false,
    }
}
