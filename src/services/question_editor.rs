use crate::domain::models::{new_id, Answer, Question};
use crate::domain::types::{QuestionType, FALSE_LABEL, TRUE_LABEL};
use crate::services::validation::{first_question_issue, ValidationIssue};

const DEFAULT_POINTS: f64 = 1.0;

#[derive(Debug, Clone)]
enum EditorMode {
    Creating,
    Editing { id: String, order: i32 },
}

/// Per-question create/edit state machine. The editor owns only its own draft
/// fields; list placement is the caller's concern. A failed save leaves the
/// draft untouched so the user can keep editing.
#[derive(Debug, Clone)]
pub struct QuestionEditor {
    mode: EditorMode,
    question_type: QuestionType,
    text: String,
    points: f64,
    answers: Vec<Answer>,
    explanation: Option<String>,
}

impl QuestionEditor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Creating,
            question_type: QuestionType::MultipleChoice,
            text: String::new(),
            points: DEFAULT_POINTS,
            answers: vec![Answer::blank(0), Answer::blank(1)],
            explanation: None,
        }
    }

    pub fn edit(question: &Question) -> Self {
        Self {
            mode: EditorMode::Editing { id: question.id.clone(), order: question.order },
            question_type: question.question_type,
            text: question.text.clone(),
            points: question.points,
            answers: question.answers.clone(),
            explanation: question.explanation.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing { .. })
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_points(&mut self, points: f64) {
        self.points = points;
    }

    pub fn set_explanation(&mut self, explanation: Option<String>) {
        self.explanation = explanation.filter(|value| !value.trim().is_empty());
    }

    /// Switches the draft's question type, rebuilding the answer list where the
    /// target type dictates a fixed shape. Switching between the two choice
    /// types keeps every existing answer.
    pub fn set_type(&mut self, new_type: QuestionType) {
        if new_type == self.question_type {
            return;
        }

        match new_type {
            QuestionType::TrueFalse => {
                // User still has to pick which side is correct.
                self.answers = vec![
                    Answer::new(TRUE_LABEL, false, 0),
                    Answer::new(FALSE_LABEL, false, 1),
                ];
            }
            QuestionType::FillBlank => {
                self.answers = vec![Answer::new("", true, 0)];
            }
            QuestionType::MultipleChoice | QuestionType::MultipleSelect => {
                while self.answers.len() < new_type.min_answers() {
                    self.answers.push(Answer::blank(self.answers.len() as i32));
                }
                if new_type.single_correct() {
                    self.keep_first_correct();
                }
            }
        }

        self.question_type = new_type;
        self.renumber_answers();
    }

    pub fn add_answer(&mut self) {
        if self.question_type.fixed_answers()
            || self.answers.len() >= self.question_type.max_answers()
        {
            return;
        }
        self.answers.push(Answer::blank(self.answers.len() as i32));
    }

    pub fn remove_answer(&mut self, index: usize) {
        if self.question_type.fixed_answers()
            || self.answers.len() <= self.question_type.min_answers()
            || index >= self.answers.len()
        {
            return;
        }
        self.answers.remove(index);
        self.renumber_answers();
    }

    pub fn set_answer_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(answer) = self.answers.get_mut(index) {
            answer.text = text.into();
        }
    }

    /// Radio semantics for single-correct types; independent toggles for
    /// multiple-select. Fill-blank answers stay correct no matter what.
    pub fn toggle_correct(&mut self, index: usize, value: bool) {
        if index >= self.answers.len() || self.question_type == QuestionType::FillBlank {
            return;
        }

        if self.question_type.single_correct() && value {
            for answer in &mut self.answers {
                answer.is_correct = false;
            }
        }
        self.answers[index].is_correct = value;
    }

    /// Validates the draft and emits a finalized question. The first violated
    /// rule is reported as a user-facing message; the editor state is left
    /// unchanged either way.
    pub fn save(&self) -> Result<Question, ValidationIssue> {
        let question = self.to_question();
        if let Some(issue) = first_question_issue(&question) {
            return Err(issue);
        }
        Ok(question)
    }

    fn to_question(&self) -> Question {
        let (id, order) = match &self.mode {
            EditorMode::Editing { id, order } => (id.clone(), *order),
            // Appended questions get their final order from the list.
            EditorMode::Creating => (new_id("q"), 0),
        };
        Question {
            id,
            question_type: self.question_type,
            text: self.text.clone(),
            points: self.points,
            order,
            answers: self.answers.clone(),
            explanation: self.explanation.clone(),
        }
    }

    fn keep_first_correct(&mut self) {
        let mut seen = false;
        for answer in &mut self.answers {
            if answer.is_correct {
                if seen {
                    answer.is_correct = false;
                }
                seen = true;
            }
        }
    }

    fn renumber_answers(&mut self) {
        for (index, answer) in self.answers.iter_mut().enumerate() {
            answer.order = index as i32;
        }
    }
}

impl Default for QuestionEditor {
    fn default() -> Self {
        Self::create()
    }
}
