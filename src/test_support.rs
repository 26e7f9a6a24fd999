use crate::domain::models::{new_id, Answer, Question, Quiz};
use crate::domain::types::{QuestionType, FALSE_LABEL, TRUE_LABEL};

pub(crate) fn mc_question(text: &str, points: f64) -> Question {
    Question {
        id: new_id("q"),
        question_type: QuestionType::MultipleChoice,
        text: text.to_string(),
        points,
        order: 0,
        answers: vec![
            Answer::new("Paris", true, 0),
            Answer::new("London", false, 1),
            Answer::new("Berlin", false, 2),
        ],
        explanation: None,
    }
}

pub(crate) fn ms_question(text: &str, points: f64) -> Question {
    Question {
        id: new_id("q"),
        question_type: QuestionType::MultipleSelect,
        text: text.to_string(),
        points,
        order: 0,
        answers: vec![
            Answer::new("2", true, 0),
            Answer::new("3", true, 1),
            Answer::new("4", false, 2),
            Answer::new("5", true, 3),
        ],
        explanation: None,
    }
}

pub(crate) fn tf_question(text: &str, truth: bool, points: f64) -> Question {
    Question {
        id: new_id("q"),
        question_type: QuestionType::TrueFalse,
        text: text.to_string(),
        points,
        order: 0,
        answers: vec![
            Answer::new(TRUE_LABEL, truth, 0),
            Answer::new(FALSE_LABEL, !truth, 1),
        ],
        explanation: None,
    }
}

pub(crate) fn fb_question(text: &str, accepted: &str, points: f64) -> Question {
    Question {
        id: new_id("q"),
        question_type: QuestionType::FillBlank,
        text: text.to_string(),
        points,
        order: 0,
        answers: vec![Answer::new(accepted, true, 0)],
        explanation: None,
    }
}

pub(crate) fn sample_quiz() -> Quiz {
    let mut quiz = Quiz::new("assignment-1", "Sample quiz");
    quiz.questions.add(mc_question("Capital of France?", 10.0));
    quiz
}
