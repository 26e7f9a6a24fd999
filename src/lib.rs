pub mod core;
pub mod domain;
pub mod repositories;
pub mod schemas;
pub mod services;
pub mod tasks;

#[cfg(test)]
mod test_support;

pub use crate::core::config::Settings;
pub use crate::domain::models::{Answer, Question, Quiz, QuizSettings};
pub use crate::domain::question_list::QuestionList;
pub use crate::domain::types::{MaxAttempts, QuestionType};
pub use crate::repositories::drafts::{DraftStore, InMemoryDraftStore};
pub use crate::repositories::quizzes::{QuizBackend, SaveQuizError, SaveReceipt};
pub use crate::services::editor_session::{EditorSession, SaveError};
pub use crate::services::question_editor::QuestionEditor;
pub use crate::services::quiz_import::{ImportError, ImportSummary};
pub use crate::services::scoring::{score_quiz, ScoreSummary, SubmittedAnswer};
pub use crate::services::validation::{validate_quiz, ValidationIssue, ValidationReport};
