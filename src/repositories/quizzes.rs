use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::Quiz;

#[derive(Debug, Error)]
pub enum SaveQuizError {
    #[error("quiz backend rejected the save: {0}")]
    Rejected(String),
    #[error("quiz backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub id: String,
}

/// Remote persistence for finalized quizzes. The core calls `save_quiz` once
/// per explicit save action and never retries on its own; retry is a user
/// re-click with the draft still intact.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn save_quiz(&self, quiz: &Quiz) -> Result<SaveReceipt, SaveQuizError>;
}
