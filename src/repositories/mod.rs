pub mod drafts;
pub mod quizzes;
