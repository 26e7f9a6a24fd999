use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use crate::core::config::Settings;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{Question, Quiz};
use crate::repositories::drafts::DraftStore;
use crate::repositories::quizzes::{QuizBackend, SaveQuizError, SaveReceipt};
use crate::schemas::quiz::{QuizDraftSnapshot, QuizMetadataUpdate, QuizSettingsPatch};
use crate::services::quiz_import::{self, ImportError, ImportSummary};
use crate::services::validation::{validate_quiz, ValidationReport};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("quiz draft failed validation")]
    Invalid(ValidationReport),
    #[error(transparent)]
    Backend(#[from] SaveQuizError),
}

/// One user's editing session for one assignment's quiz. The session owns the
/// draft exclusively; nothing else mutates it while the session is alive.
pub struct EditorSession {
    quiz: Quiz,
    draft_key: String,
    max_import_questions: usize,
    drafts: Arc<dyn DraftStore>,
    backend: Arc<dyn QuizBackend>,
}

impl EditorSession {
    /// Opens the session, reading the draft store once. A missing or broken
    /// draft starts a fresh quiz; draft store trouble is never fatal here.
    pub async fn mount(
        settings: &Settings,
        assignment_id: &str,
        drafts: Arc<dyn DraftStore>,
        backend: Arc<dyn QuizBackend>,
    ) -> Self {
        let draft_key = format!("{}:{assignment_id}", settings.editor().draft_key_prefix);

        let quiz = match drafts.get(&draft_key).await {
            Ok(Some(snapshot)) if snapshot.quiz.assignment_id == assignment_id => {
                tracing::info!(assignment_id, "Restored quiz draft from autosave store");
                let mut quiz = snapshot.quiz;
                // Stored drafts may predate the contiguity invariant.
                let questions = std::mem::take(&mut quiz.questions).into_questions();
                quiz.questions = crate::domain::question_list::QuestionList::from_questions(questions);
                quiz
            }
            Ok(Some(_)) => {
                tracing::warn!(assignment_id, "Draft belongs to another assignment; starting fresh");
                Quiz::new(assignment_id, "")
            }
            Ok(None) => Quiz::new(assignment_id, ""),
            Err(err) => {
                tracing::warn!(assignment_id, error = %err, "Failed to read draft; starting fresh");
                Quiz::new(assignment_id, "")
            }
        };

        Self {
            quiz,
            draft_key,
            max_import_questions: settings.editor().max_import_questions,
            drafts,
            backend,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn update_metadata(
        &mut self,
        update: QuizMetadataUpdate,
    ) -> Result<(), validator::ValidationErrors> {
        update.validate()?;
        if let Some(title) = update.title {
            self.quiz.title = title;
        }
        if update.clear_description {
            self.quiz.description = None;
        } else if let Some(description) = update.description {
            self.quiz.description = Some(description);
        }
        self.quiz.touch();
        Ok(())
    }

    pub fn update_settings(
        &mut self,
        patch: QuizSettingsPatch,
    ) -> Result<(), validator::ValidationErrors> {
        patch.validate()?;
        patch.apply(&mut self.quiz.settings);
        self.quiz.touch();
        Ok(())
    }

    /// Accepts a finalized question from the question editor: edits replace in
    /// place, new questions are appended at the end of the list.
    pub fn apply_question(&mut self, question: Question) {
        self.quiz.questions.upsert(question);
        self.quiz.touch();
    }

    pub fn remove_question(&mut self, index: usize) -> Option<Question> {
        let removed = self.quiz.questions.remove(index);
        if removed.is_some() {
            self.quiz.touch();
        }
        removed
    }

    pub fn duplicate_question(&mut self, index: usize) -> bool {
        let duplicated = self.quiz.questions.duplicate(index).is_some();
        if duplicated {
            self.quiz.touch();
        }
        duplicated
    }

    pub fn reorder_questions(&mut self, ordered_ids: &[String]) -> bool {
        let reordered = self.quiz.questions.reorder(ordered_ids);
        if reordered {
            self.quiz.touch();
        }
        reordered
    }

    /// Runs the externally parsed question payload through defensive admission.
    /// An unparseable or oversized payload aborts with the list untouched.
    pub fn import_questions(&mut self, payload: &str) -> Result<ImportSummary, ImportError> {
        let items = quiz_import::parse_question_payload(payload)?;
        if items.len() > self.max_import_questions {
            return Err(ImportError::TooManyQuestions {
                limit: self.max_import_questions,
                actual: items.len(),
            });
        }
        let summary = quiz_import::admit_questions(&mut self.quiz.questions, items);
        if summary.imported > 0 {
            self.quiz.touch();
        }
        tracing::info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Question import finished"
        );
        Ok(summary)
    }

    pub fn validate(&self) -> ValidationReport {
        validate_quiz(&self.quiz)
    }

    pub fn export(&self) -> crate::schemas::quiz::QuizExport {
        crate::schemas::quiz::QuizExport::from(&self.quiz)
    }

    /// Fire-and-forget snapshot write. Failures are logged and swallowed; the
    /// interactive editing flow must never notice them.
    pub async fn autosave_tick(&self) {
        let snapshot = QuizDraftSnapshot { quiz: self.quiz.clone(), saved_at: primitive_now_utc() };
        match self.drafts.put(&self.draft_key, &snapshot).await {
            Ok(()) => {
                metrics::counter!("quiz_autosave_total", "outcome" => "ok").increment(1);
            }
            Err(err) => {
                metrics::counter!("quiz_autosave_total", "outcome" => "error").increment(1);
                tracing::warn!(key = %self.draft_key, error = %err, "Autosave failed");
            }
        }
    }

    /// Explicit save: validation pass, then exactly one backend call. On any
    /// failure the draft is left unchanged so a user re-click can retry.
    pub async fn save(&mut self) -> Result<SaveReceipt, SaveError> {
        let report = self.validate();
        if !report.is_valid {
            return Err(SaveError::Invalid(report));
        }

        match self.backend.save_quiz(&self.quiz).await {
            Ok(receipt) => {
                self.quiz.id = receipt.id.clone();
                self.quiz.touch();
                self.autosave_tick().await;
                metrics::counter!("quiz_save_total", "outcome" => "ok").increment(1);
                tracing::info!(quiz_id = %receipt.id, "Quiz saved");
                Ok(receipt)
            }
            Err(err) => {
                // Preserve the draft so nothing is lost before the retry.
                self.autosave_tick().await;
                metrics::counter!("quiz_save_total", "outcome" => "error").increment(1);
                tracing::warn!(error = %err, "Quiz save failed; draft retained");
                Err(SaveError::Backend(err))
            }
        }
    }
}
