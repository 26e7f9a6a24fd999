use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use validator::Validate;

use crate::core::time::format_primitive;
use crate::domain::models::{Question, Quiz, QuizSettings};
use crate::domain::types::MaxAttempts;

/// Full draft state written to the autosave store on every tick and read back
/// once at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDraftSnapshot {
    pub quiz: Quiz,
    pub saved_at: PrimitiveDateTime,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuizMetadataUpdate {
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "clearDescription")]
    pub clear_description: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuizSettingsPatch {
    #[serde(default, alias = "timeLimitMinutes")]
    #[validate(range(min = 1, message = "time_limit_minutes must be positive"))]
    pub time_limit_minutes: Option<u32>,
    #[serde(default, alias = "clearTimeLimit")]
    pub clear_time_limit: bool,
    #[serde(default, alias = "autoSubmitOnTimeout")]
    pub auto_submit_on_timeout: Option<bool>,
    #[serde(default, alias = "maxAttempts")]
    pub max_attempts: Option<MaxAttempts>,
    #[serde(default, alias = "allowReview")]
    pub allow_review: Option<bool>,
    #[serde(default, alias = "shuffleQuestions")]
    pub shuffle_questions: Option<bool>,
    #[serde(default, alias = "shuffleAnswers")]
    pub shuffle_answers: Option<bool>,
    #[serde(default, alias = "showResultsImmediately")]
    pub show_results_immediately: Option<bool>,
    #[serde(default, alias = "showCorrectAnswers")]
    pub show_correct_answers: Option<bool>,
    #[serde(default, alias = "passingScorePercent")]
    #[validate(range(min = 0, max = 100, message = "passing_score_percent must be between 0 and 100"))]
    pub passing_score_percent: Option<u8>,
    #[serde(default, alias = "clearPassingScore")]
    pub clear_passing_score: bool,
}

impl QuizSettingsPatch {
    pub(crate) fn apply(&self, settings: &mut QuizSettings) {
        if self.clear_time_limit {
            settings.time_limit_minutes = None;
        } else if let Some(limit) = self.time_limit_minutes {
            settings.time_limit_minutes = Some(limit);
        }
        if let Some(value) = self.auto_submit_on_timeout {
            settings.auto_submit_on_timeout = value;
        }
        if let Some(value) = self.max_attempts {
            settings.max_attempts = value;
        }
        if let Some(value) = self.allow_review {
            settings.allow_review = value;
        }
        if let Some(value) = self.shuffle_questions {
            settings.shuffle_questions = value;
        }
        if let Some(value) = self.shuffle_answers {
            settings.shuffle_answers = value;
        }
        if let Some(value) = self.show_results_immediately {
            settings.show_results_immediately = value;
        }
        if let Some(value) = self.show_correct_answers {
            settings.show_correct_answers = value;
        }
        if self.clear_passing_score {
            settings.passing_score_percent = None;
        } else if let Some(percent) = self.passing_score_percent {
            settings.passing_score_percent = Some(percent);
        }
    }
}

/// Export serializes the current quiz shape verbatim, plus the derived total
/// and RFC3339 timestamps for consumers outside the editing session.
#[derive(Debug, Clone, Serialize)]
pub struct QuizExport {
    pub id: String,
    pub assignment_id: String,
    pub title: String,
    pub description: Option<String>,
    pub settings: QuizSettings,
    pub questions: Vec<Question>,
    pub total_points: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Quiz> for QuizExport {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            assignment_id: quiz.assignment_id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            settings: quiz.settings.clone(),
            questions: quiz.questions.as_slice().to_vec(),
            total_points: quiz.total_points(),
            created_at: format_primitive(quiz.created_at),
            updated_at: format_primitive(quiz.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mc_question, sample_quiz};

    #[test]
    fn settings_patch_applies_only_present_fields() {
        let mut settings = QuizSettings::default();
        let patch: QuizSettingsPatch = serde_json::from_str(
            r#"{"timeLimitMinutes": 30, "shuffleQuestions": true, "passingScorePercent": 70}"#,
        )
        .unwrap();
        patch.apply(&mut settings);

        assert_eq!(settings.time_limit_minutes, Some(30));
        assert!(settings.shuffle_questions);
        assert_eq!(settings.passing_score_percent, Some(70));
        // Untouched fields keep their defaults.
        assert!(settings.allow_review);
        assert_eq!(settings.max_attempts, MaxAttempts::Limited(1));
    }

    #[test]
    fn settings_patch_clear_flags_reset_optionals() {
        let mut settings = QuizSettings::default();
        settings.time_limit_minutes = Some(30);
        settings.passing_score_percent = Some(70);

        let patch: QuizSettingsPatch =
            serde_json::from_str(r#"{"clearTimeLimit": true, "clearPassingScore": true}"#).unwrap();
        patch.apply(&mut settings);

        assert_eq!(settings.time_limit_minutes, None);
        assert_eq!(settings.passing_score_percent, None);
    }

    #[test]
    fn settings_patch_validates_ranges() {
        let patch: QuizSettingsPatch =
            serde_json::from_str(r#"{"timeLimitMinutes": 0}"#).unwrap();
        assert!(patch.validate().is_err());

        let patch: QuizSettingsPatch =
            serde_json::from_str(r#"{"passingScorePercent": 100}"#).unwrap();
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn export_carries_derived_total_and_formatted_timestamps() {
        let mut quiz = sample_quiz();
        quiz.questions.add(mc_question("Q2", 5.0));

        let export = QuizExport::from(&quiz);
        assert_eq!(export.total_points, 15.0);
        assert_eq!(export.questions.len(), 2);
        assert!(export.created_at.ends_with('Z'));

        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(value["total_points"], 15.0);
    }

    #[test]
    fn draft_snapshot_roundtrips() {
        let snapshot = QuizDraftSnapshot {
            quiz: sample_quiz(),
            saved_at: crate::core::time::primitive_now_utc(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: QuizDraftSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
