use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const TRUE_LABEL: &str = "True";
pub const FALSE_LABEL: &str = "False";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    MultipleSelect,
    TrueFalse,
    FillBlank,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::MultipleSelect => "multiple_select",
            QuestionType::TrueFalse => "true_false",
            QuestionType::FillBlank => "fill_blank",
        }
    }

    pub fn min_answers(self) -> usize {
        match self {
            QuestionType::MultipleChoice | QuestionType::MultipleSelect => 2,
            QuestionType::TrueFalse => 2,
            QuestionType::FillBlank => 1,
        }
    }

    pub fn max_answers(self) -> usize {
        match self {
            QuestionType::MultipleChoice | QuestionType::MultipleSelect => 6,
            QuestionType::TrueFalse => 2,
            QuestionType::FillBlank => 1,
        }
    }

    /// Answer rows are generated by the editor and cannot be added or removed.
    pub fn fixed_answers(self) -> bool {
        matches!(self, QuestionType::TrueFalse | QuestionType::FillBlank)
    }

    /// Marking one answer correct clears correctness on the rest.
    pub fn single_correct(self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::TrueFalse)
    }
}

/// Attempt ceiling for a quiz. The original model stores either a positive
/// count or the string sentinel "unlimited", so both wire shapes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAttempts {
    Limited(u32),
    Unlimited,
}

impl Default for MaxAttempts {
    fn default() -> Self {
        MaxAttempts::Limited(1)
    }
}

impl Serialize for MaxAttempts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MaxAttempts::Limited(count) => serializer.serialize_u32(*count),
            MaxAttempts::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for MaxAttempts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Sentinel(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(count) if count >= 1 => Ok(MaxAttempts::Limited(count)),
            Raw::Count(count) => {
                Err(D::Error::custom(format!("max_attempts must be positive, got {count}")))
            }
            Raw::Sentinel(value) if value.eq_ignore_ascii_case("unlimited") => {
                Ok(MaxAttempts::Unlimited)
            }
            Raw::Sentinel(value) => {
                Err(D::Error::custom(format!("invalid max_attempts sentinel: {value}")))
            }
        }
    }
}
