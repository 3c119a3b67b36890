use crate::utils::error::{EduError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element ids of the preference form and the results container.
pub mod element_ids {
    pub const PREFERENCE_FORM: &str = "preferenceForm";
    pub const INTERESTS: &str = "interests";
    pub const DIFFICULTY: &str = "difficulty";
    pub const LEARNING_STYLE: &str = "learningStyle";
    pub const AVAILABLE_TIME: &str = "availableTime";
    pub const RESULTS: &str = "results";
}

/// Difficulty level. Parsed case-insensitively, serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Number of levels between two difficulties (0, 1 or 2).
    pub fn distance(&self, other: Difficulty) -> u8 {
        (*self as u8).abs_diff(other as u8)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(EduError::invalid_input(
                "difficulty",
                s,
                "expected beginner, intermediate or advanced",
            )),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = EduError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.as_str().to_string()
    }
}

/// Learning style of a learner or a resource. Unknown styles are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LearningStyle {
    Visual,
    Kinesthetic,
    Theoretical,
    Other(String),
}

impl LearningStyle {
    pub fn as_str(&self) -> &str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Kinesthetic => "kinesthetic",
            LearningStyle::Theoretical => "theoretical",
            LearningStyle::Other(raw) => raw,
        }
    }
}

impl From<&str> for LearningStyle {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "visual" => LearningStyle::Visual,
            "kinesthetic" => LearningStyle::Kinesthetic,
            "theoretical" => LearningStyle::Theoretical,
            _ => LearningStyle::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for LearningStyle {
    fn from(value: String) -> Self {
        LearningStyle::from(value.as_str())
    }
}

impl From<LearningStyle> for String {
    fn from(style: LearningStyle) -> Self {
        match style {
            LearningStyle::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub interests: Vec<String>,
    pub difficulty: Difficulty,
    pub learning_style: LearningStyle,
    pub available_time: u32,
}

/// A catalog entry before it has been scored against a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResource {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub estimated_time: u32,
    pub learning_style: LearningStyle,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub estimated_time: u32,
    pub learning_style: LearningStyle,
    pub similarity_score: f64,
}

impl LearningResource {
    pub fn scored(resource: &CatalogResource, similarity_score: f64) -> Self {
        Self {
            title: resource.title.clone(),
            description: resource.description.clone(),
            subject: resource.subject.clone(),
            difficulty: resource.difficulty,
            estimated_time: resource.estimated_time,
            learning_style: resource.learning_style.clone(),
            similarity_score: similarity_score.clamp(0.0, 1.0),
        }
    }
}

/// Ranked learning path. Counters are derived from the path on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathResult {
    learning_path: Vec<LearningResource>,
    resources_count: usize,
    total_estimated_time: u32,
}

impl LearningPathResult {
    pub fn new(learning_path: Vec<LearningResource>) -> Self {
        let resources_count = learning_path.len();
        let total_estimated_time = learning_path
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.estimated_time));
        Self {
            learning_path,
            resources_count,
            total_estimated_time,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn learning_path(&self) -> &[LearningResource] {
        &self.learning_path
    }

    pub fn resources_count(&self) -> usize {
        self.resources_count
    }

    pub fn total_estimated_time(&self) -> u32 {
        self.total_estimated_time
    }

    pub fn is_empty(&self) -> bool {
        self.learning_path.is_empty()
    }

    /// Checks the counters of a result that came from outside the crate (e.g. JSON).
    pub fn validate(&self) -> Result<()> {
        if self.resources_count != self.learning_path.len() {
            return Err(EduError::CatalogError {
                message: format!(
                    "resourcesCount is {} but the path holds {} resources",
                    self.resources_count,
                    self.learning_path.len()
                ),
            });
        }

        let total = self
            .learning_path
            .iter()
            .try_fold(0u32, |acc, r| acc.checked_add(r.estimated_time))
            .ok_or_else(|| EduError::CatalogError {
                message: "estimatedTime values overflow the total".to_string(),
            })?;
        if self.total_estimated_time != total {
            return Err(EduError::CatalogError {
                message: format!(
                    "totalEstimatedTime is {} but resources add up to {}",
                    self.total_estimated_time, total
                ),
            });
        }

        if let Some(bad) = self
            .learning_path
            .iter()
            .find(|r| !(0.0..=1.0).contains(&r.similarity_score))
        {
            return Err(EduError::CatalogError {
                message: format!(
                    "similarityScore {} of '{}' is outside [0, 1]",
                    bad.similarity_score, bad.title
                ),
            });
        }

        Ok(())
    }
}
