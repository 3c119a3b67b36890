use crate::core::{FormFields, UserPreferences};
use crate::domain::model::{element_ids, Difficulty, LearningStyle};
use crate::utils::error::{EduError, Result};
use std::collections::HashSet;

/// Builds a [`UserPreferences`] record from the preference form.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceExtractor;

impl PreferenceExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract<F: FormFields + ?Sized>(&self, form: &F) -> Result<UserPreferences> {
        let interests = parse_interests(&required(form, element_ids::INTERESTS)?);
        let difficulty: Difficulty = required(form, element_ids::DIFFICULTY)?.parse()?;
        let learning_style = LearningStyle::from(required(form, element_ids::LEARNING_STYLE)?);
        let available_time = parse_available_time(&required(form, element_ids::AVAILABLE_TIME)?)?;

        tracing::debug!(
            "Extracted preferences: {} interests, {}, {}, {} min",
            interests.len(),
            difficulty,
            learning_style,
            available_time
        );

        Ok(UserPreferences {
            interests,
            difficulty,
            learning_style,
            available_time,
        })
    }
}

fn required<F: FormFields + ?Sized>(form: &F, id: &str) -> Result<String> {
    form.field_value(id)
        .ok_or_else(|| EduError::MissingElement { id: id.to_string() })
}

/// Splits a comma separated list, trimming entries and dropping empty or
/// repeated (case-insensitive) ones. Order of first appearance is kept.
pub fn parse_interests(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Reads the leading integer of the input, ignoring trailing text ("90 min" is 90).
pub fn parse_available_time(raw: &str) -> Result<u32> {
    let field = element_ids::AVAILABLE_TIME;
    let trimmed = raw.trim_start();

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_len];

    if digits.is_empty() {
        return Err(EduError::invalid_input(field, raw, "expected a whole number of minutes"));
    }

    let minutes: u32 = digits
        .parse()
        .map_err(|_| EduError::invalid_input(field, raw, "number of minutes is too large"))?;

    if negative && minutes > 0 {
        return Err(EduError::invalid_input(field, raw, "time budget cannot be negative"));
    }

    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn form(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_interests_trims_and_drops_empty() {
        assert_eq!(parse_interests("python, AI,  , ml"), vec!["python", "AI", "ml"]);
        assert!(parse_interests("").is_empty());
        assert!(parse_interests(" , ,").is_empty());
    }

    #[test]
    fn test_parse_interests_deduplicates_case_insensitively() {
        assert_eq!(parse_interests("Rust, rust , Go, RUST"), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_parse_available_time() {
        assert_eq!(parse_available_time("120").unwrap(), 120);
        assert_eq!(parse_available_time("  90 min").unwrap(), 90);
        assert_eq!(parse_available_time("+45").unwrap(), 45);
        assert_eq!(parse_available_time("-0").unwrap(), 0);
        assert!(parse_available_time("").is_err());
        assert!(parse_available_time("abc").is_err());
        assert!(parse_available_time("-30").is_err());
        assert!(parse_available_time("99999999999").is_err());
    }

    #[test]
    fn test_extract_full_form() {
        let form = form(&[
            ("interests", "python, AI,  , ml"),
            ("difficulty", "Intermediate"),
            ("learningStyle", "kinesthetic"),
            ("availableTime", "180"),
        ]);

        let prefs = PreferenceExtractor::new().extract(&form).unwrap();

        assert_eq!(prefs.interests, vec!["python", "AI", "ml"]);
        assert_eq!(prefs.difficulty, Difficulty::Intermediate);
        assert_eq!(prefs.learning_style, LearningStyle::Kinesthetic);
        assert_eq!(prefs.available_time, 180);
    }

    #[test]
    fn test_missing_element_is_reported_by_id() {
        let form = form(&[("interests", "python"), ("difficulty", "beginner"), ("learningStyle", "visual")]);

        match PreferenceExtractor::new().extract(&form) {
            Err(EduError::MissingElement { id }) => assert_eq!(id, "availableTime"),
            other => panic!("expected missing element, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_style_is_accepted() {
        let form = form(&[
            ("interests", ""),
            ("difficulty", "advanced"),
            ("learningStyle", "auditory"),
            ("availableTime", "0"),
        ]);

        let prefs = PreferenceExtractor::new().extract(&form).unwrap();
        assert!(prefs.interests.is_empty());
        assert_eq!(prefs.learning_style, LearningStyle::Other("auditory".to_string()));
        assert_eq!(prefs.available_time, 0);
    }
}
