use crate::config::toml_config::RecommenderConfig;
use crate::core::{CatalogResource, CatalogSource, LearningPathResult, LearningResource, Recommender, UserPreferences};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Interest score used when the learner named no interests.
const NEUTRAL_INTEREST_SCORE: f64 = 0.5;

/// Content-based recommender over a catalog loaded from a [`CatalogSource`].
///
/// Each resource is scored against the profile by interest overlap,
/// difficulty proximity and learning-style match. Resources are then
/// ranked by score and packed greedily into the learner's time budget.
pub struct ContentRecommender<S: CatalogSource> {
    source: S,
    settings: RecommenderConfig,
    catalog: Option<Vec<CatalogResource>>,
}

impl<S: CatalogSource> ContentRecommender<S> {
    pub fn new(source: S, settings: RecommenderConfig) -> Self {
        Self {
            source,
            settings,
            catalog: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn score(&self, resource: &CatalogResource, preferences: &UserPreferences) -> f64 {
        let s = &self.settings;
        let total_weight = s.interest_weight + s.difficulty_weight + s.style_weight;
        if total_weight <= 0.0 {
            return 0.0;
        }

        let weighted = s.interest_weight * interest_match(&preferences.interests, resource)
            + s.difficulty_weight * difficulty_match(resource, preferences)
            + s.style_weight * style_match(resource, preferences);

        (weighted / total_weight).clamp(0.0, 1.0)
    }

    fn rank<'a>(
        &self,
        catalog: &'a [CatalogResource],
        preferences: &UserPreferences,
    ) -> Vec<(f64, &'a CatalogResource)> {
        let mut ranked: Vec<(f64, &CatalogResource)> = catalog
            .iter()
            .map(|resource| (self.score(resource, preferences), resource))
            .filter(|(score, _)| *score >= self.settings.min_similarity)
            .collect();

        ranked.sort_by(|(a_score, a), (b_score, b)| {
            b_score
                .partial_cmp(a_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.estimated_time.cmp(&b.estimated_time))
                .then_with(|| a.title.cmp(&b.title))
        });
        ranked
    }
}

#[async_trait]
impl<S: CatalogSource> Recommender for ContentRecommender<S> {
    async fn load_data(&mut self) -> Result<()> {
        tracing::info!("📚 Loading catalog from {}", self.source.describe());
        let catalog = self.source.load_catalog().await?;

        if catalog.is_empty() {
            tracing::warn!("Catalog is empty, every learning path will be empty");
        } else {
            tracing::info!("Loaded {} learning resources", catalog.len());
        }

        self.catalog = Some(catalog);
        Ok(())
    }

    fn generate_learning_sequence(&self, preferences: &UserPreferences) -> LearningPathResult {
        let Some(catalog) = self.catalog.as_deref() else {
            tracing::warn!("Recommendation requested before catalog was loaded");
            return LearningPathResult::empty();
        };

        let ranked = self.rank(catalog, preferences);
        tracing::debug!(
            "{} of {} resources passed the similarity threshold {}",
            ranked.len(),
            catalog.len(),
            self.settings.min_similarity
        );

        // 依排名貪婪地放入時間預算
        let mut remaining = preferences.available_time;
        let mut path = Vec::new();
        for (score, resource) in ranked {
            if path.len() >= self.settings.max_resources {
                break;
            }
            if resource.estimated_time <= remaining {
                remaining -= resource.estimated_time;
                path.push(LearningResource::scored(resource, score));
            }
        }

        let result = LearningPathResult::new(path);
        tracing::debug!(
            "Learning path: {} resources, {} of {} minutes",
            result.resources_count(),
            result.total_estimated_time(),
            preferences.available_time
        );
        result
    }
}

/// Lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Fraction of interests whose tokens all appear in the resource's subject, title or tags.
pub fn interest_match(interests: &[String], resource: &CatalogResource) -> f64 {
    if interests.is_empty() {
        return NEUTRAL_INTEREST_SCORE;
    }

    let vocabulary: HashSet<String> = std::iter::once(resource.subject.as_str())
        .chain(std::iter::once(resource.title.as_str()))
        .chain(resource.tags.iter().map(String::as_str))
        .flat_map(tokenize)
        .collect();

    let hits = interests
        .iter()
        .filter(|interest| {
            let tokens = tokenize(interest);
            !tokens.is_empty() && tokens.iter().all(|t| vocabulary.contains(t))
        })
        .count();

    hits as f64 / interests.len() as f64
}

fn difficulty_match(resource: &CatalogResource, preferences: &UserPreferences) -> f64 {
    match resource.difficulty.distance(preferences.difficulty) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    }
}

fn style_match(resource: &CatalogResource, preferences: &UserPreferences) -> f64 {
    if resource.learning_style == preferences.learning_style {
        1.0
    } else {
        0.0
    }
}
