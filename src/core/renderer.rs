use crate::core::panel::ResultsPanel;
use crate::core::{ConfigProvider, LearningPathResult, LearningResource, ResultRenderer};
use crate::domain::model::{element_ids, LearningStyle};
use crate::utils::error::EduError;
use std::borrow::Cow;
use std::fmt::Write;

pub const DEFAULT_TIME_REFERENCE_MINUTES: u32 = 240;

const PAGE_CSS: &str = "body{font-family:sans-serif;max-width:860px;margin:2rem auto;padding:0 1rem}\
.hidden{display:none}\
.path-summary,.recommendation{border:1px solid #ddd;border-radius:8px;padding:1rem;margin:1rem 0}\
.meta-item{margin-right:1rem}\
.progress-bar{background:#eee;border-radius:4px;height:8px;overflow:hidden}\
.progress-fill{background:#4f46e5;height:100%}\
.error{color:#b91c1c}";

/// Display label for a learning style; unknown styles are shown as-is.
pub fn learning_style_label(style: &LearningStyle) -> &str {
    match style {
        LearningStyle::Visual => "👁️ Visual",
        LearningStyle::Kinesthetic => "🛠️ Hands-on",
        LearningStyle::Theoretical => "📚 Theoretical",
        LearningStyle::Other(raw) => raw,
    }
}

/// Match percentage with one decimal, e.g. `0.873` -> `"87.3"`.
pub fn match_percentage(similarity_score: f64) -> String {
    format!("{:.1}", similarity_score * 100.0)
}

/// Width of a resource's match bar in percent, neither rounded nor capped.
pub fn score_bar_width(similarity_score: f64) -> f64 {
    similarity_score * 100.0
}

/// Width of the total-time bar in percent, capped at 100.
pub fn time_bar_width(total_minutes: u32, reference_minutes: u32) -> f64 {
    if reference_minutes == 0 {
        return 100.0;
    }
    (total_minutes as f64 / reference_minutes as f64 * 100.0).min(100.0)
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    time_reference_minutes: u32,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            time_reference_minutes: DEFAULT_TIME_REFERENCE_MINUTES,
        }
    }
}

impl HtmlRenderer {
    pub fn new(time_reference_minutes: u32) -> Self {
        Self {
            time_reference_minutes,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.time_reference_minutes())
    }

    /// Wraps the panel into a standalone HTML document.
    pub fn render_page(&self, panel: &ResultsPanel) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>EduVision AI</title>\n<style>{css}</style>\n</head>\n<body>\n\
             <h1>EduVision AI</h1>\n<div id=\"{id}\" class=\"{class}\">{content}</div>\n</body>\n</html>\n",
            css = PAGE_CSS,
            id = element_ids::RESULTS,
            class = panel.class_attr(),
            content = panel.html(),
        )
    }

    fn render_recommendation(&self, out: &mut String, rank: usize, resource: &LearningResource) {
        // write! 到 String 不會失敗
        let _ = write!(
            out,
            r#"
    <div class="recommendation">
        <h3>{rank}. {title}</h3>
        <div class="meta-info">
            <span class="meta-item">📚 {subject}</span>
            <span class="meta-item">🎯 {difficulty}</span>
            <span class="meta-item">⏱️ {minutes} min</span>
            <span class="meta-item">👤 {style}</span>
        </div>
        <p>{description}</p>
        <div class="progress-bar">
            <div class="progress-fill" style="width: {width}%"></div>
        </div>
        <div class="similarity-score">
            Match with your profile: <strong>{percentage}%</strong>
        </div>
    </div>"#,
            rank = rank,
            title = escape_html(&resource.title),
            subject = escape_html(&resource.subject),
            difficulty = resource.difficulty,
            minutes = resource.estimated_time,
            style = escape_html(learning_style_label(&resource.learning_style)),
            description = escape_html(&resource.description),
            width = score_bar_width(resource.similarity_score),
            percentage = match_percentage(resource.similarity_score),
        );
    }
}

impl ResultRenderer for HtmlRenderer {
    fn render_loading(&self) -> String {
        r#"
<div class="loading">
    <h2>🤖 AI is generating your learning path...</h2>
    <p>Analyzing your preferences and selecting optimal resources</p>
</div>"#
            .to_string()
    }

    fn render_results(&self, result: &LearningPathResult) -> String {
        let mut html = String::with_capacity(1024 + result.resources_count() * 768);

        let _ = write!(
            html,
            r#"
<h2>🎯 Your Personalized Learning Path</h2>
<div class="path-summary">
    <h3>📊 Learning Path Overview</h3>
    <p><strong>Total Resources:</strong> {count}</p>
    <p><strong>Total Estimated Time:</strong> {minutes} minutes</p>
    <div class="progress-bar">
        <div class="progress-fill" style="width: {width}%"></div>
    </div>
    <p><small>Optimized with Machine Learning</small></p>
</div>
<div class="recommendations-list">
    <h3>📚 Recommended Resources:</h3>"#,
            count = result.resources_count(),
            minutes = result.total_estimated_time(),
            width = time_bar_width(result.total_estimated_time(), self.time_reference_minutes),
        );

        for (index, resource) in result.learning_path().iter().enumerate() {
            self.render_recommendation(&mut html, index + 1, resource);
        }

        html.push_str("\n</div>");
        html
    }

    fn render_error(&self, error: &EduError) -> String {
        format!(
            r#"
<div class="error">
    <h2>⚠️ Could not build your learning path</h2>
    <p>{message}</p>
    <p><small>{suggestion}</small></p>
</div>"#,
            message = escape_html(&error.user_friendly_message()),
            suggestion = escape_html(error.recovery_suggestion()),
        )
    }
}
