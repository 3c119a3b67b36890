/// State of the `results` container: a visibility flag plus its markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPanel {
    visible: bool,
    html: String,
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content and makes the panel visible.
    pub fn show(&mut self, html: String) {
        self.html = html;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn class_attr(&self) -> &'static str {
        if self.visible {
            "results"
        } else {
            "results hidden"
        }
    }
}
