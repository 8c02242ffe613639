use serde::{Deserialize, Serialize};

/// Visual status of a dashlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashletStatus {
    #[default]
    Regular,
    Success,
    Error,
}

impl DashletStatus {
    /// Extra style class applied on top of `dashlet`.
    pub fn style_class(&self) -> Option<&'static str> {
        match self {
            DashletStatus::Regular => None,
            DashletStatus::Success => Some("dashlet-success"),
            DashletStatus::Error => Some("dashlet-error"),
        }
    }
}

/// Body of a dashlet: free text, or a badge showing a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DashletContent {
    Text { text: String },
    Badge { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashletConfig {
    pub title: String,
    pub content: DashletContent,
    pub description: Option<String>,
    #[serde(default)]
    pub status: DashletStatus,
}

impl DashletConfig {
    pub fn text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: DashletContent::Text { text: text.into() },
            description: None,
            status: DashletStatus::Regular,
        }
    }

    pub fn badge(title: impl Into<String>, value: impl ToString) -> Self {
        Self {
            title: title.into(),
            content: DashletContent::Badge {
                value: value.to_string(),
            },
            description: None,
            status: DashletStatus::Regular,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: DashletStatus) -> Self {
        self.status = status;
        self
    }
}

/// Rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashletView {
    pub title: String,
    pub content: DashletContent,
    pub description: Option<String>,
    pub status: DashletStatus,
    pub class_names: Vec<&'static str>,
}

pub fn render_dashlet(config: &DashletConfig) -> DashletView {
    let mut class_names = vec!["dashlet"];
    if matches!(config.content, DashletContent::Badge { .. }) {
        class_names.push("dashlet-badge");
    }
    if let Some(class) = config.status.style_class() {
        class_names.push(class);
    }
    DashletView {
        title: config.title.clone(),
        content: config.content.clone(),
        description: config.description.clone(),
        status: config.status,
        class_names,
    }
}
