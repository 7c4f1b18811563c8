use serde::{Deserialize, Serialize};

/// Configuration from todo.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub drag: DragConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file, relative to the data directory
    #[serde(default = "default_store_file")]
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            file: default_store_file(),
        }
    }
}

fn default_store_file() -> String {
    "todos.db".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub sort: SortOption,
    #[serde(default)]
    pub filter: FilterOption,
    /// Title column width in `list` output, in terminal cells
    #[serde(default = "default_title_width")]
    pub title_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            sort: SortOption::default(),
            filter: FilterOption::default(),
            title_width: default_title_width(),
        }
    }
}

fn default_title_width() -> usize {
    40
}

/// Drag feedback styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_lifted_scale")]
    pub lifted_scale: f32,
    #[serde(default = "default_lifted_alpha")]
    pub lifted_alpha: f32,
    #[serde(default = "default_target_scale")]
    pub target_scale: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            lifted_scale: default_lifted_scale(),
            lifted_alpha: default_lifted_alpha(),
            target_scale: default_target_scale(),
        }
    }
}

fn default_lifted_scale() -> f32 {
    0.95
}

fn default_lifted_alpha() -> f32 {
    0.7
}

fn default_target_scale() -> f32 {
    1.05
}

/// Display ordering. Only `Default` shows (and lets drags edit) the
/// persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOption {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "date-asc")]
    DateAscending,
    #[serde(rename = "date-desc")]
    DateDescending,
    #[serde(rename = "title-az")]
    TitleAz,
    #[serde(rename = "title-za")]
    TitleZa,
}

impl SortOption {
    pub fn parse(s: &str) -> Option<SortOption> {
        match s {
            "default" => Some(SortOption::Default),
            "date-asc" => Some(SortOption::DateAscending),
            "date-desc" => Some(SortOption::DateDescending),
            "title-az" => Some(SortOption::TitleAz),
            "title-za" => Some(SortOption::TitleZa),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::DateAscending => "date-asc",
            SortOption::DateDescending => "date-desc",
            SortOption::TitleAz => "title-az",
            SortOption::TitleZa => "title-za",
        }
    }
}

/// Which sections are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOption {
    #[default]
    All,
    Completed,
    Uncompleted,
}

impl FilterOption {
    pub fn parse(s: &str) -> Option<FilterOption> {
        match s {
            "all" => Some(FilterOption::All),
            "completed" => Some(FilterOption::Completed),
            "uncompleted" => Some(FilterOption::Uncompleted),
            _ => None,
        }
    }
}
