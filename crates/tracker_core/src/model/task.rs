use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        rename = "completionDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub completion_date: Option<String>,
}

impl Task {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            description: None,
            deadline: None,
            completed: false,
            completion_date: None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}
