use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// Match this item against a raw `completed` query value. The comparison
    /// is textual: only `"true"`/`"false"` can ever match, anything else
    /// filters everything out.
    pub fn completed_matches(&self, filter: &str) -> bool {
        self.completed.to_string() == filter
    }

    /// Merge a partial update onto this item: supplied fields overwrite,
    /// unsupplied fields are retained. A patch that carries `id` rewrites the
    /// identifier; uniqueness is not re-checked here.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial-field body of a PUT. Unknown fields are dropped on deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}
