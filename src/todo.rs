//! Typed view of the to-do resource.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::request::RequestOptions;

/// Path of the to-do collection.
pub const TODOS_PATH: &str = "/todos";

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
}

/// Body of `GET /todos`. Paging fields are only present on real responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TodoList {
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl TodoList {
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}

/// Fetch and decode the to-do list.
pub async fn fetch_todos(gateway: &Gateway, options: RequestOptions) -> Result<TodoList, GatewayError> {
    let data = gateway.fetch_resource(TODOS_PATH, options).await?;
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_dummyjson_shape() {
        let body = json!({
            "todos": [
                {"id": 1, "todo": "Do something nice for someone I care about", "completed": true, "userId": 26}
            ],
            "total": 254,
            "skip": 0,
            "limit": 30
        });
        let list: TodoList = serde_json::from_value(body).unwrap();
        assert_eq!(list.todos.len(), 1);
        assert_eq!(list.todos[0].user_id, 26);
        assert_eq!(list.total, Some(254));
        assert_eq!(list.completed_count(), 1);
    }

    #[test]
    fn test_missing_todos_is_empty() {
        let list: TodoList = serde_json::from_value(json!({})).unwrap();
        assert!(list.todos.is_empty());
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn test_serialize_uses_user_id_camel_case() {
        let todo = Todo {
            id: 2,
            todo: "Memorize the fifty states and their capitals".to_string(),
            completed: false,
            user_id: 48,
        };
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["userId"], 48);
        assert!(value.get("user_id").is_none());
    }
}
