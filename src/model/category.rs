use crate::decode::{normalize_to_sequence, FieldMap, ParseMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One category node with its immediate children. The endpoint populates a
/// single level of depth per call; grandchildren are never present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub updated_at: Option<String>,
    pub children: Vec<Category>,
    pub success: bool,
}

impl Category {
    /// Build a category tree from a decoded `GetCategory` result. Parsing is
    /// lenient throughout; a missing children block means zero children.
    pub fn from_response(response: &Value) -> Self {
        let node = response.get("a:category").cloned().unwrap_or(Value::Null);
        let fields = FieldMap::new(&node, ParseMode::Lenient);

        let success = match response.get("a:success") {
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            Some(Value::Bool(b)) => *b,
            _ => true,
        };

        let children = node
            .get("a:children")
            .map(|block| {
                normalize_to_sequence(block.get("a:category"))
                    .into_iter()
                    .map(Category::from_node)
                    .collect()
            })
            .unwrap_or_default();

        Category {
            id: fields.string("a:id"),
            name: fields.string("a:name"),
            parent_id: fields.opt_string("a:parent_id"),
            updated_at: fields.opt_string("a:updated_at"),
            children,
            success,
        }
    }

    fn from_node(node: &Value) -> Self {
        let fields = FieldMap::new(node, ParseMode::Lenient);
        Category {
            id: fields.string("a:id"),
            name: fields.string("a:name"),
            parent_id: fields.opt_string("a:parent_id"),
            updated_at: fields.opt_string("a:updated_at"),
            children: Vec::new(),
            success: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_tree_from_child_sequence() {
        let response = json!({
            "a:success": "true",
            "a:category": {
                "a:id": "1",
                "a:name": "Root",
                "a:children": {
                    "a:category": [
                        {"a:id": "10", "a:name": "Elektronik", "a:parent_id": "1"},
                        {"a:id": "11", "a:name": "Kitap", "a:parent_id": "1"},
                    ],
                },
            },
        });

        let category = Category::from_response(&response);
        assert_eq!(category.id, "1");
        assert!(category.success);
        assert_eq!(category.children.len(), 2);
        assert_eq!(category.children[1].name, "Kitap");
        assert_eq!(category.children[0].parent_id.as_deref(), Some("1"));
    }

    #[test]
    fn single_child_object_becomes_one_element() {
        let response = json!({
            "a:category": {
                "a:id": "1",
                "a:name": "Root",
                "a:children": {
                    "a:category": {"a:id": "10", "a:name": "Elektronik"},
                },
            },
        });

        let category = Category::from_response(&response);
        assert_eq!(category.children.len(), 1);
        assert_eq!(category.children[0].id, "10");
    }

    #[test]
    fn absent_children_means_zero_children() {
        let response = json!({
            "a:category": {"a:id": "42", "a:name": "Leaf"},
        });

        let category = Category::from_response(&response);
        assert!(category.children.is_empty());
    }
}
