use crate::error::PttError;
use crate::model::Category;
use crate::transport::{Params, Transport};
use serde_json::json;

/// Identifier of the top-level category node.
pub const ROOT_CATEGORY_ID: &str = "1";

pub struct CategoryService<T> {
    transport: T,
}

impl<T: Transport> CategoryService<T> {
    pub fn new(transport: T) -> Self {
        CategoryService { transport }
    }

    /// Fetch one category node and its immediate children. An absent result
    /// is a valid "not found" outcome, distinct from a transport failure.
    pub fn get_category(&self, category_id: &str) -> Result<Option<Category>, PttError> {
        let mut params = Params::new();
        params.insert("id".to_string(), json!(category_id));

        let response = self
            .transport
            .call("GetCategory", params)
            .map_err(|e| PttError::Category(e.to_string()))?;

        if response.is_null() {
            return Ok(None);
        }
        Ok(Some(Category::from_response(&response)))
    }

    pub fn get_root_category(&self) -> Result<Option<Category>, PttError> {
        self.get_category(ROOT_CATEGORY_ID)
    }
}
