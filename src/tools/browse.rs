use crate::{errors::AppError, manager::FileManager, mcp::registry::Tool, tools::{optional_int, optional_str}};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct BrowseTool { manager: Arc<FileManager> }

impl BrowseTool { pub fn new(manager: Arc<FileManager>) -> Self { Self { manager } } }

#[async_trait]
impl Tool for BrowseTool {
    fn name(&self) -> &'static str { "browse" }
    fn capabilities(&self) -> serde_json::Value {
        json!({"input": {"type":"object","properties": {"path": {"type":"string"},"page":{"type":"integer","minimum":1}}}, "output": {"type":"object","properties": {"path":{"type":"string"},"parent":{"type":"string"},"page":{"type":"integer"},"total_pages":{"type":"integer"},"total_items":{"type":"integer"},"entries":{"type":"array"},"prev_page":{"type":"integer"},"next_page":{"type":"integer"}}}})
    }
    async fn call(&self, identity: &str, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let path = optional_str(&params, "path")?;
        let page = optional_int(&params, "page")?;
        let result = self.manager.browse(identity, path, page)?;
        serde_json::to_value(result).map_err(|e| AppError::Internal(e.to_string()))
    }
}
