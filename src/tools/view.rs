use crate::{errors::AppError, manager::FileManager, mcp::registry::Tool, tools::{optional_int, required_str}};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct ViewTool { manager: Arc<FileManager> }

impl ViewTool { pub fn new(manager: Arc<FileManager>) -> Self { Self { manager } } }

#[async_trait]
impl Tool for ViewTool {
    fn name(&self) -> &'static str { "view" }
    fn capabilities(&self) -> serde_json::Value {
        json!({"input": {"type":"object","required":["path"],"properties": {"path": {"type":"string"},"start_line":{"type":"integer","default":1}}}, "output": {"type":"object","properties": {"path":{"type":"string"},"size":{"type":"integer"},"total_lines":{"type":"integer"},"start_line":{"type":"integer"},"end_line":{"type":"integer"},"lines":{"type":"array"},"prev_start":{"type":"integer"},"next_start":{"type":"integer"}}}})
    }
    async fn call(&self, identity: &str, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let path = required_str(&params, "path")?;
        let start_line = optional_int(&params, "start_line")?;
        let result = self.manager.view(identity, path, start_line)?;
        serde_json::to_value(result).map_err(|e| AppError::Internal(e.to_string()))
    }
}
