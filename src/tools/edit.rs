use crate::{errors::AppError, manager::FileManager, mcp::registry::Tool, tools::{as_int, required_str}};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct EditTool { manager: Arc<FileManager> }

impl EditTool { pub fn new(manager: Arc<FileManager>) -> Self { Self { manager } } }

#[async_trait]
impl Tool for EditTool {
    fn name(&self) -> &'static str { "edit" }
    fn capabilities(&self) -> serde_json::Value {
        json!({"input": {"type":"object","required":["path","line","content"],"properties": {"path": {"type":"string"},"line":{"type":"integer","minimum":1},"content":{"type":"string"}}}, "output": {"type":"object","properties": {"path":{"type":"string"},"line_number":{"type":"integer"},"operation":{"type":"string","enum":["replace","append"]},"old_content":{"type":"string"},"new_content":{"type":"string"},"total_lines":{"type":"integer"},"created":{"type":"boolean"}}}})
    }
    async fn call(&self, identity: &str, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let path = required_str(&params, "path")?;
        let line = params
            .get("line")
            .ok_or_else(|| AppError::ToolError("missing line".into()))?;
        // anything that is not an integer is a bad line number, not a bad request
        let line = as_int(line).ok_or(AppError::InvalidLineNumber)?;
        let content = required_str(&params, "content")?;
        let result = self.manager.edit_line(identity, path, line, content)?;
        serde_json::to_value(result).map_err(|e| AppError::Internal(e.to_string()))
    }
}
