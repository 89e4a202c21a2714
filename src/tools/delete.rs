use crate::{errors::AppError, manager::FileManager, mcp::registry::Tool, tools::required_str};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct DeleteTool { manager: Arc<FileManager> }

impl DeleteTool { pub fn new(manager: Arc<FileManager>) -> Self { Self { manager } } }

#[async_trait]
impl Tool for DeleteTool {
    fn name(&self) -> &'static str { "delete" }
    fn capabilities(&self) -> serde_json::Value {
        json!({"input": {"type":"object","required":["path"],"properties": {"path": {"type":"string"}}}, "output": {"type":"object","properties": {"path":{"type":"string"},"deleted":{"type":"boolean"}}}})
    }
    async fn call(&self, identity: &str, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let path = required_str(&params, "path")?;
        let result = self.manager.delete(identity, path)?;
        serde_json::to_value(result).map_err(|e| AppError::Internal(e.to_string()))
    }
}
