use crate::{errors::AppError, manager::FileManager};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type DynTool = Arc<dyn Tool + Send + Sync + 'static>;

#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<(String, DynTool)>,
}

impl ToolRegistry {
    pub fn new(manager: Arc<FileManager>) -> Self {
        use crate::tools::{browse::BrowseTool, delete::DeleteTool, edit::EditTool, view::ViewTool};
        let mut tools: Vec<(String, DynTool)> = vec![
            Arc::new(BrowseTool::new(manager.clone())) as DynTool,
            Arc::new(ViewTool::new(manager.clone())),
            Arc::new(EditTool::new(manager.clone())),
            Arc::new(DeleteTool::new(manager)),
        ]
        .into_iter()
        .map(|t| (t.name().to_string(), t))
        .collect();
        tools.sort_by(|a, b| a.0.cmp(&b.0));
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<DynTool> { self.tools.iter().find(|(n, _)| n == name).map(|(_, t)| t.clone()) }
    pub fn list_names(&self) -> Vec<String> { self.tools.iter().map(|(n, _)| n.clone()).collect() }
}

#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub id: String,
    /// Caller identity as established by the host; sessions and permissions key on it.
    pub identity: String,
    pub tool: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")] pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")] pub error: Option<super::types::ErrorObj>,
}

#[async_trait]
pub trait Tool {
    fn name(&self) -> &'static str;
    fn capabilities(&self) -> serde_json::Value;
    async fn call(&self, identity: &str, params: serde_json::Value) -> Result<serde_json::Value, AppError>;
}
