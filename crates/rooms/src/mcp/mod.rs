use std::sync::Arc;

use rmcp::{
    Error as McpError, ServerHandler,
    handler::server::tool::IntoCallToolResult,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool,
};
use serde::Deserialize;

use crate::{config::PipelineConfig, pipeline::Pipeline, types::AnalysisResponse};

/// Request for analysing one floor-plan image.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeFloorPlanRequest {
    #[schemars(
        description = "Raw base64 image data or a data URI (`data:image/png;base64,...`); PNG, JPEG and BMP payloads are accepted"
    )]
    pub image: String,
}

/// Tool server wrapping the extraction pipeline.
///
/// The pipeline stages hold no per-request state, so one shared instance
/// serves concurrent calls; each call decodes, processes and drops its
/// own buffers.
#[derive(Clone)]
pub struct FloorPlanMcpServer {
    pipeline: Arc<Pipeline>,
}

impl FloorPlanMcpServer {
    pub fn new() -> Self {
        Self::with_config(&PipelineConfig::default())
    }

    pub fn with_config(config: &PipelineConfig) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::from_config(config)),
        }
    }
}

impl Default for FloorPlanMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoCallToolResult for AnalysisResponse {
    fn into_call_tool_result(self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&self).unwrap_or_else(|_| format!("{:?}", self)),
        )]))
    }
}

#[tool(tool_box)]
impl FloorPlanMcpServer {
    #[tool(
        description = "Analyze a floor-plan image and return closed room polygons with pixel-space area and perimeter. Candidates are ordered as the contour tracer discovered them, not spatially."
    )]
    fn analyze_floor_plan(
        &self,
        #[tool(aggr)] AnalyzeFloorPlanRequest { image }: AnalyzeFloorPlanRequest,
    ) -> AnalysisResponse {
        let outcome = self.pipeline.analyze(&image);
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "floor-plan analysis failed");
        }
        AnalysisResponse::from_result(outcome)
    }
}

#[tool(tool_box)]
impl ServerHandler for FloorPlanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Floor Plan Analysis Server - Convert scanned or photographed floor plans into closed room polygons with pixel-space area and perimeter metrics.".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
