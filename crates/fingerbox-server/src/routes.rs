//! Request handlers.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use fingerbox_joinery::{generate, BoxSpec, ButtJoint, OutputFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// URL prefix artifacts are served under.
pub const OUTPUT_ROUTE: &str = "output";

/// Body of `POST /generate-box`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateBoxRequest {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub thickness: f64,
    #[serde(default, rename = "lidOpen", alias = "lid_open")]
    pub lid_open: bool,
}

impl GenerateBoxRequest {
    pub fn spec(&self) -> BoxSpec {
        BoxSpec::new(self.width, self.height, self.depth, self.thickness)
    }
}

/// Successful response of `POST /generate-box`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateBoxResponse {
    /// Path of the SVG relative to the server root
    pub svg_path: String,
    pub id: Uuid,
    /// Edges too short for fingers
    pub butt_joints: Vec<ButtJointInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtJointInfo {
    pub panel: String,
    pub side: String,
    pub mate: String,
    pub length: f64,
}

impl From<&ButtJoint> for ButtJointInfo {
    fn from(joint: &ButtJoint) -> Self {
        Self {
            panel: joint.panel.name().to_string(),
            side: joint.side.name().to_string(),
            mate: joint.mate.name().to_string(),
            length: joint.length,
        }
    }
}

pub async fn generate_box(
    State(state): State<AppState>,
    Json(request): Json<GenerateBoxRequest>,
) -> Result<Json<GenerateBoxResponse>, ApiError> {
    debug!(?request, "generate-box request");

    let AppState { settings, store } = state;
    let response = tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
        let generated = generate(&request.spec(), request.lid_open, &settings)?;
        let file_name = generated.file_name(OutputFormat::Svg);
        store.put(&file_name, generated.to_svg().as_bytes())?;

        Ok(GenerateBoxResponse {
            svg_path: format!("{OUTPUT_ROUTE}/{file_name}"),
            id: generated.id(),
            butt_joints: generated.butt_joints().iter().map(Into::into).collect(),
        })
    })
    .await??;

    Ok(Json(response))
}

pub async fn health() -> &'static str {
    "ok"
}
