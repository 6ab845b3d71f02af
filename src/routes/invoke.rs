use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::commands::CommandRouter;
use crate::error::CommandError;

pub async fn invoke_command(
    State(commands): State<CommandRouter>,
    Path(command): Path<String>,
    Json(args): Json<Value>,
) -> Result<Json<Value>, CommandError> {
    tracing::debug!(command = %command, "Invoking command");

    match commands.dispatch(&command, args).await {
        Ok(result) => {
            tracing::debug!(command = %command, "Command succeeded");
            Ok(Json(result))
        }
        Err(e) => {
            tracing::warn!(command = %command, code = %e.code(), message = %e, "Command failed");
            Err(e)
        }
    }
}
