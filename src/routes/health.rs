use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::commands::CommandRouter;

pub async fn health_check(State(commands): State<CommandRouter>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "commands": commands.commands(),
    }))
}
