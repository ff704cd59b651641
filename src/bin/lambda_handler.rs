//! AWS Lambda handler for running yield simulations
//!
//! Accepts the simulation form as JSON and returns the projection with its
//! monthly breakdown. Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;

use yield_simulator::{SimulationForm, SimulationResult, YieldSimulationEngine};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Response body with execution timing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationResponse {
    #[serde(flatten)]
    result: SimulationResult,
    execution_time_us: u64,
}

fn response(status: i64, body: String) -> LambdaFunctionUrlResponse {
    LambdaFunctionUrlResponse {
        status_code: status,
        headers: Default::default(),
        body: Some(body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message.to_string() })?;
    Ok(response(status, body))
}

/// Request body, if present and non-blank
fn body_text(request: &LambdaFunctionUrlRequest) -> Option<String> {
    request.body.clone().filter(|b| !b.trim().is_empty())
}

async fn handler(
    engine: &YieldSimulationEngine,
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    if request.is_base64_encoded {
        return error_response(415, "Base64-encoded bodies are not supported; send application/json");
    }

    let body = body_text(&request).unwrap_or_else(|| "{}".to_string());

    let form: SimulationForm = match serde_json::from_str(&body) {
        Ok(form) => form,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let simulation_request = match form.validate() {
        Ok(r) => r,
        Err(e) => {
            log::info!("Rejected simulation form: {}", e);
            return error_response(400, &e.to_string());
        }
    };

    let result = engine.simulate(&simulation_request);

    let body = serde_json::to_string(&SimulationResponse {
        result,
        execution_time_us: start.elapsed().as_micros() as u64,
    })?;

    Ok(response(200, body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let engine = YieldSimulationEngine::default();
    let engine = &engine;

    run(service_fn(move |event| async move { handler(engine, event).await })).await
}
