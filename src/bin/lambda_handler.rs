//! AWS Lambda handler for investment projections
//!
//! Accepts projection parameters via JSON and returns a single projection,
//! a rate comparison, the three scenarios or a Monte Carlo risk summary.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use investment_projection::{
    compare_rates, monte_carlo, monte_carlo_with_rng, scenarios, simulate, InvestmentParams,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Which computation to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Simulate,
    Scenarios,
    Compare,
    MonteCarlo,
}

/// Input configuration for a request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    #[serde(default)]
    pub mode: Mode,

    /// Projection inputs, same field names as the JSON parameter file
    #[serde(flatten)]
    pub params: InvestmentParams,

    /// Rates for `compare` mode
    #[serde(default)]
    pub rates: Vec<f64>,

    /// Monte Carlo run count (default: 1000)
    #[serde(default = "default_runs")]
    pub runs: u32,

    #[serde(default)]
    pub rate_min: Option<f64>,

    #[serde(default)]
    pub rate_max: Option<f64>,

    /// Seed for reproducible Monte Carlo draws
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_runs() -> u32 { 1000 }

/// Output wrapper
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub mode: Mode,
    pub result: Value,
    pub execution_time_ms: u64,
}

/// Run the requested computation, returning a client-facing error message on bad input
fn process(request: &ProjectionRequest) -> Result<Value, String> {
    let params = &request.params;
    // Sweeps supply their own rates, so only the shared inputs are checked there
    match request.mode {
        Mode::Simulate | Mode::Scenarios => params.validate(),
        Mode::Compare | Mode::MonteCarlo => params.base().validate(),
    }
    .map_err(|e| e.to_string())?;

    let value = match request.mode {
        Mode::Simulate => serde_json::to_value(simulate(params).map_err(|e| e.to_string())?),
        Mode::Scenarios => serde_json::to_value(scenarios(params).map_err(|e| e.to_string())?),
        Mode::Compare => {
            let comparisons = compare_rates(&request.rates, &params.base()).map_err(|e| e.to_string())?;
            serde_json::to_value(comparisons)
        }
        Mode::MonteCarlo => {
            let (rate_min, rate_max) = match (request.rate_min, request.rate_max) {
                (Some(min), Some(max)) => (min, max),
                _ => return Err("monteCarlo mode requires rateMin and rateMax".to_string()),
            };
            let base = params.base();
            let result = match request.seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    monte_carlo_with_rng(request.runs, rate_min, rate_max, &base, &mut rng)
                }
                None => monte_carlo(request.runs, rate_min, rate_max, &base),
            }
            .map_err(|e| e.to_string())?;
            serde_json::to_value(result)
        }
    };

    value.map_err(|e| format!("Failed to serialize result: {}", e))
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(json!({ "error": message }).to_string()))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };
    log::info!("Handling {:?} request for {} years", request.mode, request.params.years);

    let result = match process(&request) {
        Ok(v) => v,
        Err(message) => {
            log::warn!("Rejected request: {}", message);
            return error_response(400, &message);
        }
    };

    let response = ProjectionResponse {
        mode: request.mode,
        result,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
