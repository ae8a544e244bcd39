use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use lead_confirm::app::{failure, handler_from_config, respond};
use lead_confirm::utils::logger;
use lead_confirm::{HandlerConfig, ProviderSettings};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

async fn function_handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    tracing::info!(request_id = %event.context.request_id, "Confirmation request received");

    // 每次呼叫都重新讀取環境變數，不跨呼叫快取；設定錯誤也以回應內容回傳
    let handler = HandlerConfig::from_env(ProviderSettings::default()).and_then(handler_from_config);

    let (status_code, body) = match handler {
        Ok(handler) => respond(&handler, &event.payload).await,
        Err(e) => failure(&e),
    };

    Ok(Response {
        status_code,
        headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
        body: serde_json::to_string(&body)?,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
