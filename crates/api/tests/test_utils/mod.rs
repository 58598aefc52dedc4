#![allow(dead_code)]

use std::collections::HashMap;

use axum_test::TestServer;
use chairtime_api::config::ApiConfig;

/// Configuration built only from the given variables, the process
/// environment is never read.
pub fn config_with(vars: &[(&str, &str)]) -> ApiConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test configuration")
}

pub fn server_with(vars: &[(&str, &str)]) -> TestServer {
    TestServer::new(chairtime_api::app(&config_with(vars))).expect("test server starts")
}

pub fn server() -> TestServer {
    server_with(&[])
}
