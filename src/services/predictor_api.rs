use std::env;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::services::prediction_types::{ItemPrediction, PredictionQuery};
use crate::services::predictor::{Predictor, PredictorError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PredictorConfig {
    pub async fn from_yaml_file(filepath: &str) -> Result<Self, PredictorError> {
        let contents = tokio::fs::read_to_string(filepath)
            .await
            .map_err(|err| PredictorError::Other(format!("failed to read config: {err}")))?;
        let config: PredictorConfig =
            serde_yaml::from_str(&contents).map_err(|_| PredictorError::Parse)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredictorAuth {
    pub api_token: Option<String>,
}

impl PredictorAuth {
    /// `PREDICTOR_API_TOKEN` is optional; without it requests go out anonymously.
    pub fn from_env() -> Self {
        Self {
            api_token: env::var("PREDICTOR_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
        }
    }
}

pub struct PredictorApiClient {
    config: PredictorConfig,
    auth: PredictorAuth,
    client: Client,
}

impl PredictorApiClient {
    pub fn new(config: PredictorConfig, auth: PredictorAuth) -> Result<Self, PredictorError> {
        if config.base_url.trim().is_empty() {
            return Err(PredictorError::Other(
                "predictor config is missing base_url".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| PredictorError::Other(format!("failed to build http client: {err}")))?;

        Ok(Self {
            config,
            auth,
            client,
        })
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.config.base_url.trim_end_matches('/'))
    }
}

impl Predictor for PredictorApiClient {
    async fn predict(&self, query: &PredictionQuery) -> Result<ItemPrediction, PredictorError> {
        let mut request = self.client.post(self.predict_url()).json(query);
        if let Some(token) = self.auth.api_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                PredictorError::Timeout
            } else {
                PredictorError::Connection
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PredictorError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(PredictorError::NotFound);
        }
        if !status.is_success() {
            return Err(PredictorError::Connection);
        }

        let prediction = response
            .json::<ItemPrediction>()
            .await
            .map_err(|_| PredictorError::Parse)?;
        if !prediction.value.is_finite() {
            return Err(PredictorError::Parse);
        }
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::functional_unit::FunctionalUnit;

    fn query(item_type_id: u32) -> PredictionQuery {
        PredictionQuery {
            project_name: "Demo".to_string(),
            phase_id: 1,
            location: None,
            item_type_id,
            item: "8 - ESTRUCTURAS".to_string(),
            functional_unit: FunctionalUnit::new(1, 3.5),
        }
    }

    #[test]
    fn new_rejects_missing_base_url() {
        let result = PredictorApiClient::new(PredictorConfig::default(), PredictorAuth::default());
        assert!(matches!(result, Err(PredictorError::Other(_))));
    }

    #[test]
    fn predict_url_ignores_trailing_slash() {
        let config = PredictorConfig {
            base_url: "http://localhost:5000/api/v1/".to_string(),
            ..PredictorConfig::default()
        };
        let client = PredictorApiClient::new(config, PredictorAuth::default()).unwrap();
        assert_eq!(client.predict_url(), "http://localhost:5000/api/v1/predict");
    }

    #[tokio::test]
    async fn unreachable_predictor_is_a_connection_error() {
        let config = PredictorConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        };
        let client = PredictorApiClient::new(config, PredictorAuth::default()).unwrap();
        let result = client.predict(&query(10)).await;
        assert!(matches!(
            result,
            Err(PredictorError::Connection) | Err(PredictorError::Timeout)
        ));
    }
}
