use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_prediction_result;
use roadcost::services::prediction::predict_project;
use roadcost::services::prediction_types::PredictionRequest;
use roadcost::services::predictor_api::{PredictorApiClient, PredictorAuth, PredictorConfig};

pub async fn predict_command(cmd: Commands) -> ExitCode {
    let Commands::Predict {
        config,
        input,
        output,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let predictor_config = match PredictorConfig::from_yaml_file(&config).await {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to parse predictor config: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let client = match PredictorApiClient::new(predictor_config, PredictorAuth::from_env()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create PredictorApiClient: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let request: PredictionRequest = match tokio::fs::read_to_string(&input).await {
        Ok(contents) => match serde_yaml::from_str(&contents) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Failed to parse prediction request: {e:?}");
                return ExitCode::FAILURE;
            }
        },
        Err(e) => {
            eprintln!("Failed to read prediction request: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        project = %request.project_name,
        units = request.functional_units.len(),
        "predicting project"
    );

    let result = match predict_project(&client, &request).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Failed to predict project: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let yaml = match serde_yaml::to_string(&result) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize prediction output: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::fs::write(&output, yaml).await {
        eprintln!("Failed to write prediction output: {e:?}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_prediction_result(&result));
    println!("Prediction written to {output}");
    ExitCode::SUCCESS
}
