use crate::infra::build_service;
use clap::Args;
use mutafriche::config::AppConfig;
use mutafriche::error::AppError;
use mutafriche::evaluation::{catalog, EvaluationRequest, EvaluationView};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding one evaluation request
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

/// Evaluates one request offline and prints the caller-facing view on stdout.
pub(crate) async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    catalog::validate()?;

    let raw = std::fs::read_to_string(&args.input)?;
    let view = evaluate_payload(&raw, &config).await?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) async fn evaluate_payload(
    raw: &str,
    config: &AppConfig,
) -> Result<EvaluationView, AppError> {
    let request: EvaluationRequest = serde_json::from_str(raw)?;
    let service = build_service(&config.evaluation);
    let report = service.evaluate(request).await?;
    Ok(report.view())
}
