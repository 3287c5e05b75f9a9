use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};
use serde::Serialize;
use vecform_apps::{apps, Deployment, DeploymentConfig, Pipeline, SubmissionError, Verdict};
use vecform_core::{FieldKind, FieldSpec};
use vecform_model::{EncoderCell, ModelCell};

/// Loaded once per process and shared read-only afterwards
static MODEL: ModelCell = ModelCell::new();
static ENCODER: EncoderCell = EncoderCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "vecform",
    version,
    about = "Fill in a prediction form and ask its model for a verdict",
    long_about = "vecform collects the fields of a prediction form, encodes them into the\n\
        fixed-width feature vector the form's model was trained on, and prints the\n\
        model's verdict.\n\n\
        EXAMPLES:\n\
        \n  vecform apps                                      List deployments\n\
        \n  vecform fields kidney-stone                       Show a form's fields\n\
        \n  vecform predict typhoid --model typhoid.json -s age=34 -s acute=Yes\n\
        \n  vecform predict --config dengue.toml -s ns1=Negative --format json"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the available deployments
    Apps,
    /// Describe the fields of a deployment's form
    Fields(FieldsArgs),
    /// Submit a form and print the model's verdict
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
struct FieldsArgs {
    /// Deployment identifier (see `vecform apps`)
    app: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Deployment identifier; may come from --config instead
    app: Option<String>,

    /// TOML deployment config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Model artifact (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Categorical encoder artifact (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    encoder: Option<PathBuf>,

    /// Field value; unset fields keep their form default
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    app: &'a str,
    #[serde(flatten)]
    verdict: &'a Verdict,
}

#[derive(Debug, Serialize)]
struct FailureReport<'a> {
    app: &'a str,
    error: &'static str,
    cause: String,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let rc = match cli.command {
        Command::Apps => run_apps(),
        Command::Fields(args) => run_fields(&args),
        Command::Predict(args) => run_predict(&args),
    };
    std::process::exit(rc);
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_apps() -> i32 {
    for d in apps::all() {
        println!("{:<14} {}", d.id(), d.title());
    }
    0
}

fn find_deployment(id: &str) -> Option<Box<dyn Deployment>> {
    let found = apps::find(id);
    if found.is_none() {
        eprintln!("error: unknown deployment '{id}' (see `vecform apps`)");
    }
    found
}

fn run_fields(args: &FieldsArgs) -> i32 {
    let Some(deployment) = find_deployment(&args.app) else {
        return 2;
    };
    let schema = deployment.schema();
    match args.format {
        OutputFormat::Text => {
            println!(
                "{} ({}), {} fields in vector order",
                deployment.title(),
                deployment.id(),
                schema.width()
            );
            for field in schema.fields() {
                println!("  {}", describe_field(field));
            }
            0
        }
        OutputFormat::Json => match serde_json::to_string_pretty(schema) {
            Ok(s) => {
                println!("{s}");
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                2
            }
        },
    }
}

fn describe_field(field: &FieldSpec) -> String {
    let detail = match &field.kind {
        FieldKind::Numeric {
            min,
            max,
            default,
            integer,
        } => {
            let bound = |b: &Option<f64>| b.map(|x| x.to_string()).unwrap_or_else(|| "-".into());
            let kind = if *integer { "integer" } else { "numeric" };
            format!("{kind} [{}, {}] default {default}", bound(min), bound(max))
        }
        FieldKind::Categorical { rule } => {
            let choices: Vec<String> = rule
                .entries()
                .iter()
                .map(|e| format!("{}={}", e.label, e.code))
                .collect();
            format!("one of {}", choices.join(" | "))
        }
    };
    format!("{:<18} {:<40} {}", field.name, detail, field.label)
}

fn run_predict(args: &PredictArgs) -> i32 {
    let config = match &args.config {
        Some(path) => match DeploymentConfig::load(path) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("error: {e}");
                return 2;
            }
        },
        None => None,
    };

    let app_id = match (&args.app, &config) {
        (Some(app), Some(c)) if *app != c.app => {
            eprintln!(
                "error: deployment '{app}' does not match '{}' in the config file",
                c.app
            );
            return 2;
        }
        (Some(app), _) => app.clone(),
        (None, Some(c)) => c.app.clone(),
        (None, None) => {
            eprintln!("error: name a deployment or pass --config");
            return 2;
        }
    };
    let Some(deployment) = find_deployment(&app_id) else {
        return 2;
    };

    let model_path = args
        .model
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.model.as_ref()).map(|m| m.path.clone()));
    let Some(model_path) = model_path else {
        eprintln!("error: no model artifact; pass --model or set [model] in the config");
        return 2;
    };
    let encoder_path = args
        .encoder
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.encoder.as_ref()).map(|e| e.path.clone()));
    if deployment.needs_encoder() && encoder_path.is_none() {
        eprintln!(
            "error: '{app_id}' needs a categorical encoder; pass --encoder or set [encoder] in the config"
        );
        return 2;
    }

    let raw: BTreeMap<String, String> = args.set.iter().cloned().collect();
    let values = match deployment.schema().resolve(&raw) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    debug!("resolved {} field values for {app_id}", values.len());

    let outcome = submit(
        deployment.as_ref(),
        &model_path,
        encoder_path.as_deref(),
        config.and_then(|c| c.result),
        &values,
    );
    match outcome {
        Ok(verdict) => {
            print_verdict(deployment.id(), &verdict, args.format);
            0
        }
        Err(e) => {
            print_failure(deployment.id(), &e, args.format);
            failure_code(&e)
        }
    }
}

fn submit(
    deployment: &dyn Deployment,
    model_path: &std::path::Path,
    encoder_path: Option<&std::path::Path>,
    result: Option<vecform_apps::ResultFormat>,
    values: &[vecform_core::FieldValue],
) -> Result<Verdict, SubmissionError> {
    let model = MODEL.get_or_load(model_path)?;
    let mut pipeline = Pipeline::new(deployment, model);
    if deployment.needs_encoder() {
        if let Some(path) = encoder_path {
            pipeline = pipeline.with_encoder(ENCODER.get_or_load(path)?);
        }
    }
    if let Some(format) = result {
        pipeline = pipeline.with_format(format);
    }
    pipeline.submit(values)
}

fn print_verdict(app: &str, verdict: &Verdict, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("[{}] {}", verdict.severity, verdict.message),
        OutputFormat::Json => {
            let report = Report { app, verdict };
            match serde_json::to_string_pretty(&report) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("error: {e}"),
            }
        }
    }
}

/// Headline and cause of a failed submission
fn failure_cause(err: &SubmissionError) -> (&'static str, String) {
    match err {
        SubmissionError::Encoding(e) => ("Invalid form value", e.to_string()),
        SubmissionError::Oracle(e) => ("Prediction failed", e.to_string()),
    }
}

/// Encoding errors are bad input; oracle errors are failed predictions
fn failure_code(err: &SubmissionError) -> i32 {
    match err {
        SubmissionError::Encoding(_) => 2,
        SubmissionError::Oracle(_) => 1,
    }
}

fn print_failure(app: &str, err: &SubmissionError, format: OutputFormat) {
    let (headline, cause) = failure_cause(err);
    match format {
        OutputFormat::Text => eprintln!("{headline}: {cause}"),
        OutputFormat::Json => {
            let report = FailureReport {
                app,
                error: headline,
                cause,
            };
            match serde_json::to_string_pretty(&report) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("error: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vecform_core::{EncodingError, YesNo};
    use vecform_model::PredictError;

    #[test]
    fn assignment_parsing() {
        assert_eq!(
            parse_assignment("age=34"),
            Ok(("age".to_string(), "34".to_string()))
        );
        assert_eq!(
            parse_assignment(" diet =High Protein"),
            Ok(("diet".to_string(), "High Protein".to_string()))
        );
        assert!(parse_assignment("age").is_err());
        assert!(parse_assignment("=3").is_err());
    }

    #[test]
    fn cli_parses_repeated_sets() {
        let cli = Cli::try_parse_from([
            "vecform", "-vv", "predict", "typhoid", "-m", "t.json", "-s", "age=3", "-s", "acute=Yes",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.app.as_deref(), Some("typhoid"));
        assert_eq!(args.set.len(), 2);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn describe_numeric_and_categorical() {
        let n = FieldSpec::numeric("months", "Duration (Months)")
            .range(1.0, 120.0)
            .default_value(6.0);
        assert!(describe_field(&n).contains("numeric [1, 120] default 6"));
        let c = FieldSpec::categorical::<YesNo>("smoking", "Smoking");
        assert!(describe_field(&c).contains("one of No=0 | Yes=1"));
    }

    #[test]
    fn encoding_and_oracle_failures_are_told_apart() {
        let err = SubmissionError::Encoding(EncodingError::ArityMismatch {
            expected: 2,
            found: 1,
        });
        assert_eq!(
            failure_cause(&err),
            ("Invalid form value", "expected 2 field values, got 1".to_string())
        );
        assert_eq!(failure_code(&err), 2);

        let err = SubmissionError::Oracle(PredictError::Inference("diverged".into()));
        assert_eq!(
            failure_cause(&err),
            ("Prediction failed", "Inference failed: diverged".to_string())
        );
        assert_eq!(failure_code(&err), 1);
    }

    #[test]
    fn integer_fields_are_described_as_such() {
        let f = FieldSpec::numeric("year", "Manufacturing Year")
            .range(1990.0, 2025.0)
            .default_value(2020.0)
            .integer();
        assert!(describe_field(&f).contains("integer [1990, 2025] default 2020"));
    }
}
