use clap::Parser;
use iris_client::client::DEFAULT_BACKEND_URL;
use iris_client::form::{
    DEFAULT_PETAL_LENGTH, DEFAULT_PETAL_WIDTH, DEFAULT_SEPAL_LENGTH, DEFAULT_SEPAL_WIDTH,
};
use iris_client::{ApiClient, ClientError, Measurements, render};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "iris-client",
    about = "Predict the species of an Iris flower from its measurements (cm)"
)]
struct Args {
    /// Prediction service URL
    #[arg(long, default_value = DEFAULT_BACKEND_URL, env = "BACKEND_URL")]
    backend_url: String,

    /// Sepal length, 0 to 10
    #[arg(long, default_value_t = DEFAULT_SEPAL_LENGTH, allow_negative_numbers = true)]
    sepal_length: f64,

    /// Sepal width, 0 to 10
    #[arg(long, default_value_t = DEFAULT_SEPAL_WIDTH, allow_negative_numbers = true)]
    sepal_width: f64,

    /// Petal length, 0 to 10
    #[arg(long, default_value_t = DEFAULT_PETAL_LENGTH, allow_negative_numbers = true)]
    petal_length: f64,

    /// Petal width, 0 to 10
    #[arg(long, default_value_t = DEFAULT_PETAL_WIDTH, allow_negative_numbers = true)]
    petal_width: f64,

    /// Only check whether the service is up and has a model loaded
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    // Logs go to stderr, stdout carries the form output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, ClientError> {
    let client = ApiClient::new(args.backend_url)?;

    if args.health {
        let health = client.health().await?;
        return Ok(format!(
            "Service at {} is {} (model loaded: {})\n",
            client.base_url(),
            health.status,
            if health.model_loaded { "yes" } else { "no" }
        ));
    }

    let measurements = Measurements::new(
        args.sepal_length,
        args.sepal_width,
        args.petal_length,
        args.petal_width,
    );
    let response = client.predict(&measurements).await?;
    Ok(format!(
        "{}\n{}",
        render::render_measurements(&measurements),
        render::render_prediction(&response)
    ))
}

fn user_message(err: &ClientError) -> String {
    match err {
        ClientError::Connection { url, .. } => format!(
            "Cannot reach the prediction service at {url}. Make sure it is running."
        ),
        ClientError::Http { status, message } => {
            format!("The prediction service returned an error ({status}): {message}")
        }
        ClientError::Unexpected(msg) | ClientError::Build(msg) => {
            format!("Unexpected error: {msg}")
        }
    }
}
