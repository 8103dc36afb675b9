use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, PredictionClient, PredictionError, PredictionService};
use shared::{Passenger, PassengerField, Prediction};

/// Submits one passenger to the prediction backend and prints the outcome.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    name: String,
    /// 1, 2 or 3.
    #[arg(long, default_value = "3")]
    pclass: String,
    /// male or female.
    #[arg(long, default_value = "male")]
    sex: String,
    #[arg(long, default_value = "30")]
    age: String,
    /// Siblings/spouses aboard.
    #[arg(long, default_value = "0")]
    sib_sp: String,
    /// Parents/children aboard.
    #[arg(long, default_value = "0")]
    parch: String,
    #[arg(long, default_value = "20")]
    fare: String,
    /// C, Q or S.
    #[arg(long, default_value = "S")]
    embarked: String,
    /// Print the request payload before sending it.
    #[arg(long)]
    show_payload: bool,
}

impl Args {
    fn passenger(&self) -> Result<Passenger> {
        let mut passenger = Passenger::default();
        let values = [
            (PassengerField::Name, &self.name),
            (PassengerField::Pclass, &self.pclass),
            (PassengerField::Sex, &self.sex),
            (PassengerField::Age, &self.age),
            (PassengerField::SibSp, &self.sib_sp),
            (PassengerField::Parch, &self.parch),
            (PassengerField::Fare, &self.fare),
            (PassengerField::Embarked, &self.embarked),
        ];
        for (field, raw) in values {
            passenger
                .apply_field(field, raw)
                .with_context(|| format!("invalid value for {field}"))?;
        }
        anyhow::ensure!(passenger.has_name(), "--name must not be empty");
        Ok(passenger)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let passenger = args.passenger()?;
    let settings = load_settings()
        .context("failed to load client settings")?
        .with_api_base_url(args.api_url.clone())
        .context("invalid --api-url")?;
    let client = PredictionClient::new(&settings).context("failed to build prediction client")?;

    if args.show_payload {
        println!("POST {}", client.endpoint());
        println!("{}", serde_json::to_string_pretty(&passenger)?);
    }

    let outcome = client.predict(&passenger).await;
    if outcome.is_err() {
        eprintln!(
            "Make sure the backend server is running on {}",
            settings.api_base_url
        );
    }
    println!("{}", render_outcome(outcome)?);
    Ok(())
}

fn render_outcome(outcome: Result<Prediction, PredictionError>) -> Result<String> {
    match outcome {
        Ok(prediction) => Ok(format!(
            "{}: {} confidence",
            prediction.outcome_label(),
            prediction.confidence_readout()
        )),
        Err(err) => Err(anyhow!(err.user_message())),
    }
}
