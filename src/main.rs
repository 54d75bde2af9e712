use meetu_client::client::HttpRecommendationClient;
use meetu_client::config::Config;
use meetu_client::error::{AppError, AppResult};
use meetu_client::models::CreditLevel;
use meetu_client::render::render;
use meetu_client::session::Session;

const USAGE: &str = "Usage: meetu-client <user_id> [--motivation X] [--pressure X] \
[--credit-level none|partial|full] [--top-k N] [--refresh | --clear]";

#[derive(Debug, PartialEq)]
enum Action {
    Submit,
    Refresh,
    Clear,
}

#[derive(Debug)]
struct CliArgs {
    user_id: String,
    motivation: Option<f64>,
    pressure: Option<f64>,
    credit_level: Option<CreditLevel>,
    top_k: Option<u32>,
    action: Action,
}

fn parse_number(flag: &str, value: Option<String>) -> AppResult<f64> {
    let raw = value.ok_or_else(|| AppError::InvalidInput(format!("{} needs a value", flag)))?;
    raw.parse()
        .map_err(|_| AppError::InvalidInput(format!("{} expects a number, got '{}'", flag, raw)))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> AppResult<CliArgs> {
    let user_id = args
        .next()
        .ok_or_else(|| AppError::InvalidInput(USAGE.to_string()))?;

    let mut parsed = CliArgs {
        user_id,
        motivation: None,
        pressure: None,
        credit_level: None,
        top_k: None,
        action: Action::Submit,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--motivation" => parsed.motivation = Some(parse_number(&arg, args.next())?),
            "--pressure" => parsed.pressure = Some(parse_number(&arg, args.next())?),
            "--credit-level" => {
                let raw = args.next().ok_or_else(|| {
                    AppError::InvalidInput("--credit-level needs a value".to_string())
                })?;
                parsed.credit_level = Some(raw.parse()?);
            }
            "--top-k" => {
                let raw = args.next().ok_or_else(|| {
                    AppError::InvalidInput("--top-k needs a value".to_string())
                })?;
                parsed.top_k = Some(raw.parse().map_err(|_| {
                    AppError::InvalidInput(format!("--top-k expects an integer, got '{}'", raw))
                })?);
            }
            "--refresh" => parsed.action = Action::Refresh,
            "--clear" => parsed.action = Action::Clear,
            other => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown argument '{}'\n{}",
                    other, USAGE
                )))
            }
        }
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meetu_client=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(2);
        }
    };

    let client = HttpRecommendationClient::new(&config.api_base_url);
    let top_k = args.top_k.unwrap_or(config.top_k);
    let mut session = Session::new(client, args.user_id, top_k);

    if let Some(motivation) = args.motivation {
        session.set_motivation(motivation)?;
    }
    if let Some(pressure) = args.pressure {
        session.set_pressure(pressure)?;
    }
    if let Some(credit_level) = args.credit_level {
        session.set_credit_level(credit_level);
    }

    match args.action {
        Action::Submit => {
            // Failures are already reflected in the session state; the
            // rendered output carries the user-visible message.
            let _ = session.submit().await;
        }
        Action::Refresh => {
            let _ = session.refresh().await;
        }
        Action::Clear => match session.clear().await {
            Ok(message) => println!("{}", message),
            Err(e) => {
                eprintln!("Error: {}", e.user_message());
                std::process::exit(1);
            }
        },
    }

    let output = render(&session.state);
    if !output.is_empty() {
        println!("{}", output);
    }

    if session.state.error.is_some() {
        std::process::exit(1);
    }

    Ok(())
}
