use anyhow::{bail, Result};
use tracing::info;
use translate_query::{get_supported_languages, TranslationClient};

const USAGE: &str = "Usage: translate-query <text> <target-language>\n       translate-query --list";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables are already set)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translate_query=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--list") {
        for (code, name) in get_supported_languages() {
            println!("{:<6} {}", code, name);
        }
        return Ok(());
    }

    let (text, target) = match args.as_slice() {
        [text, target] => (text, target),
        _ => bail!("{}", USAGE),
    };

    let client = TranslationClient::from_env()?;
    let policy = client.retry_policy();
    info!(
        "Translating into '{}' ({} mode, {} retries, up to {} attempts)",
        target,
        if client.is_mock() { "mock" } else { "live" },
        policy.strategy,
        policy.max_attempts
    );

    match client.translate(text, target).await {
        Ok(result) => {
            println!("{}", result.translated_text);
            info!(
                "{:?} translation, detected source '{}' (confidence {:.2}) after {} attempt(s)",
                result.origin, result.detected_source, result.confidence, result.attempts_used
            );
            Ok(())
        }
        Err(failure) => {
            eprintln!("{}: {}", failure.kind(), failure.message());
            std::process::exit(1);
        }
    }
}
