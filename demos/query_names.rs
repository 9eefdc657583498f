//! Query Names Example
//!
//! This example demonstrates how to:
//! - Create a client (optionally through proxies from the environment)
//! - Query several names in one request
//! - Read the rate limit window after the request
//!
//! Run with:
//! ```bash
//! cargo run --example query_names
//! ```

use genderize_client::observability::{LogLevel, LoggingConfig};
use genderize_client::GenderizeClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    LoggingConfig::new()
        .with_level(LogLevel::Warn)
        .with_target(false)
        .init()?;

    let client = GenderizeClient::from_env()?;

    let results = client.query(["Emily", "Jack"]).await?;

    for record in results.iter() {
        match (record.gender, record.probability_percent()) {
            (Some(gender), Some(percent)) => println!(
                "{}% probability that {} is a {} name.",
                percent, record.name, gender
            ),
            _ => println!("No gender could be inferred for {}.", record.name),
        }
    }

    println!();
    println!(
        "{}/{} requests remaining",
        client.rate_limit_remaining(),
        client.rate_limit()
    );
    println!(
        "{} seconds until rate limit window resets",
        client.rate_limit_window()
    );

    Ok(())
}
