//! Config command: print the resolved configuration

use switchboard_core::{Config, Result};

pub fn run(config: &Config) -> Result<()> {
    let mut redacted = config.clone();
    if redacted.llm_service.api_key.is_some() {
        redacted.llm_service.api_key = Some("<redacted>".to_string());
    }
    if redacted.weather.api_key.is_some() {
        redacted.weather.api_key = Some("<redacted>".to_string());
    }

    println!("{}", serde_yaml::to_string(&redacted)?);
    Ok(())
}
