//! Predict command implementation

use std::collections::HashMap;
use std::fs;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PredictArgs;
use crate::error::{Error, Result};
use crate::serving::ModelHandle;

pub fn run_predict(args: PredictArgs, level: LogLevel) -> Result<()> {
    let config = args.common.resolve()?;

    let raw = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return Err(Error::InvalidInput("either --json or --file is required".into())),
    };
    let features = parse_features(&raw)?;

    let handle = ModelHandle::open(config.layout().models_dir())?;
    log(level, LogLevel::Verbose, &format!("Using model version: {}", handle.version()));

    let prediction = handle.predict_named(&features)?;
    if level != LogLevel::Quiet {
        println!("{}", serde_json::to_string(&prediction)?);
    }
    Ok(())
}

/// Parse a flat JSON object of numeric feature values
fn parse_features(raw: &str) -> Result<HashMap<String, f64>> {
    serde_json::from_str(raw)
        .map_err(|e| Error::InvalidInput(format!("expected a JSON object of numeric features: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_features() {
        let features = parse_features(r#"{"num_songs": 120, "thumbs_up": 4.5}"#).unwrap();
        assert_eq!(features["num_songs"], 120.0);
        assert_eq!(features["thumbs_up"], 4.5);
    }

    #[test]
    fn test_parse_features_rejects_non_numeric() {
        let err = parse_features(r#"{"num_songs": "many"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(parse_features("[1, 2]").is_err());
    }
}
