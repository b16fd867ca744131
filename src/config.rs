use std::path::PathBuf;

use clap::Parser;

/// Launch records dashboard: success pie and payload scatter per launch site.
#[derive(Parser, Debug, Clone)]
#[command(name = "launch-dash", version, about)]
pub struct Config {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(
        value_name = "FILE",
        env = "LAUNCH_DASH_DATA",
        default_value = "spacex_launch_dash.csv"
    )]
    pub data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,

    /// Payload slider step in kg (0 for continuous)
    #[arg(long, default_value_t = 1000.0)]
    pub payload_step: f64,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write the initial charts as JSON to PATH and exit without opening a window
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explicit_arguments() {
        let config = Config::try_parse_from([
            "launch-dash",
            "launches.parquet",
            "--payload-step",
            "500",
            "--export-json",
            "charts.json",
        ])
        .unwrap();

        assert_eq!(config.data, PathBuf::from("launches.parquet"));
        assert_eq!(config.payload_step, 500.0);
        assert_eq!(config.export_json, Some(PathBuf::from("charts.json")));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn rejects_non_numeric_width() {
        assert!(Config::try_parse_from(["launch-dash", "--width", "wide"]).is_err());
    }
}
