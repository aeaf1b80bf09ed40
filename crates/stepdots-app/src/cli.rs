//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Render a step indicator to a PNG file.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "stepdots", version, about)]
pub struct AppConfig {
    /// JSON widget configuration (defaults when omitted)
    #[arg(value_name = "CONFIG")]
    pub config_path: Option<PathBuf>,

    /// PNG file to write
    #[arg(short, long = "out", value_name = "FILE", default_value = "stepdots.png")]
    pub output: PathBuf,

    /// Exact width in pixels (natural width when omitted)
    #[arg(long, value_parser = parse_positive)]
    pub width: Option<f64>,

    /// Exact height in pixels (natural height when omitted)
    #[arg(long, value_parser = parse_positive)]
    pub height: Option<f64>,

    /// Selected dot, or the dot count to select every dot
    #[arg(short, long)]
    pub select: Option<usize>,

    /// One label per dot, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Resolution multiplier
    #[arg(long, default_value_t = 1.0, value_parser = parse_positive)]
    pub scale: f64,

    /// TTF/OTF font for labels (system sans-serif when omitted)
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            output: PathBuf::from("stepdots.png"),
            width: None,
            height: None,
            select: None,
            labels: None,
            scale: 1.0,
            font: None,
        }
    }
}

fn parse_positive(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("expected a positive number, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<AppConfig, clap::Error> {
        AppConfig::try_parse_from(std::iter::once("stepdots").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.output, PathBuf::from("stepdots.png"));
    }

    #[test]
    fn test_all_options() {
        let config = parse(&[
            "dots.json", "--out", "out.png", "--width", "560", "--height", "300",
            "--select", "1", "--labels", "Cart,Ship,Pay", "--scale", "2", "--font", "Roboto.ttf",
        ])
        .unwrap();
        assert_eq!(config.config_path, Some(PathBuf::from("dots.json")));
        assert_eq!(config.output, PathBuf::from("out.png"));
        assert_eq!(config.width, Some(560.0));
        assert_eq!(config.height, Some(300.0));
        assert_eq!(config.select, Some(1));
        assert_eq!(
            config.labels,
            Some(vec!["Cart".to_string(), "Ship".to_string(), "Pay".to_string()])
        );
        assert!((config.scale - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.font, Some(PathBuf::from("Roboto.ttf")));
    }

    #[test]
    fn test_missing_value() {
        assert!(parse(&["--out"]).is_err());
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(parse(&["--width", "wide"]).is_err());
        assert!(parse(&["--scale", "0"]).is_err());
        assert!(parse(&["--select", "-1"]).is_err());
    }

    #[test]
    fn test_unknown_option() {
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert!((parse_positive("1.5").unwrap() - 1.5).abs() < f64::EPSILON);
        assert!(parse_positive("-3").is_err());
        assert!(parse_positive("inf").is_err());
    }
}
