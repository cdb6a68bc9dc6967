use crate::error::MedReportError;
use medreport_core::ReportOptions;
use medreport_layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variables with this prefix override file settings, with `__`
/// between nested keys: `MEDREPORT__LAYOUT__GUTTER=30`.
pub const ENV_PREFIX: &str = "MEDREPORT";

/// Name of the optional config file looked up in the working directory.
const DEFAULT_FILE: &str = "medreport";

/// Everything that controls how a report is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub layout: LayoutConfig,
    pub report: ReportOptions,
    /// Compress content streams in the written PDF.
    pub compress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            report: ReportOptions::default(),
            compress: true,
        }
    }
}

impl ReportConfig {
    /// Loads settings from `path` (or `medreport.toml` in the working
    /// directory when present) with environment overrides on top.
    pub fn load(path: Option<&Path>) -> Result<Self, MedReportError> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name(DEFAULT_FILE).required(false)),
        };

        // Always layer environment variables on top
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: ReportConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded report configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MedReportError> {
        self.layout.validate()?;
        let opacity = self.report.watermark_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(medreport_layout::LayoutError::InvalidConfig(format!(
                "report.watermark_opacity must be within 0..=1, got {}",
                opacity
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r##"
compress = false

[layout]
gutter = 30.0

[layout.fonts]
watermark = 52.0

[report]
title = "Clinic Report"
generated_at = "01/01/2024"

[report.palette]
primary = "#000000"
"##
        )
        .unwrap();

        let config = ReportConfig::load(Some(file.path())).unwrap();
        assert!(!config.compress);
        assert_eq!(config.layout.gutter, 30.0);
        assert_eq!(config.layout.fonts.watermark, 52.0);
        assert_eq!(config.layout.fonts.title, LayoutConfig::default().fonts.title);
        assert_eq!(config.report.title, "Clinic Report");
        assert_eq!(config.report.generated_at.as_deref(), Some("01/01/2024"));
        assert_eq!(config.report.palette.primary, medreport_types::Color::BLACK);
        assert_eq!(config.report.watermark_text, "CONFIDENTIAL");
    }

    #[test]
    fn rejects_out_of_range_opacity() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[report]\nwatermark_opacity = 2.0").unwrap();
        assert!(ReportConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = ReportConfig::load(Some(Path::new("/nonexistent/medreport.toml")));
        assert!(matches!(result, Err(MedReportError::Config(_))));
    }
}
