use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::convergence::convergencescan::{
    convergence_scan,
    ScanReport,
    ScanSettings
};
use crate::convergence::integrand::{
    Integrand,
    ReferenceValue
};
use crate::quadrature::quadratureerror::QuadratureError;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    JsonParse(#[from] serde_json::Error),
    #[error("scan case '{name}': {source}")]
    InvalidCase {
        name: String,
        #[source]
        source: QuadratureError
    }
}

#[derive(Deserialize)]
struct ScanCaseJsonProp {
    name: String,
    integrand: Integrand,
    lower: f64,
    upper: f64,
    #[serde(default)]
    reference: ReferenceValue,
    min_points: Option<usize>,
    max_points: Option<usize>,
    tolerance: Option<f64>
}

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    cases: Vec<ScanCaseJsonProp>
}

// ─────────────────────────────────────────────────────────────────────────────
// ScanCase
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScanCase {
    name: String,
    integrand: Integrand,
    lower: f64,
    upper: f64,
    reference: ReferenceValue,
    settings: ScanSettings
}

impl ScanCase {
    pub fn new(
        name: String,
        integrand: Integrand,
        lower: f64,
        upper: f64,
        reference: ReferenceValue,
        settings: ScanSettings,
    ) -> Result<ScanCase, ConfigurationError> {
        settings
            .validate()
            .and_then(|_| QuadratureError::check_interval(lower, upper))
            .map_err(|source| ConfigurationError::InvalidCase { name: name.clone(), source })?;
        Ok(ScanCase { name, integrand, lower, upper, reference, settings })
    }

    fn from_json_prop(prop: ScanCaseJsonProp) -> Result<ScanCase, ConfigurationError> {
        let defaults = ScanSettings::default();
        let settings = ScanSettings::new(
            prop.min_points.unwrap_or(defaults.min_points()),
            prop.max_points.unwrap_or(defaults.max_points()),
            prop.tolerance.unwrap_or(defaults.tolerance()),
        ).map_err(|source| ConfigurationError::InvalidCase { name: prop.name.clone(), source })?;
        ScanCase::new(prop.name, prop.integrand, prop.lower, prop.upper, prop.reference, settings)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn integrand(&self) -> &Integrand {
        &self.integrand
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn reference(&self) -> ReferenceValue {
        self.reference
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    pub fn run(&self) -> Result<ScanReport, QuadratureError> {
        info!(
            "scan '{}': {} over [{}, {}], N = {}..={}",
            self.name, self.integrand, self.lower, self.upper,
            self.settings.min_points(), self.settings.max_points()
        );
        let f = |x: f64| self.integrand.value(x);
        let reference = self.reference.resolve(f, self.lower, self.upper)?;
        convergence_scan(f, self.lower, self.upper, reference, self.settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Configuration {
    cases: Vec<ScanCase>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration { cases: Vec::new() }
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        Self::from_json_prop(json_prop)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        Self::from_json_prop(json_prop)
    }

    fn from_json_prop(json_prop: ConfigurationJsonProp) -> Result<Configuration, ConfigurationError> {
        let cases = json_prop
            .cases
            .into_iter()
            .map(ScanCase::from_json_prop)
            .collect::<Result<Vec<ScanCase>, ConfigurationError>>()?;
        Ok(Configuration { cases })
    }

    pub fn push(&mut self, case: ScanCase) {
        self.cases.push(case);
    }

    pub fn cases(&self) -> &[ScanCase] {
        &self.cases
    }
}
