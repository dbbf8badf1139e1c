use std::fmt;

use log::{
    info,
    trace,
    warn
};
use serde::Deserialize;

use crate::quadrature::integrator::GaussLegendre;
use crate::quadrature::quadratureerror::QuadratureError;

// ─────────────────────────────────────────────────────────────────────────────
// ScanSettings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    min_points: usize,
    max_points: usize,
    tolerance: f64
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings { min_points: 1, max_points: 20, tolerance: 1e-12 }
    }
}

impl ScanSettings {
    pub fn new(min_points: usize, max_points: usize, tolerance: f64) -> Result<ScanSettings, QuadratureError> {
        let settings = ScanSettings { min_points, max_points, tolerance };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), QuadratureError> {
        if self.min_points == 0 {
            return Err(QuadratureError::invalid_point_count(self.min_points));
        }
        if self.min_points > self.max_points {
            return Err(QuadratureError::InvalidArgument(format!(
                "min_points {} exceeds max_points {}",
                self.min_points, self.max_points
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(QuadratureError::InvalidArgument(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScanStep / ScanReport
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanStep {
    pub points: usize,
    pub value: f64,
    pub error: f64
}

impl fmt::Display for ScanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N={:2}  I_N={:.15}  err={:.3e}", self.points, self.value, self.error)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    reference: f64,
    settings: ScanSettings,
    steps: Vec<ScanStep>,
    converged_at: Option<usize>
}

impl ScanReport {
    pub fn reference(&self) -> f64 {
        self.reference
    }

    pub fn tolerance(&self) -> f64 {
        self.settings.tolerance
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    pub fn steps(&self) -> &[ScanStep] {
        &self.steps
    }

    /// 第一個誤差低於容許值的點數；未收斂時為 None
    pub fn converged_at(&self) -> Option<usize> {
        self.converged_at
    }

    pub fn is_converged(&self) -> bool {
        self.converged_at.is_some()
    }

    pub fn best(&self) -> Option<&ScanStep> {
        self.steps.iter().min_by(|lhs, rhs| lhs.error.total_cmp(&rhs.error))
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "reference = {:.15}", self.reference)?;
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        match self.converged_at {
            Some(n) => write!(f, "tolerance {:e} reached with N = {}", self.settings.tolerance, n),
            None => write!(
                f,
                "tolerance {:e} not reached for N <= {}",
                self.settings.tolerance, self.settings.max_points
            ),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// convergence_scan
// ─────────────────────────────────────────────────────────────────────────────
//
// N = min..=max 線性搜尋，遇到 |I_N - reference| < tolerance 即停止。
// 未收斂不是錯誤：只記錄 warn 並回傳 converged_at = None。

pub fn convergence_scan<F>(
    f: F,
    a: f64,
    b: f64,
    reference: f64,
    settings: ScanSettings,
) -> Result<ScanReport, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    try_convergence_scan(|x| Ok(f(x)), a, b, reference, settings)
}

/// 被積函數可失敗的版本：f 的錯誤原封不動傳回，掃描隨即中止。
pub fn try_convergence_scan<F, E>(
    f: F,
    a: f64,
    b: f64,
    reference: f64,
    settings: ScanSettings,
) -> Result<ScanReport, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<QuadratureError>,
{
    settings.validate()?;
    QuadratureError::check_interval(a, b)?;
    if !reference.is_finite() {
        return Err(QuadratureError::InvalidArgument(format!(
            "reference value must be finite, got {}",
            reference
        )).into());
    }

    let mut steps = Vec::new();
    let mut converged_at = None;

    for n in settings.min_points..=settings.max_points {
        let value = GaussLegendre::new(n)?.try_integral(&f, a, b)?;
        let error = (value - reference).abs();
        trace!("N = {}: I_N = {:.15}, err = {:.3e}", n, value, error);
        steps.push(ScanStep { points: n, value, error });
        if error < settings.tolerance {
            converged_at = Some(n);
            break;
        }
    }

    match converged_at {
        Some(n) => info!("tolerance {:e} reached with N = {}", settings.tolerance, n),
        None => warn!("tolerance {:e} not reached for N <= {}", settings.tolerance, settings.max_points),
    }

    Ok(ScanReport { reference, settings, steps, converged_at })
}
