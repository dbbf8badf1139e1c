use crate::quadrature::legendre::legendre_rule;
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::quadraturerule::{
    scale_to_interval,
    QuadratureRule
};

pub trait Integrator {
    fn integral<F>(&self, f: F, a: f64, b: f64) -> Result<f64, QuadratureError>
    where
        F: Fn(f64) -> f64;
}

/// 以 n 點 Gauss-Legendre 規則近似 ∫_a^b f(x) dx。
///
/// 規則在每次呼叫時重新計算；重複使用同一 n 時可改用 [`GaussLegendre`] 或 `RuleCache`。
pub fn integrate<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let rule = legendre_rule(n)?;
    Ok(scale_to_interval(&rule, a, b)?.sum(f))
}

/// `integrate` 的可失敗版本：f 回傳的第一個錯誤原封不動傳回呼叫方。
pub fn try_integrate<F, E>(f: F, a: f64, b: f64, n: usize) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<QuadratureError>,
{
    let rule = legendre_rule(n)?;
    scale_to_interval(&rule, a, b)?.try_sum(f)
}

// ─────────────────────────────────────────────────────────────────────────────
// GaussLegendre：綁定點數 n 的積分器
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GaussLegendre {
    rule: QuadratureRule
}

impl GaussLegendre {
    pub fn new(n: usize) -> Result<GaussLegendre, QuadratureError> {
        Ok(GaussLegendre { rule: legendre_rule(n)? })
    }

    pub fn from_rule(rule: QuadratureRule) -> GaussLegendre {
        GaussLegendre { rule }
    }

    pub fn points(&self) -> usize {
        self.rule.len()
    }

    pub fn rule(&self) -> &QuadratureRule {
        &self.rule
    }

    pub fn try_integral<F, E>(&self, f: F, a: f64, b: f64) -> Result<f64, E>
    where
        F: Fn(f64) -> Result<f64, E>,
        E: From<QuadratureError>,
    {
        scale_to_interval(&self.rule, a, b)?.try_sum(f)
    }
}

impl Integrator for GaussLegendre {
    fn integral<F>(&self, f: F, a: f64, b: f64) -> Result<f64, QuadratureError>
    where
        F: Fn(f64) -> f64,
    {
        Ok(scale_to_interval(&self.rule, a, b)?.sum(f))
    }
}
