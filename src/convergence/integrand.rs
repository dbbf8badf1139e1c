use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::quadrature::quadratureerror::QuadratureError;
use crate::reference::gausskronrod::AdaptiveGaussKronrod;

/// 內建的示範被積函數
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Integrand {
    /// x⁶ - x²·sin(2x)
    SexticMinusSine,
    /// x⁶ + x²·sin(2x)
    SexticPlusSine,
    /// x²
    Square,
    /// Σ c_k·x^k，係數依次方遞增排列
    Polynomial { coefficients: Vec<f64> }
}

impl Integrand {
    pub fn value(&self, x: f64) -> f64 {
        match self {
            Integrand::SexticMinusSine => x.powi(6) - x * x * (2.0 * x).sin(),
            Integrand::SexticPlusSine => x.powi(6) + x * x * (2.0 * x).sin(),
            Integrand::Square => x * x,
            Integrand::Polynomial { coefficients } => {
                coefficients
                    .iter()
                    .rev()
                    .fold(0.0, |acc, &c| f64::mul_add(acc, x, c))
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Integrand::SexticMinusSine => "x^6 - x^2 sin(2x)".to_owned(),
            Integrand::SexticPlusSine => "x^6 + x^2 sin(2x)".to_owned(),
            Integrand::Square => "x^2".to_owned(),
            Integrand::Polynomial { coefficients } => {
                let terms: Vec<String> = coefficients
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| **c != 0.0)
                    .map(|(k, c)| match k {
                        0 => format!("{}", c),
                        1 => format!("{} x", c),
                        _ => format!("{} x^{}", c, k)
                    })
                    .collect();
                if terms.is_empty() {
                    "0".to_owned()
                } else {
                    terms.join(" + ")
                }
            }
        }
    }
}

impl fmt::Display for Integrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseIntegrandError(String);

impl fmt::Display for ParseIntegrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown integrand '{}', expected sextic-minus-sine, sextic-plus-sine, square or polynomial:c0,c1,...",
            self.0
        )
    }
}

impl std::error::Error for ParseIntegrandError {}

/// 接受 `sextic-minus-sine`、`sextic-plus-sine`、`square` 與 `polynomial:c0,c1,...`
impl FromStr for Integrand {
    type Err = ParseIntegrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "sextic-minus-sine" => return Ok(Integrand::SexticMinusSine),
            "sextic-plus-sine" => return Ok(Integrand::SexticPlusSine),
            "square" => return Ok(Integrand::Square),
            _ => {}
        }
        let coefficients = lower
            .strip_prefix("polynomial:")
            .ok_or_else(|| ParseIntegrandError(s.to_owned()))?
            .split(',')
            .map(|c| c.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| ParseIntegrandError(s.to_owned()))?;
        Ok(Integrand::Polynomial { coefficients })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ReferenceValue
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceValue {
    /// 以 AdaptiveGaussKronrod::default() 計算
    #[default]
    Adaptive,
    Exact(f64)
}

impl ReferenceValue {
    pub fn resolve<F>(&self, f: F, a: f64, b: f64) -> Result<f64, QuadratureError>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            ReferenceValue::Adaptive => Ok(AdaptiveGaussKronrod::default().integrate(f, a, b)?.value),
            ReferenceValue::Exact(value) => Ok(*value),
        }
    }
}

impl FromStr for ReferenceValue {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("adaptive") {
            Ok(ReferenceValue::Adaptive)
        } else {
            Ok(ReferenceValue::Exact(s.trim().parse::<f64>()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_horner() {
        let p = Integrand::Polynomial { coefficients: vec![1.0, -2.0, 3.0] };
        assert_eq!(p.value(2.0), 1.0 - 4.0 + 12.0);
        assert_eq!(p.label(), "1 + -2 x + 3 x^2");
        let empty = Integrand::Polynomial { coefficients: vec![] };
        assert_eq!(empty.value(5.0), 0.0);
        assert_eq!(empty.label(), "0");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("square".parse::<Integrand>(), Ok(Integrand::Square));
        assert_eq!("Sextic-Minus-Sine".parse::<Integrand>(), Ok(Integrand::SexticMinusSine));
        assert_eq!(
            "polynomial:0, 0, 1".parse::<Integrand>(),
            Ok(Integrand::Polynomial { coefficients: vec![0.0, 0.0, 1.0] })
        );
        assert!("cosine".parse::<Integrand>().is_err());
        assert!("polynomial:a,b".parse::<Integrand>().is_err());
    }

    #[test]
    fn test_deserialize() {
        let named: Integrand = serde_json::from_str("\"sextic-plus-sine\"").unwrap();
        assert_eq!(named, Integrand::SexticPlusSine);
        let poly: Integrand = serde_json::from_str(r#"{"polynomial": {"coefficients": [1.0, 2.0]}}"#).unwrap();
        assert_eq!(poly.value(3.0), 7.0);
        let reference: ReferenceValue = serde_json::from_str(r#"{"exact": 2.5}"#).unwrap();
        assert_eq!(reference, ReferenceValue::Exact(2.5));
    }

    #[test]
    fn test_json_names_match_command_line_names() {
        for name in ["sextic-minus-sine", "sextic-plus-sine", "square"] {
            let from_json: Integrand = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(Ok(from_json), name.parse::<Integrand>());
        }
        assert!(serde_json::from_str::<Integrand>("\"SexticMinusSine\"").is_err());
        let adaptive: ReferenceValue = serde_json::from_str("\"adaptive\"").unwrap();
        assert_eq!(Ok(adaptive), "adaptive".parse::<ReferenceValue>());
    }

    #[test]
    fn test_odd_part_vanishes_on_symmetric_interval() {
        let reference = ReferenceValue::Adaptive
            .resolve(|x| Integrand::SexticPlusSine.value(x), -1.0, 1.0)
            .unwrap();
        assert_relative_eq!(reference, 2.0 / 7.0, max_relative = 1e-13);
    }

    #[test]
    fn test_reference_parse() {
        assert_eq!("adaptive".parse::<ReferenceValue>(), Ok(ReferenceValue::Adaptive));
        assert_eq!("2.5".parse::<ReferenceValue>(), Ok(ReferenceValue::Exact(2.5)));
        assert!("abc".parse::<ReferenceValue>().is_err());
    }
}
