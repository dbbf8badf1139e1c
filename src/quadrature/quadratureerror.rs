use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("symmetric eigen-decomposition of the {0}-point Jacobi matrix did not converge")]
    EigenDecomposition(usize),
}

impl QuadratureError {
    pub fn invalid_point_count(n: usize) -> QuadratureError {
        QuadratureError::InvalidArgument(format!(
            "number of quadrature points must be at least 1, got {}",
            n
        ))
    }

    /// 要求 a、b 皆為有限值、a < b，且區間長度 b - a 不溢位
    pub fn check_interval(a: f64, b: f64) -> Result<(), QuadratureError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(QuadratureError::InvalidArgument(format!(
                "integration bounds must be finite, got [{}, {}]",
                a, b
            )));
        }
        if a >= b {
            return Err(QuadratureError::InvalidArgument(format!(
                "lower bound must be strictly less than upper bound, got [{}, {}]",
                a, b
            )));
        }
        if !(b - a).is_finite() {
            return Err(QuadratureError::InvalidArgument(format!(
                "interval length overflows for [{}, {}]",
                a, b
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_interval() {
        assert!(QuadratureError::check_interval(0.0, 1.0).is_ok());
        assert!(QuadratureError::check_interval(1.0, 1.0).is_err());
        assert!(QuadratureError::check_interval(2.0, 1.0).is_err());
        assert!(QuadratureError::check_interval(f64::NAN, 1.0).is_err());
        assert!(QuadratureError::check_interval(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_interval_rejects_overflowing_length() {
        assert!(matches!(
            QuadratureError::check_interval(-f64::MAX, f64::MAX),
            Err(QuadratureError::InvalidArgument(_))
        ));
        assert!(QuadratureError::check_interval(-1e308, 1e308).is_err());
        assert!(QuadratureError::check_interval(1e308, 1.7e308).is_ok());
    }

    #[test]
    fn test_display() {
        let error = QuadratureError::invalid_point_count(0);
        assert_eq!(
            error.to_string(),
            "invalid argument: number of quadrature points must be at least 1, got 0"
        );
    }
}
