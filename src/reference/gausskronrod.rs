// ─────────────────────────────────────────────────────────────────────────────
// AdaptiveGaussKronrod：收斂掃描用的高精度參考值
// ─────────────────────────────────────────────────────────────────────────────
//
// 以 G7K15 配對做全域自適應二分：
//   - 每個子區間的誤差估計為 |K15 - G7|
//   - 每次切分誤差估計最大的子區間
//   - 估計總和低於容許值，或切分次數用盡時停止

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{
    debug,
    warn
};

use crate::quadrature::integrator::Integrator;
use crate::quadrature::quadratureerror::QuadratureError;

// 15 點 Kronrod 節點（正半邊，含中點），奇數索引以外者同時為 7 點 Gauss 節點
const KRONROD_NODES: [f64; 8] = [
    0.0,
    0.207784955007898467600689403773245,
    0.405845151377397166906606412076961,
    0.586087235467691130294144838258730,
    0.741531185599394439863864773280788,
    0.864864423359769072789712788640926,
    0.949107912342758524526189684047851,
    0.991455371120812639206854697526329,
];

const KRONROD_WEIGHTS: [f64; 8] = [
    0.209482141084727828012999174891714,
    0.204432940075298892414161999234649,
    0.190350578064785409913256402421014,
    0.169004726639267902826583426598550,
    0.140653259715525918745189590510238,
    0.104790010322250183839876322541518,
    0.063092092629978553290700663189204,
    0.022935322010529224963732008058970,
];

// 對應 KRONROD_NODES[0], [2], [4], [6]
const GAUSS_WEIGHTS: [f64; 4] = [
    0.417959183673469387755102040816327,
    0.381830050505118944950369775488975,
    0.279705391489276667901467771423780,
    0.129484966168869693270611432679082,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussKronrodEstimate {
    pub value: f64,
    pub error: f64,
    pub evaluations: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel：單一子區間的 G7K15 結果，依誤差估計排序
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Panel {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64
}

impl Panel {
    fn evaluate<F>(f: &F, lower: f64, upper: f64) -> Panel
    where
        F: Fn(f64) -> f64,
    {
        let center = 0.5 * lower + 0.5 * upper;
        let half_length = 0.5 * (upper - lower);

        let f_center = f(center);
        let mut kronrod = KRONROD_WEIGHTS[0] * f_center;
        let mut gauss = GAUSS_WEIGHTS[0] * f_center;

        for i in 1..KRONROD_NODES.len() {
            let dx = half_length * KRONROD_NODES[i];
            let f_sum = f(center - dx) + f(center + dx);
            kronrod += KRONROD_WEIGHTS[i] * f_sum;
            if i % 2 == 0 {
                gauss += GAUSS_WEIGHTS[i / 2] * f_sum;
            }
        }

        Panel {
            lower,
            upper,
            value: kronrod * half_length,
            error: ((kronrod - gauss) * half_length).abs()
        }
    }

    fn bisect<F>(&self, f: &F) -> (Panel, Panel)
    where
        F: Fn(f64) -> f64,
    {
        let middle = 0.5 * self.lower + 0.5 * self.upper;
        (Panel::evaluate(f, self.lower, middle), Panel::evaluate(f, middle, self.upper))
    }
}

// BinaryHeap 的排序鍵：只比較誤差估計
#[derive(Debug, Clone, Copy)]
struct ByError(Panel);

impl PartialEq for ByError {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByError {}

impl PartialOrd for ByError {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByError {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.error.total_cmp(&other.0.error)
    }
}

/// Neumaier 補償求和
pub fn compensated_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in values {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

// ─────────────────────────────────────────────────────────────────────────────
// AdaptiveGaussKronrod
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveGaussKronrod {
    relative_tolerance: f64,
    absolute_tolerance: f64,
    max_subdivisions: usize
}

impl Default for AdaptiveGaussKronrod {
    fn default() -> Self {
        AdaptiveGaussKronrod {
            relative_tolerance: 1e-14,
            absolute_tolerance: 1e-15,
            max_subdivisions: 1000
        }
    }
}

impl AdaptiveGaussKronrod {
    pub fn new(
        relative_tolerance: f64,
        absolute_tolerance: f64,
        max_subdivisions: usize,
    ) -> Result<AdaptiveGaussKronrod, QuadratureError> {
        let valid = |tol: f64| tol.is_finite() && tol >= 0.0;
        if !valid(relative_tolerance) || !valid(absolute_tolerance) {
            return Err(QuadratureError::InvalidArgument(format!(
                "tolerances must be finite and non-negative, got relative {} and absolute {}",
                relative_tolerance, absolute_tolerance
            )));
        }
        if relative_tolerance == 0.0 && absolute_tolerance == 0.0 {
            return Err(QuadratureError::InvalidArgument(
                "at least one tolerance must be positive".to_owned()
            ));
        }
        Ok(AdaptiveGaussKronrod { relative_tolerance, absolute_tolerance, max_subdivisions })
    }

    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    pub fn absolute_tolerance(&self) -> f64 {
        self.absolute_tolerance
    }

    pub fn max_subdivisions(&self) -> usize {
        self.max_subdivisions
    }

    pub fn integrate<F>(&self, f: F, a: f64, b: f64) -> Result<GaussKronrodEstimate, QuadratureError>
    where
        F: Fn(f64) -> f64,
    {
        QuadratureError::check_interval(a, b)?;

        let mut panels = BinaryHeap::new();
        panels.push(ByError(Panel::evaluate(&f, a, b)));
        let mut evaluations = 15;
        let mut subdivisions = 0;

        loop {
            let value = compensated_sum(panels.iter().map(|p| p.0.value));
            let error = compensated_sum(panels.iter().map(|p| p.0.error));
            let target = self.absolute_tolerance.max(self.relative_tolerance * value.abs());

            if error <= target {
                debug!("G7K15 converged after {} subdivisions, error estimate {:e}", subdivisions, error);
                return Ok(GaussKronrodEstimate { value, error, evaluations });
            }

            let Some(ByError(worst)) = panels.pop() else {
                return Ok(GaussKronrodEstimate { value, error, evaluations });
            };
            // 子區間已無法再以浮點數切分
            let middle = 0.5 * worst.lower + 0.5 * worst.upper;
            if subdivisions >= self.max_subdivisions || middle <= worst.lower || middle >= worst.upper {
                panels.push(ByError(worst));
                let value = compensated_sum(panels.iter().map(|p| p.0.value));
                warn!(
                    "G7K15 stopped after {} subdivisions with error estimate {:e} above target {:e}",
                    subdivisions, error, target
                );
                return Ok(GaussKronrodEstimate { value, error, evaluations });
            }

            let (left, right) = worst.bisect(&f);
            panels.push(ByError(left));
            panels.push(ByError(right));
            evaluations += 30;
            subdivisions += 1;
        }
    }
}

impl Integrator for AdaptiveGaussKronrod {
    fn integral<F>(&self, f: F, a: f64, b: f64) -> Result<f64, QuadratureError>
    where
        F: Fn(f64) -> f64,
    {
        Ok(self.integrate(f, a, b)?.value)
    }
}
