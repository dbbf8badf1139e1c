use crate::quadrature::quadratureerror::QuadratureError;

// ─────────────────────────────────────────────────────────────────────────────
// QuadraturePoint
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraturePoint {
    node: f64,
    weight: f64
}

impl QuadraturePoint {
    pub fn new(node: f64, weight: f64) -> QuadraturePoint {
        QuadraturePoint { node, weight }
    }

    pub fn node(&self) -> f64 {
        self.node
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// QuadratureRule：參考區間 [-1, 1] 上的節點與權重
// ─────────────────────────────────────────────────────────────────────────────
//
// 不變量：
//   - 節點嚴格遞增、對 0 對稱
//   - 權重總和為 2（[-1, 1] 的長度）

#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule {
    points: Vec<QuadraturePoint>
}

impl QuadratureRule {
    pub(crate) fn from_sorted_points(points: Vec<QuadraturePoint>) -> QuadratureRule {
        QuadratureRule { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[QuadraturePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuadraturePoint> {
        self.points.iter()
    }

    pub fn nodes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.node()).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.weight()).collect()
    }

    pub fn weight_sum(&self) -> f64 {
        self.points.iter().map(|p| p.weight()).sum()
    }

    /// 仿射映射到 [a, b]，見 [`scale_to_interval`]。
    pub fn scale(&self, a: f64, b: f64) -> Result<ScaledRule, QuadratureError> {
        scale_to_interval(self, a, b)
    }
}

impl<'a> IntoIterator for &'a QuadratureRule {
    type Item = &'a QuadraturePoint;
    type IntoIter = std::slice::Iter<'a, QuadraturePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScaledRule：映射到 [a, b] 後的規則，權重總和為 b - a
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScaledRule {
    points: Vec<QuadraturePoint>,
    lower: f64,
    upper: f64
}

impl ScaledRule {
    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[QuadraturePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuadraturePoint> {
        self.points.iter()
    }

    pub fn nodes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.node()).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.weight()).collect()
    }

    pub fn weight_sum(&self) -> f64 {
        self.points.iter().map(|p| p.weight()).sum()
    }

    /// Σ w'_i · f(x'_i)
    pub fn sum<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.points
            .iter()
            .map(|p| p.weight() * f(p.node()))
            .sum()
    }

    /// 第一個失敗的 f(x'_i) 直接回傳，不再評估後續節點
    pub fn try_sum<F, E>(&self, f: F) -> Result<f64, E>
    where
        F: Fn(f64) -> Result<f64, E>,
    {
        let mut result = 0.0;
        for p in &self.points {
            result += p.weight() * f(p.node())?;
        }
        Ok(result)
    }
}

/// 將 [-1, 1] 上的規則映射到 [a, b]：
///
///   x' = (b - a)/2 · x + (a + b)/2
///   w' = (b - a)/2 · w
///
/// 只接受有限且 a < b 的區間。
pub fn scale_to_interval(rule: &QuadratureRule, a: f64, b: f64) -> Result<ScaledRule, QuadratureError> {
    QuadratureError::check_interval(a, b)?;

    let half_length = 0.5 * (b - a);
    // a + b 可能溢位，分開縮放
    let midpoint = 0.5 * a + 0.5 * b;
    let points = rule
        .iter()
        .map(|p| QuadraturePoint::new(half_length * p.node() + midpoint, half_length * p.weight()))
        .collect();

    Ok(ScaledRule { points, lower: a, upper: b })
}
