use log::debug;
use nalgebra::{
    DMatrix,
    SymmetricEigen
};

use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::quadraturerule::{
    QuadraturePoint,
    QuadratureRule
};

// ─────────────────────────────────────────────────────────────────────────────
// Gauss-Legendre 節點與權重（Golub-Welsch）
// ─────────────────────────────────────────────────────────────────────────────
//
// Legendre 三項遞迴對應的 Jacobi 矩陣 J 為對稱三對角、主對角為 0：
//
//   J[k-1, k] = J[k, k-1] = β_k = k / sqrt(4k² - 1),  k = 1..n-1
//
// J 的特徵值即 P_n 的根（節點），對應正規化特徵向量 v_i 給出權重
//
//   w_i = μ_0 · v_i[0]²，  μ_0 = ∫_{-1}^{1} 1 dx = 2
//
// 求解器不保證特徵值的排列順序，因此結果一律重新排序。

const EIGEN_EPSILON: f64 = f64::EPSILON;

fn jacobi_matrix(n: usize) -> DMatrix<f64> {
    let mut mat = DMatrix::<f64>::zeros(n, n);
    for k in 1..n {
        let kf = k as f64;
        let beta = kf / (4.0 * kf * kf - 1.0).sqrt();
        mat[(k - 1, k)] = beta;
        mat[(k, k - 1)] = beta;
    }
    mat
}

/// 讓 (x_i, x_{n-1-i}) 兩兩精確對稱，奇數 n 的中點固定為 0
fn symmetrize(pairs: &mut [(f64, f64)]) {
    let n = pairs.len();
    for i in 0..n / 2 {
        let j = n - 1 - i;
        let node = 0.5 * (pairs[j].0 - pairs[i].0);
        let weight = 0.5 * (pairs[i].1 + pairs[j].1);
        pairs[i] = (-node, weight);
        pairs[j] = (node, weight);
    }
    if n % 2 == 1 {
        pairs[n / 2].0 = 0.0;
    }
}

/// n 點 Gauss-Legendre 規則，對 [-1, 1] 上次數 ≤ 2n-1 的多項式精確。
///
/// n = 0 回傳 `QuadratureError::InvalidArgument`；n = 1 的 1×1 零矩陣直接給出 (0, 2)。
pub fn legendre_rule(n: usize) -> Result<QuadratureRule, QuadratureError> {
    if n == 0 {
        return Err(QuadratureError::invalid_point_count(n));
    }
    if n == 1 {
        return Ok(QuadratureRule::from_sorted_points(vec![QuadraturePoint::new(0.0, 2.0)]));
    }

    let eigen = SymmetricEigen::try_new(jacobi_matrix(n), EIGEN_EPSILON, 0)
        .ok_or(QuadratureError::EigenDecomposition(n))?;

    let mut pairs: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let v0 = eigen.eigenvectors[(0, i)];
            (eigen.eigenvalues[i], 2.0 * v0 * v0)
        })
        .collect();
    pairs.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));
    symmetrize(&mut pairs);

    let rule = QuadratureRule::from_sorted_points(
        pairs
            .into_iter()
            .map(|(node, weight)| QuadraturePoint::new(node, weight))
            .collect()
    );
    debug!("built {}-point Gauss-Legendre rule, weight sum deviation {:e}", n, rule.weight_sum() - 2.0);
    Ok(rule)
}
