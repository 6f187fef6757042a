//! Nonlinear least-squares optimization.

/// Result of a Levenberg–Marquardt solve.
#[derive(Debug, Clone)]
pub struct LevenbergMarquardtResult {
    /// The optimal point found.
    pub optimal_point: Vec<f64>,
    /// Sum of squared residuals at the optimal point.
    pub optimal_value: f64,
    /// Number of outer iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged.
    pub converged: bool,
}

/// Configuration for Levenberg–Marquardt optimization.
#[derive(Debug, Clone)]
pub struct LevenbergMarquardtConfig {
    /// Maximum number of outer iterations.
    pub max_iter: usize,
    /// Relative tolerance on cost reduction and step size.
    pub tolerance: f64,
    /// Initial damping factor (default: 1e-3).
    pub initial_lambda: f64,
    /// Damping multiplier after a rejected step (default: 10.0).
    pub lambda_up: f64,
    /// Damping multiplier after an accepted step (default: 0.1).
    pub lambda_down: f64,
    /// Damping above which no descent direction is searched any more.
    pub max_lambda: f64,
}

impl Default for LevenbergMarquardtConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-10,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            max_lambda: 1e16,
        }
    }
}

/// Minimize `sum(r_i(p)^2)` with the Levenberg–Marquardt method.
///
/// # Arguments
/// * `residuals` - Residual vector `r(p)`
/// * `jacobian` - Jacobian rows `d r_i / d p_j`, one row per residual
/// * `initial` - Initial guess for the parameters
/// * `config` - Configuration parameters
///
/// Weighted problems are expressed by scaling each residual and its Jacobian
/// row by the square root of the weight.
///
/// # Example
/// ```
/// use summing_detector::utils::optimization::{levenberg_marquardt, LevenbergMarquardtConfig};
///
/// // Fit y = a * exp(b * x) to exact data with a = 2, b = 0.5
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys: Vec<f64> = xs.iter().map(|x: &f64| 2.0 * (0.5 * x).exp()).collect();
///
/// let result = levenberg_marquardt(
///     |p| xs.iter().zip(&ys).map(|(x, y)| y - p[0] * (p[1] * x).exp()).collect(),
///     |p| {
///         xs.iter()
///             .map(|x| vec![-(p[1] * x).exp(), -p[0] * x * (p[1] * x).exp()])
///             .collect()
///     },
///     &[1.0, 0.1],
///     LevenbergMarquardtConfig::default(),
/// );
///
/// assert!(result.converged);
/// assert!((result.optimal_point[0] - 2.0).abs() < 1e-4);
/// assert!((result.optimal_point[1] - 0.5).abs() < 1e-4);
/// ```
pub fn levenberg_marquardt<R, J>(
    residuals: R,
    jacobian: J,
    initial: &[f64],
    config: LevenbergMarquardtConfig,
) -> LevenbergMarquardtResult
where
    R: Fn(&[f64]) -> Vec<f64>,
    J: Fn(&[f64]) -> Vec<Vec<f64>>,
{
    let n = initial.len();
    if n == 0 {
        return LevenbergMarquardtResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let mut point = initial.to_vec();
    let mut cost = sum_of_squares(&residuals(&point));
    let mut lambda = config.initial_lambda;
    let mut iterations = 0;
    let mut converged = false;

    if !cost.is_finite() {
        return LevenbergMarquardtResult {
            optimal_point: point,
            optimal_value: cost,
            iterations,
            converged,
        };
    }

    'outer: while iterations < config.max_iter {
        iterations += 1;

        let r = residuals(&point);
        let jac = jacobian(&point);

        // Normal equations: J'J and J'r
        let mut jtj = vec![vec![0.0; n]; n];
        let mut jtr = vec![0.0; n];
        for (row, &ri) in jac.iter().zip(r.iter()) {
            for a in 0..n {
                jtr[a] += row[a] * ri;
                for b in 0..=a {
                    jtj[a][b] += row[a] * row[b];
                }
            }
        }
        for a in 0..n {
            for b in 0..a {
                jtj[b][a] = jtj[a][b];
            }
        }

        if jtr.iter().all(|g| g.abs() < config.tolerance) {
            converged = true;
            break;
        }

        loop {
            let mut damped = jtj.clone();
            for (a, row) in damped.iter_mut().enumerate() {
                row[a] += lambda * jtj[a][a].max(1e-12);
            }
            let rhs: Vec<f64> = jtr.iter().map(|g| -g).collect();

            if let Some(step) = solve_symmetric(&damped, &rhs) {
                let candidate: Vec<f64> = point.iter().zip(&step).map(|(p, s)| p + s).collect();
                let candidate_cost = sum_of_squares(&residuals(&candidate));

                if candidate_cost.is_finite() && candidate_cost < cost {
                    let reduction = cost - candidate_cost;
                    let step_norm = norm(&step);
                    let point_norm = norm(&point);

                    point = candidate;
                    cost = candidate_cost;
                    lambda = (lambda * config.lambda_down).max(1e-12);

                    if reduction <= config.tolerance * cost.max(config.tolerance)
                        || step_norm <= config.tolerance * (point_norm + config.tolerance)
                    {
                        converged = true;
                        break 'outer;
                    }
                    break;
                }
            }

            lambda *= config.lambda_up;
            if lambda > config.max_lambda {
                // No descent direction left around the current point
                converged = true;
                break 'outer;
            }
        }
    }

    LevenbergMarquardtResult {
        optimal_point: point,
        optimal_value: cost,
        iterations,
        converged,
    }
}

fn sum_of_squares(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum()
}

fn norm(values: &[f64]) -> f64 {
    sum_of_squares(values).sqrt()
}

/// Solve a symmetric positive definite system using Cholesky decomposition.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // L' x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
