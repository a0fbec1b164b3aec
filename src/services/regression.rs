use crate::domain::trend::TrendLine;

/// Ordinary least squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a line through `points`.
///
/// - Fewer than two points => `None`.
/// - All `x` equal => slope 0 through the mean of `y`.
pub fn fit_line(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (covariance, variance) = points.iter().fold((0.0, 0.0), |(cov, var), (x, y)| {
        let dx = x - mean_x;
        (cov + dx * (y - mean_y), var + dx * dx)
    });

    if variance <= f64::EPSILON * n {
        return Some(LinearFit {
            slope: 0.0,
            intercept: mean_y,
        });
    }

    let slope = covariance / variance;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Fitted line drawn from the shortest to the longest `x` of `points`.
pub fn trend_line_through(points: &[(f64, f64)]) -> Option<TrendLine> {
    let fit = fit_line(points)?;
    let min_x = points.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);

    Some(TrendLine {
        x: [min_x, max_x],
        y: [fit.at(min_x), fit.at(max_x)],
        slope: fit.slope,
        intercept: fit.intercept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fit_line_needs_two_points() {
        assert_eq!(fit_line(&[]), None);
        assert_eq!(fit_line(&[(1.0, 2.0)]), None);
    }

    #[test]
    fn fit_line_recovers_an_exact_line() {
        let fit = fit_line(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]).unwrap();
        assert_close(fit.slope, 2.0);
        assert_close(fit.intercept, 1.0);
        assert_close(fit.at(10.0), 21.0);
    }

    #[test]
    fn fit_line_minimises_squared_error() {
        // mean_x = 2, mean_y = 3; cov = 3, var = 2 => slope 1.5, intercept 0
        let fit = fit_line(&[(1.0, 2.0), (2.0, 2.0), (3.0, 5.0)]).unwrap();
        assert_close(fit.slope, 1.5);
        assert_close(fit.intercept, 0.0);
    }

    #[test]
    fn identical_x_values_give_a_flat_line_through_the_mean() {
        let fit = fit_line(&[(4.0, 10.0), (4.0, 30.0)]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_close(fit.intercept, 20.0);
    }

    #[test]
    fn trend_line_spans_the_x_range() {
        let line = trend_line_through(&[(6.0, 13.0), (2.0, 5.0), (4.0, 9.0)]).unwrap();
        assert_eq!(line.x, [2.0, 6.0]);
        assert_close(line.y[0], 5.0);
        assert_close(line.y[1], 13.0);
        assert_close(line.slope, 2.0);
    }
}
