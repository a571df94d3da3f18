//! Recursive exponential smoothing along a chain.
//!
//! A second-order low-pass filter run from the root to the tip. It
//! suppresses short-wavelength jitter while keeping long-wavelength
//! curvature, so curvature forces can target a smooth shape.
//!
//! With `d` the smoothing amount and `s` the smoothed value:
//!
//! ```text
//! d[0] = q[1] − q[0]                     s[0] = q[0]
//! d[i] = 2(1−β)d[i−1] − (1−β)²d[i−2]     s[i] = s[i−1] + d[i−1]
//!        + β²(q[i+1] − q[i])
//!                                        s[n−1] = s[n−2] + d[n−2]
//! ```
//!
//! `d[0]` stands in for `d[i−2]` at `i = 1`. The filter is agnostic to
//! the quantity: positions, rest positions and velocities all go
//! through [`smooth_into`].

use glam::DVec3;
use wisp_types::Scalar;

/// One filtered element: the recursion state and the smoothed value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterSample {
    /// Smoothing amount `d[i]` (zero for the last element).
    pub amount: DVec3,
    /// Smoothed value `s[i]`.
    pub value: DVec3,
}

/// Filter coefficient `β = min(1, 1 − exp(−ℓ/τ))`.
///
/// `characteristic_length` is the strand's average spring length and
/// `tau` the smoothing amount. A non-positive `tau` disables smoothing
/// (`β = 1`, output equals input).
pub fn smoothing_coefficient(characteristic_length: Scalar, tau: Scalar) -> Scalar {
    if tau <= 0.0 {
        return 1.0;
    }
    (1.0 - (-characteristic_length / tau).exp()).min(1.0)
}

/// Runs the filter over `quantity`, writing one sample per element.
///
/// # Panics
/// If `out.len() != quantity.len()`.
pub fn smooth_into(beta: Scalar, quantity: &[DVec3], out: &mut [FilterSample]) {
    assert_eq!(
        quantity.len(),
        out.len(),
        "filter output length must match input length"
    );

    let n = quantity.len();
    match n {
        0 => return,
        1 => {
            out[0] = FilterSample {
                amount: DVec3::ZERO,
                value: quantity[0],
            };
            return;
        }
        _ => {}
    }

    let keep = 1.0 - beta;
    let c1 = 2.0 * keep;
    let c2 = keep * keep;
    let c3 = beta * beta;

    out[0] = FilterSample {
        amount: quantity[1] - quantity[0],
        value: quantity[0],
    };

    for i in 1..n - 1 {
        let prev = out[i - 1].amount;
        let prev2 = if i >= 2 { out[i - 2].amount } else { out[0].amount };
        out[i] = FilterSample {
            amount: c1 * prev - c2 * prev2 + c3 * (quantity[i + 1] - quantity[i]),
            value: out[i - 1].value + prev,
        };
    }

    out[n - 1] = FilterSample {
        amount: DVec3::ZERO,
        value: out[n - 2].value + out[n - 2].amount,
    };
}

/// Allocating convenience wrapper around [`smooth_into`].
pub fn smooth(beta: Scalar, quantity: &[DVec3]) -> Vec<FilterSample> {
    let mut out = vec![FilterSample::default(); quantity.len()];
    smooth_into(beta, quantity, &mut out);
    out
}
