//! Central and noncentral Student-t distribution functions
//!
//! Small and moderate degrees of freedom go through `statrs` special
//! functions. Past `LARGE_DF` the incomplete-beta continued fraction stops
//! converging reliably, so the t family is evaluated through expansions
//! around the standard normal instead. Past `NORMAL_DF` it *is* the normal.

use std::f64::consts::SQRT_2;

use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::function::beta::beta_reg;
use statrs::function::erf::{erfc, erfc_inv};
use statrs::function::gamma::ln_gamma;

/// Switch point to normal-based expansions
pub const LARGE_DF: f64 = 1e4;
/// Degrees of freedom treated as infinite
pub const NORMAL_DF: f64 = 1e8;

const LN_SQRT_PI: f64 = 0.572_364_942_924_700_1;
const SQRT_2_OVER_PI: f64 = 0.797_884_560_802_865_4;

const NEWTON_STEPS: usize = 8;
const NCT_ERRMAX: f64 = 1e-12;
const NCT_BASE_ITERATIONS: usize = 1000;
/// exp(-lambda / 2) underflows beyond this noncentrality
const NCT_MAX_LAMBDA: f64 = 1415.0;

/// Standard normal CDF
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal quantile
pub fn normal_quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Student-t density
pub fn t_pdf(x: f64, df: f64) -> f64 {
    if df >= NORMAL_DF {
        return (-0.5 * x * x).exp() * SQRT_2_OVER_PI * 0.5;
    }
    let log_density = ln_gamma(0.5 * (df + 1.0))
        - ln_gamma(0.5 * df)
        - 0.5 * (df * std::f64::consts::PI).ln()
        - 0.5 * (df + 1.0) * (x * x / df).ln_1p();
    log_density.exp()
}

/// Student-t CDF
pub fn t_cdf(x: f64, df: f64) -> f64 {
    if df >= NORMAL_DF {
        return normal_cdf(x);
    }
    if df > LARGE_DF {
        return normal_cdf(x * (1.0 - 1.0 / (4.0 * df)) / (1.0 + x * x / (2.0 * df)).sqrt());
    }
    let tail = 0.5 * beta_reg(0.5 * df, 0.5, df / (df + x * x));
    if x > 0.0 { 1.0 - tail } else { tail }
}

/// Student-t quantile, `p` in (0, 1)
pub fn t_quantile(p: f64, df: f64) -> f64 {
    let z = normal_quantile(p);
    if df >= NORMAL_DF {
        return z;
    }
    if df > LARGE_DF {
        return cornish_fisher(z, df);
    }

    let seed = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.inverse_cdf(p),
        Err(_) => cornish_fisher(z, df),
    };
    let mut x = if seed.is_finite() {
        seed
    } else {
        cornish_fisher(z, df)
    };

    // Polish against our own CDF so quantile and CDF agree to rounding
    for _ in 0..NEWTON_STEPS {
        let density = t_pdf(x, df);
        if !(density > f64::MIN_POSITIVE) {
            break;
        }
        let step = (t_cdf(x, df) - p) / density;
        x -= step;
        if step.abs() <= 1e-13 * x.abs().max(1.0) {
            break;
        }
    }
    x
}

/// Four-term Cornish-Fisher expansion of the t quantile around `z`
fn cornish_fisher(z: f64, df: f64) -> f64 {
    let z2 = z * z;
    let g1 = (z2 + 1.0) * z / 4.0;
    let g2 = ((5.0 * z2 + 16.0) * z2 + 3.0) * z / 96.0;
    let g3 = (((3.0 * z2 + 19.0) * z2 + 17.0) * z2 - 15.0) * z / 384.0;
    z + g1 / df + g2 / (df * df) + g3 / (df * df * df)
}

/// Noncentral-t CDF P(T <= t) with noncentrality `delta`
///
/// Series of Lenth (1989, AS 243): Poisson-weighted incomplete beta terms,
/// summed until the remaining Poisson mass bounds the error.
pub fn noncentral_t_cdf(t: f64, df: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return t_cdf(t, df);
    }
    if df > LARGE_DF || delta * delta > NCT_MAX_LAMBDA {
        let scale = (1.0 + t * t / (2.0 * df)).sqrt();
        return normal_cdf((t * (1.0 - 1.0 / (4.0 * df)) - delta) / scale);
    }

    // Reflect so the series always runs on t >= 0
    let (tt, del, negdel) = if t >= 0.0 {
        (t, delta, false)
    } else {
        (-t, -delta, true)
    };

    let lambda = del * del;
    let x = tt * tt / (tt * tt + df);
    let mut tnc = 0.0;

    if x > 0.0 {
        let mut p = 0.5 * (-0.5 * lambda).exp();
        let mut q = SQRT_2_OVER_PI * p * del;
        let mut s = 0.5 - p;
        if s < 1e-7 {
            s = -0.5 * (-0.5 * lambda).exp_m1();
        }

        let mut a = 0.5;
        let b = 0.5 * df;
        let rxb = (1.0 - x).powf(b);
        let albeta = LN_SQRT_PI + ln_gamma(b) - ln_gamma(0.5 + b);
        let mut xodd = beta_reg(a, b, x);
        let mut godd = 2.0 * rxb * (a * x.ln() - albeta).exp();
        let bx = b * x;
        let mut xeven = if bx < f64::EPSILON { bx } else { 1.0 - rxb };
        let mut geven = bx * rxb;
        tnc = p * xodd + q * xeven;

        let max_iterations = NCT_BASE_ITERATIONS + lambda.ceil() as usize;
        for it in 1..=max_iterations {
            let it = it as f64;
            a += 1.0;
            xodd -= godd;
            xeven -= geven;
            godd *= x * (a + b - 1.0) / a;
            geven *= x * (a + b - 0.5) / (a + 0.5);
            p *= lambda / (2.0 * it);
            q *= lambda / (2.0 * it + 1.0);
            tnc += p * xodd + q * xeven;
            s -= p;
            if s < -1e-10 || (s <= 0.0 && it > 1.0) {
                break;
            }
            let errbd = 2.0 * s * (xodd - godd);
            if errbd.abs() < NCT_ERRMAX {
                break;
            }
        }
    }

    tnc += normal_cdf(-del);
    let cdf = if negdel { 1.0 - tnc } else { tnc };
    cdf.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_normal_quantile() {
        assert!(close(normal_quantile(0.975), 1.959_963_984_540_054, 1e-9));
        assert!(close(normal_quantile(0.5), 0.0, 1e-12));
        assert!(close(normal_cdf(1.959_963_984_540_054), 0.975, 1e-9));
    }

    #[test]
    fn test_t_quantile_known_values() {
        assert!(close(t_quantile(0.975, 10.0), 2.228_138_851_986_274, 1e-8));
        assert!(close(t_quantile(0.8, 20.0), 0.859_964_439_732_386, 1e-8));
        assert!(close(t_quantile(0.3, 20.0), -0.532_862_791_616_332, 1e-8));
        assert!(close(t_quantile(0.995, 5.0), 4.032_142_983_555_227, 1e-7));
        assert!(close(t_quantile(0.975, 1.0), 12.706_204_736_174_69, 1e-6));
        assert!(close(t_quantile(0.975, 3000.0), 1.960_755_055_322_458, 1e-8));
    }

    #[test]
    fn test_t_quantile_inverts_cdf() {
        for df in [2.0, 7.5, 38.0, 500.0] {
            for p in [0.1, 0.3, 0.8, 0.99] {
                let x = t_quantile(p, df);
                assert!(close(t_cdf(x, df), p, 1e-10), "df={df} p={p}");
            }
        }
    }

    #[test]
    fn test_t_large_df_matches_normal() {
        let z = normal_quantile(0.975);
        assert!(close(t_quantile(0.975, 1e6), z, 1e-5));
        assert_eq!(t_quantile(0.975, f64::INFINITY), z);
        // Both sides of the expansion switch agree
        assert!(close(t_quantile(0.9, LARGE_DF), t_quantile(0.9, LARGE_DF + 1.0), 1e-7));
    }

    #[test]
    fn test_t_cdf_known_values() {
        assert!(close(t_cdf(1.5, 7.0), 0.911_350_756_505_015, 1e-10));
        assert!(close(t_cdf(-2.0, 3.0), 0.069_662_984_279_421_5, 1e-10));
    }

    #[test]
    fn test_noncentral_t_cdf_known_values() {
        assert!(close(noncentral_t_cdf(1.5, 10.0, 0.5), 0.819_653_879_860_222, 1e-8));
        assert!(close(noncentral_t_cdf(-1.0, 4.0, 2.0), 0.002_573_232_174_844, 1e-8));
        assert!(close(noncentral_t_cdf(2.0, 30.0, 3.0), 0.162_414_208_003_940, 1e-8));
        assert!(close(noncentral_t_cdf(1.96, 200.0, 2.8), 0.200_892_033_294_022, 1e-8));
        assert!(close(noncentral_t_cdf(-1.0, 12.0, -0.5), 0.319_282_114_896_671, 1e-8));
    }

    #[test]
    fn test_noncentral_t_reduces_to_central() {
        assert!(close(noncentral_t_cdf(1.2, 9.0, 0.0), t_cdf(1.2, 9.0), 1e-14));
        assert!(close(noncentral_t_cdf(0.0, 9.0, 1.0), normal_cdf(-1.0), 1e-12));
    }

    #[test]
    fn test_noncentral_t_monotone_in_delta() {
        let mut last = 1.0;
        for i in 0..20 {
            let cdf = noncentral_t_cdf(2.0, 15.0, i as f64 * 0.25);
            assert!(cdf <= last + 1e-12);
            last = cdf;
        }
    }
}
