//! Property-based tests for homotopy evaluation and homogenization.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use homotopy::{
    domains::float::Complex,
    homotopy::{
        DtDiffResult, GammaTrickHomotopy, Homotopy, JacobianDiffResult, PolynomialHomotopyConfig,
    },
    random::{random_system, RandomSystemOptions},
    tensors::matrix::Matrix,
};

const TOLERANCE: f64 = 1e-9;

fn close(a: &Complex<f64>, b: &Complex<f64>) -> bool {
    (a - b).norm() <= TOLERANCE * (1. + a.norm().max(b.norm()))
}

fn all_close(a: &[Complex<f64>], b: &[Complex<f64>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| close(a, b))
}

// A gamma trick homotopy between two random square systems of size 1-3
fn random_homotopy() -> impl Strategy<Value = GammaTrickHomotopy> {
    (1usize..=3, any::<u64>(), 0.2f64..=1.).prop_map(|(n, seed, density)| {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let options = RandomSystemOptions {
            min_degree: 1,
            max_degree: 4,
            density: Some(density),
        };

        let start = random_system::<f64, _>(n, n, &options, &mut rng).unwrap();
        let target = random_system::<f64, _>(n, n, &options, &mut rng).unwrap();
        GammaTrickHomotopy::with_rng(start, target, &mut rng).unwrap()
    })
}

fn point(n: usize) -> impl Strategy<Value = Vec<Complex<f64>>> {
    proptest::collection::vec((-1f64..1., -1f64..1.), n)
        .prop_map(|v| v.into_iter().map(|(re, im)| Complex::new(re, im)).collect())
}

// A homotopy with a point in its domain and a complex time
fn homotopy_and_point() -> impl Strategy<Value = (GammaTrickHomotopy, Vec<Complex<f64>>, Complex<f64>)>
{
    random_homotopy().prop_flat_map(|h| {
        let n = h.nvariables();
        (
            Just(h),
            point(n),
            (0f64..=1., -0.1f64..0.1).prop_map(|(re, im)| Complex::new(re, im)),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn into_matches_allocating((h, x, t) in homotopy_and_point()) {
        let mut cfg = PolynomialHomotopyConfig::new(&h);
        let mut out = vec![Complex::new_zero(); h.nequations()];

        let value = h.evaluate(&x, t).unwrap();
        h.evaluate_into(&mut out, &x, t).unwrap();
        prop_assert!(all_close(&out, &value));
        h.evaluate_into_with(&mut out, &x, t, &mut cfg).unwrap();
        prop_assert!(all_close(&out, &value));

        let dt = h.dt(&x, t).unwrap();
        h.dt_into_with(&mut out, &x, t, &mut cfg).unwrap();
        prop_assert!(all_close(&out, &dt));

        let j = h.jacobian(&x, t).unwrap();
        let mut m = Matrix::new(h.nequations() as u32, h.nvariables() as u32);
        h.jacobian_into_with(&mut m, &x, t, &mut cfg).unwrap();
        prop_assert!(all_close(m.data(), j.data()));
    }

    #[test]
    fn diff_results_match((h, x, t) in homotopy_and_point()) {
        let mut cfg = PolynomialHomotopyConfig::new(&h);

        let mut r = JacobianDiffResult::new(&cfg);
        h.value_and_jacobian_into(&mut r, &x, t, &mut cfg).unwrap();
        prop_assert!(all_close(r.value(), &h.evaluate(&x, t).unwrap()));
        prop_assert!(all_close(r.jacobian().data(), h.jacobian(&x, t).unwrap().data()));

        let mut r = DtDiffResult::new(&cfg);
        h.value_and_dt_into(&mut r, &x, t, &mut cfg).unwrap();
        prop_assert!(all_close(r.value(), &h.evaluate(&x, t).unwrap()));
        prop_assert!(all_close(r.dt(), &h.dt(&x, t).unwrap()));
    }

    #[test]
    fn dt_is_finite_difference((h, x, t) in homotopy_and_point()) {
        // H is linear in t, so a forward difference is exact up to rounding
        let dt = h.dt(&x, t).unwrap();
        let a = h.evaluate(&x, t).unwrap();
        let b = h.evaluate(&x, t + Complex::new(1., 0.)).unwrap();
        let diff: Vec<_> = b.iter().zip(&a).map(|(b, a)| b - a).collect();
        prop_assert!(all_close(&diff, &dt));
    }

    #[test]
    fn homogenize_laws((h, x, t) in homotopy_and_point()) {
        let hh = h.homogenize();
        prop_assert!(hh.is_homogenized());
        prop_assert!(hh.is_homogeneous());
        prop_assert_eq!(hh.nvariables(), h.nvariables() + 1);

        let hhh = hh.homogenize();
        prop_assert_eq!(hhh.start(), hh.start());
        prop_assert_eq!(hhh.target(), hh.target());

        let mut xh = vec![Complex::new(1., 0.)];
        xh.extend_from_slice(&x);
        prop_assert!(all_close(&hh.evaluate(&xh, t).unwrap(), &h.evaluate(&x, t).unwrap()));

        let d = hh.dehomogenize();
        prop_assert!(!d.is_homogenized());
        prop_assert!(all_close(&d.evaluate(&x, t).unwrap(), &h.evaluate(&x, t).unwrap()));
    }

    #[test]
    fn homogeneous_scaling((h, x, _t) in homotopy_and_point(), s in 0.5f64..2.) {
        // p(s * x) = s^d * p(x) for every polynomial of a homogenized homotopy
        let hh = h.homogenize();
        let mut xh = vec![Complex::new(1., 0.)];
        xh.extend_from_slice(&x);
        let scaled: Vec<_> = xh.iter().map(|v| *v * s).collect();

        for p in hh.start().iter().chain(hh.target()) {
            let a = p.evaluate(&xh) * s.powi(p.total_degree() as i32);
            prop_assert!(close(&a, &p.evaluate(&scaled)));
        }
    }
}
