//! Statistical checks of triangular sampling and density against
//! closed forms and an independent reference sampler.

use approx::assert_relative_eq;
use ndarray::ArrayD;
use pp_ad::Dual;
use pp_prob::config::TriangularConfig;
use pp_prob::{Distribution, Triangular, tensor};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Distribution as _;

const N: usize = 100_000;

fn sample_mean_var(xs: impl Iterator<Item = f64>) -> (f64, f64) {
    let xs: Vec<f64> = xs.collect();
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var)
}

#[test]
fn fraction_below_peak_matches_cdf() {
    for &(low, high, peak) in &[(0.0, 1.0, 0.5), (0.0, 4.0, 1.0), (-3.0, 2.0, 1.5)] {
        let d = Triangular::from_scalars(low, high, peak).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let x = d.rsample(&[N], &mut rng).unwrap();
        let frac = x.iter().filter(|&&v| v <= peak).count() as f64 / N as f64;
        let expected = (peak - low) / (high - low);
        assert!((frac - expected).abs() < 0.01, "frac={frac} expected={expected}");
    }
}

#[test]
fn density_integrates_to_one() {
    let (low, high, peak) = (-1.0, 3.0, 0.2);
    let d = Triangular::from_scalars(low, high, peak).unwrap();
    let n = 20_000;
    let dx = (high - low) / n as f64;
    let mids = tensor::vector((0..n).map(|i| low + (i as f64 + 0.5) * dx).collect());
    let total: f64 = d.prob(&mids).unwrap().iter().sum::<f64>() * dx;
    assert_relative_eq!(total, 1.0, epsilon = 1e-6);
}

#[test]
fn moments_match_reference_sampler() {
    let (low, high, peak) = (0.0, 4.0, 1.0);
    let d = Triangular::from_scalars(low, high, peak).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let ours = d.sample(&[N], &mut rng).unwrap();
    let (m, v) = sample_mean_var(ours.iter().copied());

    let reference = rand_distr::Triangular::new(low, high, peak).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let (m_ref, v_ref) = sample_mean_var((0..N).map(|_| reference.sample(&mut rng)));

    let mean = tensor::item(d.mean()).unwrap();
    let var = tensor::item(d.variance()).unwrap();
    assert_relative_eq!(mean, 5.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(var, 13.0 / 18.0, epsilon = 1e-12);

    assert!((m - mean).abs() < 0.01, "m={m}");
    assert!((m_ref - mean).abs() < 0.01, "m_ref={m_ref}");
    assert!((v - var).abs() < 0.02, "v={v}");
    assert!((v_ref - var).abs() < 0.02, "v_ref={v_ref}");
}

#[test]
fn pathwise_gradient_of_mean() {
    // d E[x] / d peak = 1/3 for every (low, high, peak).
    let d = Triangular::from_scalars(Dual::constant(0.0), Dual::constant(4.0), Dual::var(1.0))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let x = d.rsample(&[N], &mut rng).unwrap();
    let grad = x.iter().map(|v| v.dot).sum::<f64>() / N as f64;
    assert!((grad - 1.0 / 3.0).abs() < 0.01, "grad={grad}");
    assert_relative_eq!(tensor::item(d.mean()).unwrap().dot, 1.0 / 3.0, epsilon = 1e-15);
}

#[test]
fn batched_parameters_sample_independently() {
    let d = Triangular::new(
        tensor::vector(vec![0.0, 10.0]),
        tensor::vector(vec![1.0, 20.0]),
        tensor::vector(vec![0.9, 11.0]),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let x = d.rsample(&[N / 10], &mut rng).unwrap();
    assert_eq!(x.shape(), &[N / 10, 2]);
    let means: Vec<f64> = x.mean_axis(ndarray::Axis(0)).unwrap().iter().copied().collect();
    let expected: Vec<f64> = d.mean().iter().copied().collect();
    assert!((means[0] - expected[0]).abs() < 0.02);
    assert!((means[1] - expected[1]).abs() < 0.2);
}

#[test]
fn expanded_instance_replicates_results() {
    let d = Triangular::from_scalars(0.0, 2.0, 0.5).unwrap();
    let e = d.expand(&[4, 3]).unwrap();
    assert_eq!(e.batch_shape(), &[4, 3]);

    let value = tensor::scalar(1.25);
    let lp = tensor::item(&d.log_prob(&value).unwrap()).unwrap();
    let lp_e: ArrayD<f64> = e.log_prob(&value).unwrap();
    assert_eq!(lp_e.shape(), &[4, 3]);
    assert!(lp_e.iter().all(|&v| v == lp));
    assert!(e.entropy().iter().all(|&h| h == tensor::item(d.entropy()).unwrap()));
}

#[test]
fn expanded_instance_samples_like_original() {
    let (lows, highs, peaks) = ([0.0, -2.0, 5.0], [1.0, 2.0, 9.0], [0.5, -1.5, 8.0]);
    let d = Triangular::new(
        tensor::vector(lows.to_vec()),
        tensor::vector(highs.to_vec()),
        tensor::vector(peaks.to_vec()),
    )
    .unwrap();
    let e = d.expand(&[2, 3]).unwrap();

    let mut rng = StdRng::seed_from_u64(31);
    let x = e.rsample(&[N], &mut rng).unwrap();
    assert_eq!(x.shape(), &[N, 2, 3]);

    for k in 0..2 {
        for b in 0..3 {
            let column: Vec<f64> = (0..N).map(|n| x[[n, k, b]]).collect();
            assert!(column.iter().all(|&v| lows[b] <= v && v <= highs[b]), "column ({k}, {b})");
            let frac = column.iter().filter(|&&v| v <= peaks[b]).count() as f64 / N as f64;
            let expected = (peaks[b] - lows[b]) / (highs[b] - lows[b]);
            assert!((frac - expected).abs() < 0.01, "({k}, {b}): frac={frac} expected={expected}");
        }
    }
}

#[test]
fn config_file_builds_distribution() {
    let path = std::env::temp_dir().join(format!("pp-prob-triangular-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"low": [0.0, 1.0], "high": 3.0, "peak": 2.0, "validate_args": true}"#)
        .unwrap();
    let cfg = TriangularConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let d: Triangular<f64> = cfg.build().unwrap();
    assert_eq!(d.batch_shape(), &[2]);
    assert!(d.validate_args());
    let c = d.cdf(&tensor::scalar(2.0)).unwrap();
    assert_relative_eq!(c[[0]], 4.0 / 6.0, epsilon = 1e-12);
    assert_relative_eq!(c[[1]], 1.0 / 2.0, epsilon = 1e-12);
}
