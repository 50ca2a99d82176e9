#![no_main]

use libfuzzer_sys::fuzz_target;
use pp_prob::config::{ParamValue, TriangularConfig};
use pp_prob::{Distribution, tensor};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(cfg) = TriangularConfig::from_json_str(json) else {
        return;
    };
    // Keep broadcast products small; the fuzzer should stay fast.
    let len = |p: &ParamValue| match p {
        ParamValue::Scalar(_) => 1,
        ParamValue::Array(v) => v.len(),
    };
    if len(&cfg.low).max(len(&cfg.high)).max(len(&cfg.peak)) > 1024 {
        return;
    }

    let Ok(dist) = cfg.build::<f64>() else {
        return;
    };
    let probe = tensor::vector(vec![-1.0, 0.0, 0.5, 1.0, 2.0]);
    let _ = dist.log_prob(&probe);
    let _ = dist.cdf(&probe);
    let _ = dist.mean();
});
