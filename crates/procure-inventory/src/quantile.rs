//! Normal-distribution inverse CDF (§4.C step 4: `z(service_level)`).
//!
//! Peter Acklam's rational approximation, accurate to about 1.15e-9 over
//! the open interval (0, 1) — more than enough precision for a safety-stock
//! multiplier. `gat-algo`'s OPF/state-estimation code leans on closed-form
//! approximations in the same spirit rather than pulling in a statistics
//! crate for a single function.

const LOW: f64 = 0.02425;
const HIGH: f64 = 1.0 - LOW;

const A: [f64; 6] = [
    -3.969_683_028_665_376e+01,
    2.209_460_984_245_205e+02,
    -2.759_285_104_469_687e+02,
    1.383_577_518_672_690e+02,
    -3.066_479_806_614_716e+01,
    2.506_628_277_459_239e+00,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e+01,
    1.615_858_368_580_409e+02,
    -1.556_989_798_598_866e+02,
    6.680_131_188_771_972e+01,
    -1.328_068_155_288_572e+01,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-03,
    -3.223_964_580_411_365e-01,
    -2.400_758_277_161_838e+00,
    -2.549_732_539_343_734e+00,
    4.374_664_141_464_968e+00,
    2.938_163_982_698_783e+00,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-03,
    3.224_671_290_700_398e-01,
    2.445_134_137_142_996e+00,
    3.754_408_661_907_416e+00,
];

/// `z` such that `Phi(z) = p`, for `p` strictly between 0 and 1. Clamps
/// out-of-range input to the open interval rather than returning `NaN`,
/// since a caller passing `service_level` from `CostParameter` (already
/// constrained to `(0, 1)`) should never see a failure here.
pub fn normal_inv_cdf(p: f64) -> f64 {
    let p = p.clamp(1e-10, 1.0 - 1e-10);

    if p < LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}
