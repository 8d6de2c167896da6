use crate::core::error::{ensure_finite, ReplayError, ReplayResult};

/// Sample-index parameters of `count` evenly spaced frames over `[0, n-1]`
///
/// Frame `j` sits at `j * (n-1) / (count-1)`, which is the same point as
/// `j / (count-1)` in the normalized `[0, 1]` domain. Both the path smoother
/// and the channel resampler evaluate here, so frame `j` of every channel
/// refers to the same sample-index parameter.
pub fn index_parameters(n: usize, count: usize) -> impl Iterator<Item = f64> {
    let span = n.saturating_sub(1) as f64;
    let steps = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |j| j as f64 * span / steps)
}

/// Linearly interpolate `values` at a fractional sample index
///
/// `u` is clamped to `[0, len-1]`. Integer positions return the stored
/// sample exactly, and the result never leaves the range of its two
/// neighbours.
pub fn interpolate_at(values: &[f64], u: f64) -> f64 {
    let last = values.len() - 1;
    if last == 0 {
        return values[0];
    }

    let u = u.clamp(0.0, last as f64);
    let idx = (u.floor() as usize).min(last - 1);
    let frac = u - idx as f64;

    let (a, b) = (values[idx], values[idx + 1]);
    let v = a * (1.0 - frac) + b * frac;
    v.clamp(a.min(b), a.max(b))
}

/// Resample a scalar channel to `target_len` samples
///
/// Input sample `k` sits at `k/(N-1)` and output sample `j` at
/// `j/(N'-1)` on the normalized domain; each output is the linear
/// interpolation of its two neighbouring inputs. Endpoints are preserved
/// exactly.
pub fn resample_channel(values: &[f64], target_len: usize) -> ReplayResult<Vec<f64>> {
    let n = values.len();
    if n < 2 {
        return Err(ReplayError::invalid_input(format!(
            "resampling needs at least 2 samples, got {}",
            n
        )));
    }
    if target_len < n {
        return Err(ReplayError::invalid_input(format!(
            "target length {} is shorter than the input ({})",
            target_len, n
        )));
    }
    ensure_finite("resampled", values)?;

    Ok(index_parameters(n, target_len)
        .map(|u| interpolate_at(values, u))
        .collect())
}
