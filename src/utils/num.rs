/// Snap a unit-range channel value to the nearest of `steps + 1` evenly
/// spaced quantization levels.
///
/// > steps = 3 maps onto {0, 1/3, 2/3, 1}
///
/// Equivalent to `round(v / 255 * steps) * (255 / steps)` on byte channels.
pub fn quantize_channel<F>(value: F, steps: u32) -> F
where
    F: num_traits::Float,
{
    let steps = F::from(steps).unwrap();
    (value * steps).round() / steps
}
