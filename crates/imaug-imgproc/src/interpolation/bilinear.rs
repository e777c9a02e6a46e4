use super::border::{fetch_pixel, BorderMode};
use imaug_image::Image;

/// Kernel for bilinear interpolation
///
/// Blends the 2x2 neighbourhood anchored at `(floor(u), floor(v))`. Taps with a zero weight are
/// not read, so integer coordinates reproduce the source exactly.
pub(crate) fn bilinear_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    border: BorderMode,
    border_value: &[f32; C],
) -> [f32; C] {
    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let (iu, iv) = (u0 as isize, v0 as isize);

    let taps = [
        (iu, iv, frac_uu * frac_vv),
        (iu + 1, iv, frac_u * frac_vv),
        (iu, iv + 1, frac_uu * frac_v),
        (iu + 1, iv + 1, frac_u * frac_v),
    ];

    let mut pixel = [0.0; C];
    for (x, y, w) in taps {
        if w == 0.0 {
            continue;
        }
        let tap = fetch_pixel(image, x, y, border, border_value);
        for k in 0..C {
            pixel[k] += tap[k] * w;
        }
    }

    pixel
}
