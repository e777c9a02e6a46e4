use super::border::{fetch_pixel, BorderMode};
use imaug_image::Image;

// cubic convolution coefficient
const A: f32 = -0.75;

#[inline]
fn cubic_weight(x: f32) -> f32 {
    let x = x.abs();
    if x <= 1.0 {
        ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((A * x - 5.0 * A) * x + 8.0 * A) * x - 4.0 * A
    } else {
        0.0
    }
}

/// Kernel for bicubic interpolation over the 4x4 neighbourhood of `(u, v)`.
pub(crate) fn bicubic_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    border: BorderMode,
    border_value: &[f32; C],
) -> [f32; C] {
    let u0 = u.floor();
    let v0 = v.floor();
    let (fu, fv) = (u - u0, v - v0);
    let (iu, iv) = (u0 as isize, v0 as isize);

    let wx = [
        cubic_weight(fu + 1.0),
        cubic_weight(fu),
        cubic_weight(1.0 - fu),
        cubic_weight(2.0 - fu),
    ];
    let wy = [
        cubic_weight(fv + 1.0),
        cubic_weight(fv),
        cubic_weight(1.0 - fv),
        cubic_weight(2.0 - fv),
    ];

    let mut pixel = [0.0; C];
    for (j, wyj) in wy.iter().enumerate() {
        for (i, wxi) in wx.iter().enumerate() {
            let w = wxi * wyj;
            if w == 0.0 {
                continue;
            }
            let tap = fetch_pixel(
                image,
                iu + i as isize - 1,
                iv + j as isize - 1,
                border,
                border_value,
            );
            for k in 0..C {
                pixel[k] += tap[k] * w;
            }
        }
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::cubic_weight;

    #[test]
    fn cubic_weight_partition_of_unity() {
        for f in [0.0f32, 0.25, 0.5, 0.9] {
            let sum = cubic_weight(f + 1.0)
                + cubic_weight(f)
                + cubic_weight(1.0 - f)
                + cubic_weight(2.0 - f);
            assert!((sum - 1.0).abs() < 1e-6, "f = {f}: {sum}");
        }
        assert_eq!(cubic_weight(0.0), 1.0);
        assert_eq!(cubic_weight(1.0), 0.0);
        assert_eq!(cubic_weight(2.0), 0.0);
    }
}
