use argh::FromArgs;
use rand::{rngs::StdRng, SeedableRng};

use imaug::image::{Image, ImageError, ImageSize};
use imaug::imgproc::augment::{
    Augmentation, Blur, RandomDeform, RandomHorizontalFlip, RandomNoise, RandomRotation,
    RandomSlide, RandomVerticalFlip,
};
use imaug::imgproc::interpolation::{BorderMode, InterpolationMode};
use imaug::imgproc::rect::Rect;
use imaug::imgproc::warp::{rotate, BoundsMode, RotateConfig, RotationAngles, DEFAULT_DEPTH};

#[derive(FromArgs)]
/// Rotate a synthetic checkerboard and run the random augmentations on it
struct Args {
    /// width of the test pattern
    #[argh(option, default = "320")]
    width: usize,

    /// height of the test pattern
    #[argh(option, default = "240")]
    height: usize,

    /// yaw angle in degrees
    #[argh(option, default = "0.0")]
    yaw: f64,

    /// pitch angle in degrees
    #[argh(option, default = "0.0")]
    pitch: f64,

    /// roll angle in degrees
    #[argh(option, default = "0.0")]
    roll: f64,

    /// distance between the camera and the image plane
    #[argh(option, default = "DEFAULT_DEPTH")]
    depth: f64,

    /// use the historical corner pairing for the output bounds
    #[argh(switch)]
    corner_pairs: bool,

    /// crop the rotated image back to the source size
    #[argh(switch)]
    crop: bool,

    /// seed of the random augmentations
    #[argh(option, default = "42")]
    seed: u64,
}

/// A three channel checkerboard with cells of `cell` pixels.
fn checkerboard(size: ImageSize, cell: usize) -> Result<Image<f32, 3>, ImageError> {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for y in 0..size.height {
        for x in 0..size.width {
            let v = if (x / cell + y / cell) % 2 == 0 { 255.0 } else { 32.0 };
            data.extend_from_slice(&[v, 255.0 - v, 128.0]);
        }
    }
    Image::new(size, data)
}

fn mean(image: &Image<f32, 3>) -> f32 {
    let n = image.as_slice().len().max(1) as f32;
    image.as_slice().iter().sum::<f32>() / n
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let image = checkerboard(size, 16)?;

    let config = RotateConfig {
        depth: args.depth,
        interpolation: InterpolationMode::Bilinear,
        border_mode: BorderMode::Constant,
        border_value: [0.0; 3],
        bounds: if args.corner_pairs {
            BoundsMode::CornerPairs
        } else {
            BoundsMode::Corners
        },
        roi: Some(Rect::from_size(size)),
        crop_to_roi: args.crop,
    };

    let angles = RotationAngles::new(args.yaw, args.pitch, args.roll);
    let rotated = rotate(&image, &angles, &config)?;
    log::info!("rotated {} by {angles:?} into {}", image.size(), rotated.size());

    let augmentations: [(&str, Box<dyn Augmentation<3>>); 7] = [
        ("hflip", Box::new(RandomHorizontalFlip::default())),
        ("vflip", Box::new(RandomVerticalFlip::default())),
        ("slide", Box::new(RandomSlide::default())),
        ("deform", Box::new(RandomDeform::default())),
        ("blur", Box::new(Blur::box_filter((3, 3))?)),
        (
            "noise",
            Box::new(RandomNoise::new([10.0, 12.0, 34.0], [8.0, 16.0, 24.0])),
        ),
        ("rotation", Box::new(RandomRotation::<3>::new(15.0, 15.0, 15.0))),
    ];

    let mut rng = StdRng::seed_from_u64(args.seed);
    for (name, augmentation) in &augmentations {
        let out = augmentation.apply(&image, &mut rng)?;
        log::info!("{name}: {} mean {:.2}", out.size(), mean(&out));
    }

    Ok(())
}
