use crate::error::InferenceError;
use image::{RgbImage, imageops, imageops::FilterType};
use ndarray::Array4;

/// Model input edge length in pixels.
pub const INPUT_SIZE: u32 = 224;

/// Decode raw image bytes into the `[1, 224, 224, 3]` NHWC tensor the model expects,
/// with every channel scaled into `[0, 1]`.
pub fn preprocess(image_bytes: &[u8]) -> Result<Array4<f32>, InferenceError> {
    let rgb = image::load_from_memory(image_bytes)?.to_rgb8();
    Ok(to_input_tensor(&rgb))
}

pub fn to_input_tensor(rgb: &RgbImage) -> Array4<f32> {
    let resized = if rgb.dimensions() == (INPUT_SIZE, INPUT_SIZE) {
        rgb.clone()
    } else {
        imageops::resize(rgb, INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom)
    };

    let side = INPUT_SIZE as usize;
    Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| {
        resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    })
}
