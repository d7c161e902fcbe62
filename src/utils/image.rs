use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::fs::File;

use crate::{
    error::Result,
    texture::TextureRef,
    utils::pixel::RGB,
};

/// Convert a finished canvas to an RGBA8 image. Channels are clamped and
/// rounded here; the raw buffer may still hold out-of-range diffusion
/// residue.
pub fn texture_to_image<T>(texture: &T) -> DynamicImage
where
    T: TextureRef<Inner = RGB>,
{
    let raw_data = texture
        .as_ref()
        .iter()
        .flat_map(|pixel| pixel.to_rgba8())
        .collect::<Vec<u8>>();

    DynamicImage::ImageRgba8(
        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(texture.width(), texture.height(), raw_data)
            .expect("Could construct an image"),
    )
}

pub fn write_texture<T>(texture: &T, path: &String, image_format: ImageFormat) -> Result<()>
where
    T: TextureRef<Inner = RGB>,
{
    let image = texture_to_image(texture);
    image.write_to(&mut File::create(path)?, image_format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use image::GenericImageView;

    #[test]
    fn test_texture_to_image_clamps_on_read() {
        let hot = RGB {
            r: 1.5,
            g: -0.25,
            b: 0.5,
            a: 1.0,
        };
        let texture = Texture::filled(2, 2, hot);
        let image = texture_to_image(&texture);

        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 128, 255]);
    }

    #[test]
    fn test_texture_to_image_keeps_layout() {
        let mut texture = Texture::<RGB>::new(2, 1);
        texture.as_mut()[0] = RGB::from_u8(255, 0, 0, 255);
        texture.as_mut()[1] = RGB::from_u8(0, 0, 255, 255);

        let image = texture_to_image(&texture);
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 255, 255]);
    }
}
