use crate::texture::TextureMut;
use crate::utils::pixel::RGB;

/// One full pass over the shared working surface.
///
/// The pipeline owns the canvas exclusively and hands it to each pass in
/// turn; parameters are validated at pass construction, so applying cannot
/// fail.
pub trait Pass {
    fn apply<C: TextureMut<Inner = RGB>>(&mut self, canvas: &mut C);
}
