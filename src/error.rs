/// All errors that `quadbatch` can return.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An error opening an image.
    #[error("error reading image: {0}")]
    Image(#[from] image::ImageError),
}
