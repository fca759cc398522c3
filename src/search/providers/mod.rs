pub mod freepik;
pub mod pexels;
pub mod pixabay;
pub mod unsplash;

pub use freepik::FreepikProvider;
pub use pexels::PexelsProvider;
pub use pixabay::PixabayProvider;
pub use unsplash::UnsplashProvider;
