pub mod io;
pub mod mask;
pub mod traits;
pub mod u8;

pub use self::mask::MaskU8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
