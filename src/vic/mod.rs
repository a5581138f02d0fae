pub mod charset;
pub mod registers;

pub use charset::CHARACTER_ROM;
pub use registers::{GraphicsMode, GraphicsState, SpriteDescriptor, decode};
