pub mod angle;
pub mod geodesy;
pub mod math;
pub mod rect;
pub mod time;

pub use angle::*;
pub use rect::*;
pub use time::*;
