pub mod colors;
pub mod time;

pub use time::bangkok_now;
