pub mod item;
pub mod review;
pub mod shared;
