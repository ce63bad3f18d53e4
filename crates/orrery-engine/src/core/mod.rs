pub mod driver;
pub mod rng;
pub mod scene;
pub mod time;
