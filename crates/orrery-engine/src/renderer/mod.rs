pub mod camera;
pub mod sdf_instance;
