pub mod camera;
pub mod light;
pub mod material;
pub mod mesh;
pub mod texture;
