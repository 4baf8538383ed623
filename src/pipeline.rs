pub mod renderer;
pub mod shaders;
