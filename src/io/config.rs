use crate::core::rasterizer::RenderMode;
use crate::pipeline::shaders::phong::ShadingMode;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub meshes: Vec<MeshConfig>,
}

impl Default for Config {
    fn default() -> Self {
        // An empty mesh list makes the binary fall back to its built-in
        // test triangle, so running without a config always produces output.
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            meshes: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    /// "final_color" or "depth_buffer".
    #[serde(default = "default_render_mode")]
    pub render_mode: String,
    /// "observed_area", "diffuse", "specular" or "combined".
    #[serde(default = "default_shading_mode")]
    pub shading_mode: String,
    #[serde(default = "default_true")]
    pub use_normal_map: bool,
    #[serde(default = "default_background")]
    pub background: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            render_mode: default_render_mode(),
            shading_mode: default_shading_mode(),
            use_normal_map: true,
            background: default_background(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_render_mode() -> String {
    "final_color".to_string()
}
fn default_shading_mode() -> String {
    "combined".to_string()
}
fn default_background() -> [f32; 3] {
    [0.1, 0.1, 0.1]
}
fn default_true() -> bool {
    true
}

impl RenderConfig {
    pub fn render_mode(&self) -> Result<RenderMode, String> {
        match self.render_mode.as_str() {
            "final_color" => Ok(RenderMode::FinalColor),
            "depth_buffer" => Ok(RenderMode::DepthBuffer),
            other => Err(format!("Unknown render_mode '{}'", other)),
        }
    }

    pub fn shading_mode(&self) -> Result<ShadingMode, String> {
        match self.shading_mode.as_str() {
            "observed_area" => Ok(ShadingMode::ObservedArea),
            "diffuse" => Ok(ShadingMode::Diffuse),
            "specular" => Ok(ShadingMode::Specular),
            "combined" => Ok(ShadingMode::Combined),
            other => Err(format!("Unknown shading_mode '{}'", other)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, -50.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    1.0
}
fn default_far() -> f32 {
    1000.0
}

#[derive(Debug, Deserialize)]
pub struct MeshConfig {
    pub path: String,

    // Texture maps; a mesh with none falls back to a flat albedo material.
    pub diffuse_map: Option<String>,
    pub normal_map: Option<String>,
    pub gloss_map: Option<String>,
    pub specular_map: Option<String>,
    pub albedo: Option<[f32; 3]>,

    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees, applied Z then X then Y.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Spin the mesh around its Y axis across frames.
    #[serde(default)]
    pub spin: bool,
    /// Degrees per frame when spinning.
    #[serde(default = "default_spin_speed")]
    pub spin_speed_deg: f32,
}

fn default_scale() -> f32 {
    1.0
}
fn default_spin_speed() -> f32 {
    2.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
