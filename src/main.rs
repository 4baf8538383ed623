use clap::Parser;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};
use softraster::core::math::transform::TransformFactory;
use softraster::io::config::{Config, MeshConfig};
use softraster::io::image::save_framebuffer;
use softraster::io::obj_loader::load_obj;
use softraster::pipeline::renderer::Renderer;
use softraster::pipeline::shaders::phong::PhongShader;
use softraster::scene::camera::Camera;
use softraster::scene::material::Material;
use softraster::scene::mesh::Mesh;
use std::path::PathBuf;

/// Software triangle rasterizer: renders a textured, normal-mapped scene to a
/// PNG without touching the GPU.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Scene description (TOML). Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path, overriding the config's.
    #[arg(short, long)]
    output: Option<String>,

    /// Number of frames to render; spinning meshes advance between frames.
    #[arg(short, long, default_value_t = 1)]
    frames: u32,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            info!("No config given, using built-in scene");
            Config::default()
        }
    };

    let width = config.render.width;
    let height = config.render.height;
    let background = Vector3::from(config.render.background);

    let mut renderer = Renderer::new(width, height);
    renderer.rasterizer.render_mode = config.render.render_mode()?;

    let camera = Camera::new_perspective(
        Point3::from(config.camera.position),
        Point3::from(config.camera.target),
        Vector3::from(config.camera.up),
        config.camera.fov.to_radians(),
        width as f32 / height as f32,
        config.camera.near,
        config.camera.far,
    );

    let mut scene = load_scene(&config)?;
    for (_, _, shader) in &mut scene {
        shader.mode = config.render.shading_mode()?;
        shader.use_normal_map = config.render.use_normal_map;
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| config.render.output.clone());

    for frame in 0..cli.frames {
        renderer.clear(background);

        for (mesh, placement, shader) in &mut scene {
            mesh.world_matrix = placement.world_matrix(frame);
            renderer.draw_mesh(mesh, shader, &camera.view_projection(), &camera.position);
        }

        let path = frame_path(&output, frame, cli.frames);
        save_framebuffer(&renderer.framebuffer, &path)?;
    }

    Ok(())
}

/// Static placement plus the optional per-frame spin around Y.
struct Placement {
    position: Vector3<f32>,
    rotation_deg: Vector3<f32>,
    scale: f32,
    spin_speed_deg: f32,
}

impl Placement {
    fn from_config(mesh: &MeshConfig) -> Self {
        Self {
            position: Vector3::from(mesh.position),
            rotation_deg: Vector3::from(mesh.rotation),
            scale: mesh.scale,
            spin_speed_deg: if mesh.spin { mesh.spin_speed_deg } else { 0.0 },
        }
    }

    fn world_matrix(&self, frame: u32) -> nalgebra::Matrix4<f32> {
        let yaw = (self.rotation_deg.y + self.spin_speed_deg * frame as f32).to_radians();

        TransformFactory::translation(&self.position)
            * TransformFactory::rotation_y(yaw)
            * TransformFactory::rotation_x(self.rotation_deg.x.to_radians())
            * TransformFactory::rotation_z(self.rotation_deg.z.to_radians())
            * TransformFactory::scaling(self.scale)
    }
}

fn load_scene(config: &Config) -> Result<Vec<(Mesh, Placement, PhongShader)>, String> {
    if config.meshes.is_empty() {
        warn!("Config lists no meshes, rendering the built-in test triangle");
        let mesh = Mesh::create_test_triangle();
        let placement = Placement {
            position: Vector3::zeros(),
            rotation_deg: Vector3::zeros(),
            scale: 10.0,
            spin_speed_deg: 0.0,
        };
        let shader = PhongShader::new(Material::flat(Vector3::new(0.8, 0.8, 0.8)));
        return Ok(vec![(mesh, placement, shader)]);
    }

    let mut scene = Vec::with_capacity(config.meshes.len());
    for mesh_config in &config.meshes {
        let mesh = load_obj(&mesh_config.path)?;
        let material = load_material(mesh_config)?;
        scene.push((
            mesh,
            Placement::from_config(mesh_config),
            PhongShader::new(material),
        ));
    }
    Ok(scene)
}

fn load_material(mesh: &MeshConfig) -> Result<Material, String> {
    match (&mesh.diffuse_map, &mesh.normal_map, &mesh.gloss_map, &mesh.specular_map) {
        (Some(diffuse), Some(normal), Some(gloss), Some(specular)) => {
            Material::load(diffuse, normal, gloss, specular)
        }
        (None, None, None, None) => {
            let albedo = mesh.albedo.map(Vector3::from).unwrap_or_else(|| {
                warn!("Mesh '{}' has no textures or albedo, using gray", mesh.path);
                Vector3::new(0.8, 0.8, 0.8)
            });
            Ok(Material::flat(albedo))
        }
        _ => Err(format!(
            "Mesh '{}' must specify all four texture maps or none",
            mesh.path
        )),
    }
}

/// Numbered output paths for multi-frame runs; the single-frame case keeps the
/// configured name untouched.
fn frame_path(output: &str, frame: u32, total: u32) -> String {
    if total <= 1 {
        return output.to_string();
    }
    match output.rsplit_once('.') {
        Some((stem, ext)) => format!("{}_{:04}.{}", stem, frame, ext),
        None => format!("{}_{:04}", output, frame),
    }
}
