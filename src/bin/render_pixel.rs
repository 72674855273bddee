use translucence::core::integrator::Integrator;
use translucence::core::scene::Scene;
use translucence::core::scene_loader::load_scene_with_settings;
use translucence::core::sensor::Sensor;
use translucence::core::settings::RenderSettings;
use translucence::integrators::hierarchical::HierarchicalIntegrator;
use translucence::integrators::uniform::UniformIntegrator;
use translucence::math::ray::Ray3f;
use translucence::renderers::orbit::frame_camera;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        eprintln!("Usage: {} <scene.xml|--default> <frame> <i> <j> [--frames N] [--res N]", args[0]);
        std::process::exit(1);
    }

    let scene_arg = &args[1];
    let (frame, x, y) = match (parse_index(&args[2], "frame"),
                               parse_index(&args[3], "pixel column"),
                               parse_index(&args[4], "pixel row")) {
        (Ok(frame), Ok(x), Ok(y)) => (frame, x, y),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let (scene, mut settings) = if scene_arg == "--default" {
        (Scene::default(), RenderSettings::default())
    } else {
        match load_scene_with_settings(scene_arg) {
            Ok(load_result) => (load_result.scene, load_result.settings),
            Err(e) => {
                eprintln!("Failed to load scene {}: {}", scene_arg, e);
                std::process::exit(1);
            }
        }
    };

    let mut i = 5;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                settings.frame_count = option_value(&args, i, "--frames");
            }
            "--res" => {
                i += 1;
                settings.resolution = option_value(&args, i, "--res");
            }
            _ => {}
        }
        i += 1;
    }

    if let Err(e) = settings.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    if frame >= settings.frame_count {
        eprintln!("Frame {} out of range for {} frames", frame, settings.frame_count);
        std::process::exit(2);
    }
    if x >= settings.resolution || y >= settings.resolution {
        eprintln!("Pixel out of bounds: ({}, {}) for size {}x{}", x, y, settings.resolution, settings.resolution);
        std::process::exit(2);
    }

    let camera = frame_camera(&settings, frame);
    let dirs = camera.ray_directions();
    let ray = Ray3f::new(camera.position(), dirs[x + settings.resolution * y]);
    let interval = settings.interval();

    let uniform = UniformIntegrator::new(settings.flat_field);
    let hierarchical = HierarchicalIntegrator::new();
    let t_uniform = uniform.integrate(&scene, &ray, &interval);
    let t_hierarchical = hierarchical.integrate(&scene, &ray, &interval);

    println!("{}", camera.describe());
    println!("frame {} theta {:.3} deg, pixel ({}, {})", frame, settings.frame_angle(frame), x, y);
    println!("ray origin [{:.6}, {:.6}, {:.6}] dir [{:.6}, {:.6}, {:.6}]",
             ray.origin().x, ray.origin().y, ray.origin().z,
             ray.dir().x, ray.dir().y, ray.dir().z);
    println!("interval [{}, {}] step {}", interval.s_min, interval.s_max, interval.step);
    println!("{:<14}{:.9}", uniform.name(), t_uniform);
    println!("{:<14}{:.9}", hierarchical.name(), t_hierarchical);
    println!("{:<14}{:.3e}", "difference", (t_uniform - t_hierarchical).abs());
}

fn parse_index(arg: &str, what: &str) -> Result<usize, String> {
    arg.parse::<usize>()
        .map_err(|_| format!("Invalid {} '{}': expected a non-negative integer", what, arg))
}

fn option_value(args: &[String], i: usize, flag: &str) -> usize {
    let parsed = match args.get(i) {
        Some(v) => parse_index(v, flag),
        None => Err(format!("{} expects a value", flag)),
    };
    parsed.unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_index_rejects_malformed_arguments() {
        assert_eq!(parse_index("17", "frame"), Ok(17));
        assert!(parse_index("-1", "frame").is_err());
        assert!(parse_index("3.5", "pixel column").is_err());
        assert!(parse_index("", "pixel row").is_err());
        assert!(parse_index("x", "frame").unwrap_err().contains("frame"));
    }
}
