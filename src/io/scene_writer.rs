// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::core::settings::RenderSettings;
use crate::fields::deform::Deformation;
use crate::fields::Primitive;
use crate::io::ExportError;
use crate::math::constants::{Float, Vector3f};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;

/// Serialize a scene and the settings it was rendered with into the same
/// XML format the scene loader reads.
pub fn scene_to_xml(scene: &Scene, settings: &RenderSettings) -> Result<String, ExportError> {
    let mut out = SceneXmlWriter { writer: Writer::new_with_indent(Vec::new(), b' ', 2) };
    out.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    out.event(Event::Start(BytesStart::new("scene")))?;

    out.event(Event::Start(BytesStart::new("render")))?;
    out.param("integer", "resolution", &settings.resolution.to_string())?;
    out.param("float", "fov", &settings.fov_deg.to_string())?;
    out.param("float", "orbit_radius", &settings.orbit_radius.to_string())?;
    out.param("integer", "frames", &settings.frame_count.to_string())?;
    out.param("float", "step_size", &settings.step_size.to_string())?;
    out.param("float", "flat_field", &settings.flat_field.to_string())?;
    out.param("float", "polar_angle", &settings.polar_deg.to_string())?;
    out.param("float", "interval_half_width", &settings.interval_half_width.to_string())?;
    out.param("string", "integrator", settings.integrator.name())?;
    out.param("string", "format", settings.image_format.extension())?;
    out.event(Event::End(BytesEnd::new("render")))?;

    out.field(scene.field(), 1.0)?;
    if let Some(deformation) = scene.deformation() {
        out.deformation(deformation)?;
    }

    out.event(Event::End(BytesEnd::new("scene")))?;
    String::from_utf8(out.writer.into_inner()).map_err(|e| ExportError::Xml(e.to_string()))
}

pub fn write_scene_xml(scene: &Scene, settings: &RenderSettings, file_path: &Path) -> Result<(), ExportError> {
    log::info!("Writing scene description to: {}.", file_path.display());
    fs::write(file_path, scene_to_xml(scene, settings)?)?;
    Ok(())
}

struct SceneXmlWriter {
    writer: Writer<Vec<u8>>,
}

impl SceneXmlWriter {
    fn event(&mut self, event: Event<'_>) -> Result<(), ExportError> {
        self.writer.write_event(event).map_err(|e| ExportError::Xml(e.to_string()))
    }

    fn param(&mut self, tag: &str, name: &str, value: &str) -> Result<(), ExportError> {
        let elem = BytesStart::new(tag).with_attributes(vec![("name", name), ("value", value)]);
        self.event(Event::Empty(elem))
    }

    fn point(&mut self, name: &str, p: &Vector3f) -> Result<(), ExportError> {
        self.param("point", name, &format!("{}, {}, {}", p.x, p.y, p.z))
    }

    fn field(&mut self, primitive: &Primitive, weight: Float) -> Result<(), ExportError> {
        let weight_str = weight.to_string();
        let mut attrs = vec![("type", primitive.type_name())];
        if weight != 1.0 {
            attrs.push(("weight", weight_str.as_str()));
        }
        self.event(Event::Start(BytesStart::new("field").with_attributes(attrs)))?;

        match primitive {
            Primitive::Constant(f) => self.param("float", "value", &f.value.to_string())?,
            Primitive::Cube(f) => {
                self.point("center", &f.center)?;
                self.param("float", "side", &f.side.to_string())?;
            }
            Primitive::Sphere(f) => {
                self.point("center", &f.center)?;
                self.param("float", "radius", &f.radius.to_string())?;
            }
            Primitive::Cylinder(f) => {
                self.point("p0", &f.p0)?;
                self.point("p1", &f.p1)?;
                self.param("float", "radius", &f.radius.to_string())?;
            }
            Primitive::Lattice(f) => {
                let [nx, ny, nz] = f.tiling();
                self.param("string", "cell", f.cell_name())?;
                self.param("float", "strut_radius", &f.cell_radius().to_string())?;
                self.param("integer", "nx", &nx.to_string())?;
                self.param("integer", "ny", &ny.to_string())?;
                self.param("integer", "nz", &nz.to_string())?;
            }
            Primitive::Collection(c) => {
                for (member, w) in c.members() {
                    self.field(member, *w)?;
                }
            }
        }

        self.event(Event::End(BytesEnd::new("field")))
    }

    fn deformation(&mut self, deformation: &Deformation) -> Result<(), ExportError> {
        let elem = BytesStart::new("deform").with_attributes(vec![("type", deformation.type_name())]);
        self.event(Event::Start(elem))?;
        match deformation {
            Deformation::Gaussian { amplitude, sigma } => {
                self.param("float", "amplitude", &amplitude.to_string())?;
                self.param("float", "sigma", &sigma.to_string())?;
            }
        }
        self.event(Event::End(BytesEnd::new("deform")))
    }
}
