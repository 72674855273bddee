// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::scene::Scene;
use crate::core::settings::{parse_float, parse_usize, RenderSettings};
use crate::fields::cube::Cube;
use crate::fields::cylinder::Cylinder;
use crate::fields::deform::Deformation;
use crate::fields::lattice::{Lattice, UnitCell};
use crate::fields::sphere::Sphere;
use crate::fields::{Collection, ConstantField, Primitive};
use crate::math::constants::{Float, Vector3f};

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    InvalidSetting(String),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "io error: {}", e),
            SceneLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SceneLoadError::MissingField(name) => write!(f, "missing field: {}", name),
            SceneLoadError::InvalidSetting(msg) => write!(f, "invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for SceneLoadError {}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let result = load_scene_with_settings(path)?;
    Ok(result.scene)
}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub settings: RenderSettings,
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let path = path.as_ref();
    log::info!("Loading scene from: {}.", path.display());
    let xml = fs::read_to_string(path)?;
    parse_scene(&xml)
}

/// Parse a scene document:
///
/// ```xml
/// <scene>
///   <default name="r" value="0.25"/>
///   <render>
///     <integer name="resolution" value="512"/>
///     <string name="integrator" value="hierarchical"/>
///   </render>
///   <field type="collection">
///     <field type="cube" weight="1"><float name="side" value="1"/></field>
///     <field type="sphere" weight="-1"><float name="radius" value="$r"/></field>
///   </field>
///   <deform type="gaussian">
///     <float name="amplitude" value="0.05"/>
///     <float name="sigma" value="0.2"/>
///   </deform>
/// </scene>
/// ```
pub fn parse_scene(xml: &str) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut state = ParseState::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => state.open(&e, false)?,
            Ok(Event::Empty(e)) => state.open(&e, true)?,
            Ok(Event::End(e)) => state.close(e.name().as_ref())?,
            Ok(_) => {}
            Err(e) => {
                return Err(SceneLoadError::Parse(format!(
                    "xml error at position {}: {}", reader.buffer_position(), e)));
            }
        }
        buf.clear();
    }

    state.finish()
}

struct FieldBuilder {
    kind: String,
    weight: Float,
    params: HashMap<String, String>,
    children: Vec<(Primitive, Float)>,
}

#[derive(Default)]
struct ParseState {
    defaults: HashMap<String, String>,
    settings: RenderSettings,
    in_render: bool,
    fields: Vec<FieldBuilder>,
    root: Option<Primitive>,
    deform: Option<(String, HashMap<String, String>)>,
    in_deform: bool,
    deformation: Option<Deformation>,
}

impl ParseState {
    fn open(&mut self, e: &BytesStart, empty: bool) -> Result<(), SceneLoadError> {
        let attrs = read_attributes(e, &self.defaults);
        match e.name().as_ref() {
            b"scene" => {}
            b"default" => {
                if let (Some(k), Some(v)) = (attrs.get("name"), attrs.get("value")) {
                    self.defaults.insert(k.clone(), v.clone());
                }
            }
            b"render" => self.in_render = !empty,
            b"field" => {
                let kind = attrs.get("type").cloned().ok_or(SceneLoadError::MissingField("field type"))?;
                let weight = match attrs.get("weight") {
                    Some(w) => parse_float(w)?,
                    None => 1.0,
                };
                self.fields.push(FieldBuilder { kind, weight, params: HashMap::new(), children: Vec::new() });
                if empty {
                    self.close_field()?;
                }
            }
            b"deform" => {
                let kind = attrs.get("type").cloned().ok_or(SceneLoadError::MissingField("deform type"))?;
                self.deform = Some((kind, HashMap::new()));
                self.in_deform = true;
                if empty {
                    self.close_deform()?;
                }
            }
            b"float" | b"integer" | b"string" | b"point" => {
                let name = attrs.get("name").cloned().ok_or(SceneLoadError::MissingField("parameter name"))?;
                let value = attrs.get("value").cloned().ok_or(SceneLoadError::MissingField("parameter value"))?;
                if let Some(field) = self.fields.last_mut() {
                    field.params.insert(name, value);
                } else if self.in_deform {
                    if let Some((_, params)) = self.deform.as_mut() {
                        params.insert(name, value);
                    }
                } else if self.in_render {
                    self.settings.apply(&name, &value)?;
                } else {
                    log::warn!("Ignoring parameter '{}' outside of render, field or deform.", name);
                }
            }
            other => {
                log::warn!("Ignoring unknown element <{}>.", String::from_utf8_lossy(other));
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> Result<(), SceneLoadError> {
        match name {
            b"render" => self.in_render = false,
            b"field" => self.close_field()?,
            b"deform" => self.close_deform()?,
            _ => {}
        }
        Ok(())
    }

    fn close_field(&mut self) -> Result<(), SceneLoadError> {
        let builder = self.fields.pop()
            .ok_or_else(|| SceneLoadError::Parse("unbalanced </field>".to_string()))?;
        let weight = builder.weight;
        let primitive = build_primitive(builder)?;

        if let Some(parent) = self.fields.last_mut() {
            if parent.kind != "collection" {
                return Err(SceneLoadError::Parse(format!("a {} field cannot contain other fields", parent.kind)));
            }
            parent.children.push((primitive, weight));
        } else if self.root.is_some() {
            return Err(SceneLoadError::Parse("scene has more than one root field".to_string()));
        } else if weight != 1.0 {
            self.root = Some(Primitive::Collection(Collection::new().with_member(primitive, weight)));
        } else {
            self.root = Some(primitive);
        }
        Ok(())
    }

    fn close_deform(&mut self) -> Result<(), SceneLoadError> {
        self.in_deform = false;
        let (kind, params) = match self.deform.take() {
            Some(d) => d,
            None => return Ok(()),
        };
        self.deformation = Some(match kind.as_str() {
            "gaussian" => Deformation::Gaussian {
                amplitude: require_float(&params, "amplitude")?,
                sigma: require_float(&params, "sigma")?,
            },
            other => return Err(SceneLoadError::Parse(format!("unsupported deformation: {}", other))),
        });
        Ok(())
    }

    fn finish(self) -> Result<SceneLoadResult, SceneLoadError> {
        if !self.fields.is_empty() {
            return Err(SceneLoadError::Parse("unclosed <field>".to_string()));
        }
        let root = self.root.ok_or(SceneLoadError::MissingField("field"))?;
        let scene = Scene::new(root).with_deformation(self.deformation);
        Ok(SceneLoadResult { scene, settings: self.settings })
    }
}

fn build_primitive(builder: FieldBuilder) -> Result<Primitive, SceneLoadError> {
    let params = &builder.params;
    let primitive = match builder.kind.as_str() {
        "constant" => Primitive::Constant(ConstantField::new(require_float(params, "value")?)),
        "cube" => Primitive::Cube(Cube::new(
            optional_vec3(params, "center")?.unwrap_or_else(Vector3f::zeros),
            require_float(params, "side")?,
        )),
        "sphere" => Primitive::Sphere(Sphere::new(
            optional_vec3(params, "center")?.unwrap_or_else(Vector3f::zeros),
            require_float(params, "radius")?,
        )),
        "cylinder" => Primitive::Cylinder(Cylinder::new(
            optional_vec3(params, "p0")?.ok_or(SceneLoadError::MissingField("p0"))?,
            optional_vec3(params, "p1")?.ok_or(SceneLoadError::MissingField("p1"))?,
            require_float(params, "radius")?,
        )),
        "lattice" => {
            let cell_name = params.get("cell").map(|s| s.as_str()).unwrap_or("kelvin");
            let radius = require_float(params, "strut_radius")?;
            let cell = UnitCell::by_name(cell_name, radius)
                .ok_or_else(|| SceneLoadError::Parse(format!("unsupported unit cell: {}", cell_name)))?;
            let mut tiling = [1usize; 3];
            for (idx, key) in ["nx", "ny", "nz"].iter().enumerate() {
                if let Some(v) = params.get(*key) {
                    tiling[idx] = parse_usize(v)?;
                }
                if tiling[idx] == 0 {
                    return Err(SceneLoadError::InvalidSetting(format!("lattice {} must be positive", key)));
                }
            }
            Primitive::Lattice(Lattice::tessellate(&cell, tiling[0], tiling[1], tiling[2]))
        }
        "collection" => {
            let mut collection = Collection::new();
            for (child, weight) in builder.children {
                collection.push(child, weight);
            }
            Primitive::Collection(collection)
        }
        other => return Err(SceneLoadError::Parse(format!("unsupported field type: {}", other))),
    };
    Ok(primitive)
}

fn read_attributes(e: &BytesStart, defaults: &HashMap<String, String>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value().unwrap_or_default();
        out.insert(key, resolve_value(&value, defaults));
    }
    out
}

fn resolve_value(value: &str, defaults: &HashMap<String, String>) -> String {
    if let Some(key) = value.strip_prefix('$') {
        if let Some(v) = defaults.get(key) {
            return v.clone();
        }
    }
    value.to_string()
}

fn require_float(params: &HashMap<String, String>, name: &'static str) -> Result<Float, SceneLoadError> {
    let value = params.get(name).ok_or(SceneLoadError::MissingField(name))?;
    parse_float(value)
}

fn optional_vec3(params: &HashMap<String, String>, name: &str) -> Result<Option<Vector3f>, SceneLoadError> {
    match params.get(name) {
        Some(v) => Ok(Some(parse_vec3(v)?)),
        None => Ok(None),
    }
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let parts: Vec<&str> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(SceneLoadError::Parse(format!("invalid vector: {}", value)));
    }
    Ok(Vector3f::new(parse_float(parts[0])?, parse_float(parts[1])?, parse_float(parts[2])?))
}
