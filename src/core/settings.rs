// Copyright @yucwang 2026

use crate::core::integrator::IntegrationInterval;
use crate::core::scene_loader::SceneLoadError;
use crate::integrators::IntegratorKind;
use crate::math::constants::{deg_to_rad, Float, EPSILON};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// 16-bit grayscale-as-RGBA.
    Png,
    /// Float RGB transmittance.
    Exr,
}

impl ImageFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "png" => Some(ImageFormat::Png),
            "exr" => Some(ImageFormat::Exr),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Exr => "exr",
        }
    }
}

/// Everything that controls a dataset run apart from the scene itself.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub resolution: usize,
    pub fov_deg: Float,
    pub orbit_radius: Float,
    pub frame_count: usize,
    pub step_size: Float,
    pub flat_field: Float,
    pub polar_deg: Float,
    pub interval_half_width: Float,
    pub integrator: IntegratorKind,
    pub image_format: ImageFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution: 1024,
            fov_deg: 45.0,
            orbit_radius: 6.0,
            frame_count: 4,
            step_size: 0.01,
            flat_field: 0.0,
            polar_deg: 90.0,
            interval_half_width: 1.0,
            integrator: IntegratorKind::Hierarchical,
            image_format: ImageFormat::Png,
        }
    }
}

impl RenderSettings {
    /// Set one parameter from its textual form, as found in scene files and
    /// on the command line.
    pub fn apply(&mut self, name: &str, value: &str) -> Result<(), SceneLoadError> {
        match name {
            "resolution" => self.resolution = parse_usize(value)?,
            "fov" => self.fov_deg = parse_float(value)?,
            "orbit_radius" => self.orbit_radius = parse_float(value)?,
            "frames" => self.frame_count = parse_usize(value)?,
            "step_size" => self.step_size = parse_float(value)?,
            "flat_field" => self.flat_field = parse_float(value)?,
            "polar_angle" => self.polar_deg = parse_float(value)?,
            "interval_half_width" => self.interval_half_width = parse_float(value)?,
            "integrator" => {
                self.integrator = IntegratorKind::parse(value)
                    .ok_or_else(|| SceneLoadError::InvalidSetting(format!("unsupported integrator: {}", value)))?;
            }
            "format" => {
                self.image_format = ImageFormat::parse(value)
                    .ok_or_else(|| SceneLoadError::InvalidSetting(format!("unsupported image format: {}", value)))?;
            }
            other => {
                return Err(SceneLoadError::InvalidSetting(format!("unknown render setting: {}", other)));
            }
        }
        Ok(())
    }

    /// Reject configurations that cannot produce a dataset. Called before any
    /// rendering starts.
    pub fn validate(&self) -> Result<(), SceneLoadError> {
        if self.resolution == 0 {
            return Err(invalid("resolution must be positive"));
        }
        if self.frame_count == 0 {
            return Err(invalid("frame count must be positive"));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(invalid("fov must lie in (0, 180) degrees"));
        }
        if !(self.orbit_radius > 0.0) || !self.orbit_radius.is_finite() {
            return Err(invalid("orbit radius must be positive"));
        }
        if !(self.step_size > 0.0) || !self.step_size.is_finite() {
            return Err(invalid("step size must be positive"));
        }
        if !(self.interval_half_width > 0.0) || !self.interval_half_width.is_finite() {
            return Err(invalid("integration half width must be positive"));
        }
        if !(self.flat_field >= 0.0) || !self.flat_field.is_finite() {
            return Err(invalid("flat field must be non-negative"));
        }
        // On the z axis the view direction is parallel to the up vector.
        if !(deg_to_rad(self.polar_deg).sin().abs() > EPSILON) {
            return Err(invalid("polar angle must keep the camera off the z axis"));
        }
        Ok(())
    }

    /// `[R - w, R + w]` around the orbit radius.
    pub fn interval(&self) -> IntegrationInterval {
        IntegrationInterval::centered(self.orbit_radius, self.interval_half_width, self.step_size)
    }

    /// Orbit angle in degrees of frame `index`, evenly spaced over a full turn.
    pub fn frame_angle(&self, index: usize) -> Float {
        index as Float * 360.0 / self.frame_count.max(1) as Float
    }
}

fn invalid(msg: &str) -> SceneLoadError {
    SceneLoadError::InvalidSetting(msg.to_string())
}

pub(crate) fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>()
        .map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

pub(crate) fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>()
        .map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}
