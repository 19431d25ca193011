//! Named numeric fields exposed for live tweaking.
//!
//! The surface stores whatever it is given; keeping values inside
//! [`ParamSpec::range`] is left to whoever presents the field (a slider, or the
//! CLI's `--clamp`).

use shoreline_scene::{NodeId, Scene};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("unknown parameter `{0}`")]
    Unknown(String),
    #[error("expected `name=value`, got `{0}`")]
    Syntax(String),
    #[error("invalid value `{value}` for `{name}`")]
    Value { name: &'static str, value: String },
    #[error("scene has no node backing `{0}`")]
    MissingNode(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugParam {
    AmbientIntensity,
    HemisphereIntensity,
    SunIntensity,
    SunX,
    SunY,
    SunZ,
}

/// Presentation hints for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Stable dotted name used on the command line.
    pub name: &'static str,
    pub label: &'static str,
    /// Panel section the widget is grouped under, if any.
    pub folder: Option<&'static str>,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamSpec {
    pub fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const SUN_FOLDER: &str = "Sun Position";

impl DebugParam {
    pub const ALL: [DebugParam; 6] = [
        DebugParam::AmbientIntensity,
        DebugParam::SunX,
        DebugParam::SunY,
        DebugParam::SunZ,
        DebugParam::SunIntensity,
        DebugParam::HemisphereIntensity,
    ];

    pub fn spec(self) -> ParamSpec {
        let (name, label, folder, min, max, step) = match self {
            DebugParam::AmbientIntensity => {
                ("ambient.intensity", "Ambient Intensity", None, 0.0, 1.0, 0.001)
            }
            DebugParam::HemisphereIntensity => (
                "hemisphere.intensity",
                "Hemisphere Intensity",
                None,
                0.0,
                1.0,
                0.001,
            ),
            DebugParam::SunIntensity => (
                "sun.intensity",
                "Sun Intensity",
                Some(SUN_FOLDER),
                0.0,
                2.0,
                0.01,
            ),
            DebugParam::SunX => ("sun.x", "x", Some(SUN_FOLDER), -15.0, 15.0, 0.1),
            DebugParam::SunY => ("sun.y", "y", Some(SUN_FOLDER), 0.0, 10.0, 0.1),
            DebugParam::SunZ => ("sun.z", "z", Some(SUN_FOLDER), -15.0, 15.0, 0.1),
        };
        ParamSpec {
            name,
            label,
            folder,
            min,
            max,
            step,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for DebugParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DebugParam {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DebugParam::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParamError::Unknown(wanted.to_string()))
    }
}

/// Parse `name=value`.
pub fn parse(assignment: &str) -> Result<(DebugParam, f32), ParamError> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| ParamError::Syntax(assignment.to_string()))?;
    let param: DebugParam = name.parse()?;
    let value = value.trim();
    let parsed: f32 = value.parse().map_err(|_| ParamError::Value {
        name: param.name(),
        value: value.to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(ParamError::Value {
            name: param.name(),
            value: value.to_string(),
        });
    }
    Ok((param, parsed))
}

/// Direct get/set access to the tweakable fields of a live scene.
pub struct DebugSurface<'a> {
    scene: &'a mut Scene,
}

impl<'a> DebugSurface<'a> {
    pub fn new(scene: &'a mut Scene) -> Self {
        Self { scene }
    }

    fn node(&self, param: DebugParam) -> NodeId {
        let handles = &self.scene.handles;
        match param {
            DebugParam::AmbientIntensity => handles.ambient,
            DebugParam::HemisphereIntensity => handles.hemisphere,
            DebugParam::SunIntensity | DebugParam::SunX | DebugParam::SunY | DebugParam::SunZ => {
                handles.sun
            }
        }
    }

    /// The field itself, for widgets that bind by reference.
    pub fn field_mut(&mut self, param: DebugParam) -> Result<&mut f32, ParamError> {
        let id = self.node(param);
        let graph = &mut self.scene.graph;
        let field = match param {
            DebugParam::AmbientIntensity
            | DebugParam::HemisphereIntensity
            | DebugParam::SunIntensity => graph.intensity_mut(id),
            DebugParam::SunX => graph.transform_mut(id).map(|t| &mut t.position.x),
            DebugParam::SunY => graph.transform_mut(id).map(|t| &mut t.position.y),
            DebugParam::SunZ => graph.transform_mut(id).map(|t| &mut t.position.z),
        };
        field.ok_or(ParamError::MissingNode(param.name()))
    }

    pub fn get(&self, param: DebugParam) -> Result<f32, ParamError> {
        let id = self.node(param);
        let node = self
            .scene
            .graph
            .get(id)
            .ok_or(ParamError::MissingNode(param.name()))?;
        let value = match param {
            DebugParam::AmbientIntensity
            | DebugParam::HemisphereIntensity
            | DebugParam::SunIntensity => node
                .light()
                .map(|l| l.intensity)
                .ok_or(ParamError::MissingNode(param.name()))?,
            DebugParam::SunX => node.transform().position.x,
            DebugParam::SunY => node.transform().position.y,
            DebugParam::SunZ => node.transform().position.z,
        };
        Ok(value)
    }

    /// Store `value` as given.
    pub fn set(&mut self, param: DebugParam, value: f32) -> Result<(), ParamError> {
        *self.field_mut(param)? = value;
        tracing::debug!(param = param.name(), value, "debug parameter set");
        Ok(())
    }

    /// Apply a `name=value` assignment and return what was set.
    pub fn apply(&mut self, assignment: &str) -> Result<(DebugParam, f32), ParamError> {
        let (param, value) = parse(assignment)?;
        self.set(param, value)?;
        Ok((param, value))
    }

    /// Every parameter with its current value, in panel order.
    pub fn snapshot(&self) -> Vec<(DebugParam, f32)> {
        DebugParam::ALL
            .into_iter()
            .filter_map(|p| self.get(p).ok().map(|v| (p, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoreline_compose::{SUN_POSITION, assemble_seeded};

    #[test]
    fn defaults_reflect_assembled_scene() {
        let mut scene = assemble_seeded(1);
        let surface = DebugSurface::new(&mut scene);
        assert_eq!(surface.get(DebugParam::AmbientIntensity), Ok(0.4));
        assert_eq!(surface.get(DebugParam::SunIntensity), Ok(1.2));
        assert_eq!(surface.get(DebugParam::HemisphereIntensity), Ok(0.6));
        assert_eq!(surface.get(DebugParam::SunX), Ok(SUN_POSITION.x));
        assert_eq!(surface.get(DebugParam::SunY), Ok(SUN_POSITION.y));
        assert_eq!(surface.get(DebugParam::SunZ), Ok(SUN_POSITION.z));
    }

    #[test]
    fn set_writes_through_to_scene() {
        let mut scene = assemble_seeded(1);
        let mut surface = DebugSurface::new(&mut scene);
        surface.set(DebugParam::SunY, 7.5).unwrap();
        surface.set(DebugParam::AmbientIntensity, 0.9).unwrap();

        let sun = scene.graph.get(scene.handles.sun).unwrap();
        assert_eq!(sun.transform().position.y, 7.5);
        let ambient = scene.graph.get(scene.handles.ambient).unwrap();
        assert_eq!(ambient.light().unwrap().intensity, 0.9);
    }

    #[test]
    fn out_of_range_values_are_stored_unchanged() {
        let mut scene = assemble_seeded(1);
        let mut surface = DebugSurface::new(&mut scene);
        surface.set(DebugParam::SunIntensity, 5.0).unwrap();
        assert_eq!(surface.get(DebugParam::SunIntensity), Ok(5.0));
        assert_eq!(DebugParam::SunIntensity.spec().clamp(5.0), 2.0);
    }

    #[test]
    fn field_mut_binds_by_reference() {
        let mut scene = assemble_seeded(1);
        let mut surface = DebugSurface::new(&mut scene);
        *surface.field_mut(DebugParam::SunZ).unwrap() += 1.0;
        assert_eq!(surface.get(DebugParam::SunZ), Ok(SUN_POSITION.z + 1.0));
    }

    #[test]
    fn apply_parses_assignments() {
        let mut scene = assemble_seeded(1);
        let mut surface = DebugSurface::new(&mut scene);
        assert_eq!(surface.apply("sun.x=3.5"), Ok((DebugParam::SunX, 3.5)));
        assert_eq!(surface.get(DebugParam::SunX), Ok(3.5));
        assert_eq!(
            surface.apply(" Hemisphere.Intensity = 0.25"),
            Ok((DebugParam::HemisphereIntensity, 0.25))
        );

        assert_eq!(
            surface.apply("moon.x=1"),
            Err(ParamError::Unknown("moon.x".into()))
        );
        assert_eq!(surface.apply("sun.x"), Err(ParamError::Syntax("sun.x".into())));
        assert!(matches!(
            surface.apply("sun.x=abc"),
            Err(ParamError::Value { name: "sun.x", .. })
        ));
        assert!(surface.apply("sun.x=inf").is_err());
    }

    #[test]
    fn specs_are_well_formed() {
        for param in DebugParam::ALL {
            let spec = param.spec();
            assert!(spec.min < spec.max, "{param}");
            assert!(spec.step > 0.0 && spec.step < spec.max - spec.min);
            assert_eq!(param.name().parse::<DebugParam>(), Ok(param));
        }
        let folder: Vec<_> = DebugParam::ALL
            .into_iter()
            .filter(|p| p.spec().folder == Some(SUN_FOLDER))
            .collect();
        assert_eq!(folder.len(), 4);
    }

    #[test]
    fn snapshot_covers_every_param() {
        let mut scene = assemble_seeded(1);
        let surface = DebugSurface::new(&mut scene);
        assert_eq!(surface.snapshot().len(), DebugParam::ALL.len());
    }
}
