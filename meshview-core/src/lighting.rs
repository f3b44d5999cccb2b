//! Three point lights and Blinn-Phong shading in eye space
use nalgebra::{Point3, Vector3};

use crate::transform::TransformState;

/// Linear RGB triple, each channel nominally in `[0, 1]`.
pub type Rgb = Vector3<f32>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub name: &'static str,
    /// Eye-space position while lighting is fixed; model-space otherwise.
    pub position: Point3<f32>,
    pub ambient: Rgb,
    pub diffuse: Rgb,
    pub specular: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Rgb,
    pub diffuse: Rgb,
    pub specular: Rgb,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Rgb::repeat(0.2),
            diffuse: Rgb::repeat(0.6),
            specular: Rgb::repeat(1.0),
            shininess: 64.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingMode {
    /// Lights stay put in view space while the model moves.
    Fixed,
    /// Lights ride along with the model's translation and rotation.
    FollowsModel,
}

/// Switchable light rig owned by a mesh scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub lights: Vec<Light>,
    pub enabled: Vec<bool>,
    pub mode: LightingMode,
    pub material: Material,
    pub global_ambient: Rgb,
}

impl Lighting {
    /// Red specular light in front, green diffuse light to the left and
    /// blue ambient light on top.
    pub fn three_point() -> Self {
        let lights = vec![
            Light {
                name: "front",
                position: Point3::new(0.0, 0.0, 150.0),
                ambient: Rgb::new(0.05, 0.0, 0.0),
                diffuse: Rgb::new(0.2, 0.0, 0.0),
                specular: Rgb::new(1.0, 0.0, 0.0),
            },
            Light {
                name: "left",
                position: Point3::new(-150.0, 0.0, 0.0),
                ambient: Rgb::new(0.0, 0.05, 0.0),
                diffuse: Rgb::new(0.0, 1.0, 0.0),
                specular: Rgb::new(0.0, 0.2, 0.0),
            },
            Light {
                name: "top",
                position: Point3::new(0.0, 150.0, 0.0),
                ambient: Rgb::new(0.0, 0.0, 1.0),
                diffuse: Rgb::new(0.0, 0.0, 0.2),
                specular: Rgb::new(0.0, 0.0, 0.2),
            },
        ];
        let enabled = vec![true; lights.len()];
        Self {
            lights,
            enabled,
            mode: LightingMode::Fixed,
            material: Material::default(),
            global_ambient: Rgb::repeat(0.2),
        }
    }

    /// Flip one light on or off. Returns the new state, or `None` for an
    /// index with no light.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let enabled = self.enabled.get_mut(index)?;
        *enabled = !*enabled;
        Some(*enabled)
    }

    /// Resolve enabled lights into eye space for one frame.
    pub fn shading(&self, state: &TransformState) -> Shading {
        let carry = match self.mode {
            LightingMode::Fixed => None,
            LightingMode::FollowsModel => Some(state.light_matrix()),
        };
        let lights = self
            .lights
            .iter()
            .zip(&self.enabled)
            .filter(|(_, on)| **on)
            .map(|(light, _)| Light {
                position: carry
                    .map(|m| m.transform_point(&light.position))
                    .unwrap_or(light.position),
                ..*light
            })
            .collect();
        Shading {
            lights,
            material: self.material,
            global_ambient: self.global_ambient,
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::three_point()
    }
}

/// Everything a backend needs to light one frame, already in eye space.
#[derive(Debug, Clone, PartialEq)]
pub struct Shading {
    pub lights: Vec<Light>,
    pub material: Material,
    pub global_ambient: Rgb,
}

impl Shading {
    /// Two-sided Blinn-Phong with an infinitely distant viewer along +Z.
    pub fn shade(&self, position: &Point3<f32>, normal: &Vector3<f32>) -> Rgb {
        let material = &self.material;
        let mut normal = normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z);
        // back faces are lit as if they faced the eye
        if normal.dot(&-position.coords) < 0.0 {
            normal = -normal;
        }

        let mut color = self.global_ambient.component_mul(&material.ambient);
        for light in &self.lights {
            color += light.ambient.component_mul(&material.ambient);

            let Some(to_light) = (light.position - position).try_normalize(f32::EPSILON) else {
                continue;
            };
            let lambert = normal.dot(&to_light);
            if lambert <= 0.0 {
                continue;
            }
            color += light.diffuse.component_mul(&material.diffuse) * lambert;

            let half = (to_light + Vector3::z()).normalize();
            let highlight = normal.dot(&half).max(0.0).powf(material.shininess);
            color += light.specular.component_mul(&material.specular) * highlight;
        }

        color.map(|c| c.clamp(0.0, 1.0))
    }
}

/// Perceived brightness of a colour, `0..=1`.
pub fn luminance(color: &Rgb) -> f32 {
    (0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z).clamp(0.0, 1.0)
}
