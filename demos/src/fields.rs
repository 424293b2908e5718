//! Field initializers for the demo.
//!
//! The extractor never fills a field itself; these are the external
//! initializers that populate one before a rebuild.

use contour_core::{FieldExtent, Point3, Result, VoxelField};

/// Built-in field shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// 2x2x2 field, samples (0,0,0) and (1,0,0) at +5 and the rest on the surface.
    Pattern,
    /// Centred sphere with a radius of a third of the field.
    Sphere,
    /// Axis-aligned plane through the middle of the x axis.
    Plane,
}

impl FieldShape {
    /// Parse a shape name as given on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pattern" => Some(Self::Pattern),
            "sphere" => Some(Self::Sphere),
            "plane" => Some(Self::Plane),
            _ => None,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Sphere => "sphere",
            Self::Plane => "plane",
        }
    }

    /// Build the field. `size` is ignored by [`FieldShape::Pattern`].
    pub fn build(&self, size: usize) -> Result<VoxelField> {
        match self {
            Self::Pattern => pattern_field(),
            Self::Sphere => sphere_field(size),
            Self::Plane => plane_field(size),
        }
    }
}

/// The fixed 2x2x2 pattern: two outside samples on the x axis.
pub fn pattern_field() -> Result<VoxelField> {
    let mut field = VoxelField::new(FieldExtent::cube(2))?;
    field.set(0, 0, 0, 5.0)?;
    field.set(1, 0, 0, 5.0)?;
    Ok(field)
}

/// Cubic field holding a centred sphere SDF.
pub fn sphere_field(size: usize) -> Result<VoxelField> {
    let center = Point3::splat(size.saturating_sub(1) as f64 * 0.5);
    let radius = size as f64 / 3.0;
    VoxelField::from_fn(FieldExtent::cube(size), |c| {
        (c.to_point() - center).length() - radius
    })
}

/// Cubic field split by the plane `x = (size - 1) / 2`.
pub fn plane_field(size: usize) -> Result<VoxelField> {
    let offset = size.saturating_sub(1) as f64 * 0.5;
    VoxelField::from_fn(FieldExtent::cube(size), |c| c.x as f64 - offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape() {
        assert_eq!(FieldShape::parse("Sphere"), Some(FieldShape::Sphere));
        assert_eq!(FieldShape::parse("pattern"), Some(FieldShape::Pattern));
        assert_eq!(FieldShape::parse("torus"), None);
        assert_eq!(FieldShape::Plane.name(), "plane");
    }

    #[test]
    fn test_pattern_field_samples() {
        let field = pattern_field().unwrap();
        assert_eq!(field.get(0, 0, 0), Ok(5.0));
        assert_eq!(field.get(1, 0, 0), Ok(5.0));
        assert_eq!(field.get(1, 1, 1), Ok(0.0));
        assert_eq!(field.inside_count(), 6);
    }

    #[test]
    fn test_sphere_field_sign() {
        let field = sphere_field(9).unwrap();
        assert!(field.get(4, 4, 4).unwrap() < 0.0);
        assert!(field.get(0, 0, 0).unwrap() > 0.0);
    }

    #[test]
    fn test_small_size_is_rejected() {
        assert!(sphere_field(1).is_err());
        assert!(plane_field(0).is_err());
        // Pattern has a fixed extent
        assert!(FieldShape::Pattern.build(0).is_ok());
    }
}
