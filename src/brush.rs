// Brush description + the merge-update used by `Tool::change_brush`.
// Sizes are millimetres. A round brush's sizes are diameters,
// a rect brush's sizes are side lengths.

use serde::{Deserialize, Serialize};

use crate::types::Rgba;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BrushShape {
    Round,
    Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub shape: BrushShape,
    pub min_width: f32,
    pub max_width: f32,
    pub color: Rgba,
    /// Stroke rotation in degrees (eg 45 for a calligraphy slant). Stored, not rendered.
    pub angle: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            shape: BrushShape::Round,
            min_width: 1.0,
            max_width: 10.0,
            color: Rgba::BLACK,
            angle: None,
            min_height: None,
            max_height: None,
        }
    }
}

impl Brush {
    /// Merge `patch` into this brush. Fields the patch leaves `None` keep their value.
    pub fn apply(&mut self, patch: &BrushPatch) {
        if let Some(shape) = patch.shape { self.shape = shape; }
        if let Some(w) = patch.min_width { self.min_width = w; }
        if let Some(w) = patch.max_width { self.max_width = w; }
        if let Some(c) = patch.color { self.color = c; }
        if patch.angle.is_some() { self.angle = patch.angle; }
        if patch.min_height.is_some() { self.min_height = patch.min_height; }
        if patch.max_height.is_some() { self.max_height = patch.max_height; }
    }

    /// Ink coverage across the stroke for a pen intensity in [0,1].
    #[inline]
    pub fn thickness(&self, intensity: f32) -> f32 {
        intensity * self.max_width
    }
}

/// Partial brush. Deserializes from `{"color": "#fff", "max_width": 4}` etc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<BrushShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,
}

impl BrushPatch {
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_shape(mut self, shape: BrushShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Sets both min and max width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self.max_width = Some(width);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unspecified_fields() {
        let mut brush = Brush::default();
        brush.apply(&BrushPatch { min_width: Some(5.0), ..Default::default() });
        brush.apply(&BrushPatch::default().with_color(Rgba::WHITE));
        assert_eq!(brush.min_width, 5.0);
        assert_eq!(brush.max_width, 10.0);
        assert_eq!(brush.color, Rgba::WHITE);
        assert_eq!(brush.shape, BrushShape::Round);
    }

    #[test]
    fn optional_fields_survive_unrelated_patches() {
        let mut brush = Brush::default();
        brush.apply(&BrushPatch { angle: Some(45.0), max_height: Some(3.0), ..Default::default() });
        brush.apply(&BrushPatch::default().with_shape(BrushShape::Rect));
        assert_eq!(brush.angle, Some(45.0));
        assert_eq!(brush.max_height, Some(3.0));
        assert_eq!(brush.min_height, None);
        assert_eq!(brush.shape, BrushShape::Rect);
    }

    #[test]
    fn thickness_scales_with_intensity() {
        let brush = Brush::default();
        assert_eq!(brush.thickness(0.0), 0.0);
        assert_eq!(brush.thickness(0.5), 5.0);
        assert_eq!(brush.thickness(1.0), 10.0);
    }

    #[test]
    fn patch_from_json() {
        let patch: BrushPatch = serde_json::from_str(r##"{"color":"#fff","shape":"RECT"}"##).unwrap();
        assert_eq!(patch.color, Some(Rgba::WHITE));
        assert_eq!(patch.shape, Some(BrushShape::Rect));
        assert_eq!(patch.min_width, None);
    }
}
