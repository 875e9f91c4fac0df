//! Shared camera, material and caption presets.
//!
//! Every view spawns its own `Camera3d` with HDR + bloom post-processing,
//! tagged [`ViewRoot`] so it goes away with the view. Screen captions are
//! UI text nodes laid over that camera.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use crate::ViewRoot;

/// HDR camera with tonemapping, bloom and a perspective lens of `fov_degrees`.
pub fn view_camera(transform: Transform, fov_degrees: f32, bloom_intensity: f32) -> impl Bundle {
    (
        Name::new("Camera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Projection::Perspective(PerspectiveProjection {
            fov: fov_degrees.to_radians(),
            ..default()
        }),
        transform,
        ViewRoot,
    )
}

/// Matte double-sided surface, as used by petals and leaves.
pub fn foliage_material(color: Color, roughness: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        perceptual_roughness: roughness,
        metallic: 0.0,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Like [`foliage_material`] with a faint self-glow of `glow` × the base color.
pub fn glowing_material(color: Color, roughness: f32, glow: f32) -> StandardMaterial {
    StandardMaterial {
        emissive: color.to_linear() * glow,
        ..foliage_material(color, roughness)
    }
}

/// Window edge a [`Caption`] is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum CaptionEdge {
    /// Measured down from the top edge.
    Top,
    /// Measured up from the bottom edge.
    #[default]
    Bottom,
}

/// A line of horizontally centered screen text.
#[derive(Clone, Debug, Reflect)]
pub struct Caption {
    /// Text as written.
    pub text: String,
    /// Glyph height in logical pixels.
    pub font_size: f32,
    /// Text color; alpha doubles as opacity.
    pub color: Color,
    /// Edge the offset is measured from.
    pub edge: CaptionEdge,
    /// Distance from `edge` in logical pixels.
    pub offset: f32,
    /// Shown in capitals regardless of how `text` is written.
    pub uppercase: bool,
}

impl Caption {
    /// Bottom-anchored caption.
    pub fn new(text: &str, font_size: f32, color: Color, offset: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            color,
            edge: CaptionEdge::Bottom,
            offset,
            uppercase: false,
        }
    }

    /// Anchors the caption to the top edge instead.
    pub fn from_top(mut self) -> Self {
        self.edge = CaptionEdge::Top;
        self
    }

    /// Displays the text in capitals.
    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// The string actually rendered.
    pub fn display_text(&self) -> String {
        if self.uppercase {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }

    /// Full-width absolute row centering its text at the anchored edge.
    pub fn node(&self) -> Node {
        let offset = Val::Px(self.offset);
        let (top, bottom) = match self.edge {
            CaptionEdge::Top => (offset, Val::Auto),
            CaptionEdge::Bottom => (Val::Auto, offset),
        };
        Node {
            position_type: PositionType::Absolute,
            top,
            bottom,
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        }
    }
}

/// Caption row plus its text child, tagged [`ViewRoot`].
pub fn caption(caption: &Caption) -> impl Bundle {
    (
        Name::new(format!("Caption({})", caption.text)),
        ViewRoot,
        caption.node(),
        children![(
            Text::new(caption.display_text()),
            TextFont::from_font_size(caption.font_size),
            TextColor(caption.color),
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foliage_renders_both_faces() {
        let m = foliage_material(Color::WHITE, 0.6);
        assert!(m.double_sided);
        assert!(m.cull_mode.is_none());
        assert_eq!(m.perceptual_roughness, 0.6);
    }

    #[test]
    fn glow_scales_base_color() {
        let m = glowing_material(Color::linear_rgb(1.0, 0.5, 0.0), 0.7, 0.02);
        assert!((m.emissive.red - 0.02).abs() < 1e-6);
        assert!((m.emissive.green - 0.01).abs() < 1e-6);
        assert_eq!(m.emissive.blue, 0.0);
    }

    // ── Captions ────────────────────────────────────────────────────

    #[test]
    fn bottom_caption_spans_the_window() {
        let node = Caption::new("Living 3D Lily", 14.0, Color::WHITE, 30.0).node();
        assert_eq!(node.position_type, PositionType::Absolute);
        assert_eq!(node.bottom, Val::Px(30.0));
        assert_eq!(node.top, Val::Auto);
        assert_eq!(node.width, Val::Percent(100.0));
        assert_eq!(node.justify_content, JustifyContent::Center);
    }

    #[test]
    fn top_caption_measures_from_the_top() {
        let node = Caption::new("Happy Rose Day", 40.0, Color::WHITE, 24.0)
            .from_top()
            .node();
        assert_eq!(node.top, Val::Px(24.0));
        assert_eq!(node.bottom, Val::Auto);
    }

    #[test]
    fn uppercase_only_changes_what_is_shown() {
        let c = Caption::new("Living 3D Lily", 14.0, Color::WHITE, 30.0).uppercase();
        assert_eq!(c.display_text(), "LIVING 3D LILY");
        assert_eq!(c.text, "Living 3D Lily");
        let plain = Caption::new("❤️ With Love ❤️", 18.0, Color::WHITE, 0.0);
        assert_eq!(plain.display_text(), "❤️ With Love ❤️");
    }
}
