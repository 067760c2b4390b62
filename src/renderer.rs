//! # Moon Glyph Rendering
//!
//! Turns a lunation into a small SVG silhouette of the moon. The disc is drawn
//! as two closed paths that share the terminator arc:
//!
//! - **left path**: top → terminator arc → bottom → left limb → top
//! - **right path**: top → terminator arc → bottom → right limb → top
//!
//! One path is filled with the light colour and the other with the shadow
//! colour, so together they always cover the whole disc. Which side is lit
//! comes from [`TerminatorDescriptor::lit_from_left`].
//!
//! ## Output
//! ```text
//! <path class="light" d="M20,0 A 35.4 35.4 0 0 1 20,40 A 20 20 0 0 1 20,0" fill="#f7f7c0"/>
//! <path class="shadow" d="M20,0 A 35.4 35.4 0 0 1 20,40 A 20 20 0 0 0 20,0" fill="#274982"/>
//! ```

use crate::config::GlyphConfig;
use crate::error::Result;
use crate::terminator::{compute_terminator, TerminatorDescriptor};

/// Renders moon glyphs of one size and colour scheme.
#[derive(Debug, Clone)]
pub struct MoonGlyphRenderer {
    view_size: f64,
    light_colour: String,
    shadow_colour: String,
}

impl MoonGlyphRenderer {
    pub fn new(view_size: f64, light_colour: &str, shadow_colour: &str) -> Self {
        Self {
            view_size,
            light_colour: light_colour.to_string(),
            shadow_colour: shadow_colour.to_string(),
        }
    }

    pub fn from_config(config: &GlyphConfig) -> Self {
        Self::new(config.diameter, &config.light_colour, &config.shadow_colour)
    }

    pub fn view_size(&self) -> f64 {
        self.view_size
    }

    /// The two `<path>` elements for `lunation`, without an `<svg>` root.
    pub fn render(&self, lunation: f64) -> Result<String> {
        let radius = self.view_size / 2.0;
        let terminator = compute_terminator(lunation, radius)?;
        Ok(self.paths(&terminator))
    }

    /// A complete `<svg>` element sized to the view.
    pub fn svg(&self, lunation: f64) -> Result<String> {
        let size = num(self.view_size);
        Ok(format!(
            r#"<svg width="{size}" height="{size}" viewBox="0 0 {size} {size}">{}</svg>"#,
            self.render(lunation)?
        ))
    }

    fn paths(&self, terminator: &TerminatorDescriptor) -> String {
        let r = num(self.view_size / 2.0);
        let d = num(self.view_size);
        let a = num(terminator.arc_radius);
        let sweep = if terminator.right_of_center { 1 } else { 0 };

        let move_to_top = format!("M{r},0");
        let terminator_arc = format!("A {a} {a} 0 0 {sweep} {r},{d}");
        let left_limb = format!("A {r} {r} 0 0 1 {r},0");
        let right_limb = format!("A {r} {r} 0 0 0 {r},0");

        let (left_style, right_style) = if terminator.lit_from_left {
            (("light", &self.light_colour), ("shadow", &self.shadow_colour))
        } else {
            (("shadow", &self.shadow_colour), ("light", &self.light_colour))
        };

        format!(
            r#"<path class="{}" d="{move_to_top} {terminator_arc} {left_limb}" fill="{}"/><path class="{}" d="{move_to_top} {terminator_arc} {right_limb}" fill="{}"/>"#,
            left_style.0, left_style.1, right_style.0, right_style.1
        )
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
