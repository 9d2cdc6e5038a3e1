//! The fixed set of camera angles a photograph is re-rendered from.
//!
//! Every directive is assembled from the same body of constraints so the
//! model sees identical rules for each angle and only the camera move and
//! the resulting lighting differ:
//!
//! * only the camera moves, never the subject
//! * the background is regenerated for the new vantage point
//! * fixed scene lights are re-projected onto the subject
//! * form, color and texture of the subject stay exactly as they are
//! * the result is one coherent photograph, not a composite

use crate::models::ViewSpec;

/// An angle's camera move and what that move does to the lighting.
struct Angle {
    label: &'static str,
    camera_move: &'static str,
    lighting_shift: &'static str,
}

const STANDARD_ANGLES: [Angle; 4] = [
    Angle {
        label: "from the right",
        camera_move: "Move the camera 90 degrees around the subject to its right side and look back at it, \
so the image shows the subject's right-hand profile.",
        lighting_shift: "A light that was in front of the subject now falls on it from the side of the frame, \
and a light that was on the subject's right now faces the camera and lights the visible side directly.",
    },
    Angle {
        label: "from the left",
        camera_move: "Move the camera 90 degrees around the subject to its left side and look back at it, \
so the image shows the subject's left-hand profile.",
        lighting_shift: "A light that was in front of the subject now falls on it from the side of the frame, \
and a light that was on the subject's left now faces the camera and lights the visible side directly.",
    },
    Angle {
        label: "from behind",
        camera_move: "Move the camera 180 degrees around the subject so it looks at the subject's back \
from the position directly opposite the original viewpoint.",
        lighting_shift: "A light that was in front of the subject is now behind it relative to the camera \
and becomes backlight or rim light outlining its edges, and the side now facing the camera falls into shadow \
unless another light reaches it.",
    },
    Angle {
        label: "from above",
        camera_move: "Raise the camera high above the subject and point it straight down, \
so the image is a top-down view of the subject.",
        lighting_shift: "Shadows now spread across the ground plane around the subject, and surfaces that face \
upward take the strongest light while the sides fall off toward the ground.",
    },
];

const CAMERA_ONLY: &str = "Only the camera moves. The subject itself must not rotate, flip, mirror or \
shift position in the scene; the change of view comes entirely from where the camera now stands.";

const BACKGROUND: &str = "Replace the background completely. Generate everything behind and around the \
subject as it would really look from the new camera position. Do not keep, reuse or stretch any part of the \
original background.";

const LIGHTING: &str = "Keep every light source fixed in the scene. Its position and color do not change when \
the camera moves, so recompute the illumination, shadows, highlights and rim light on the subject for the \
new angle between camera and light.";

const FIDELITY: &str = "Keep the subject exactly as it is. Preserve its form, proportions, colors, materials \
and surface texture; only the point of view changes.";

const COHESION: &str = "The output must read as one real photograph taken in a single shot, with consistent \
perspective, focus and exposure, not as a cut-out pasted onto a new scene.";

fn directive_for(angle: &Angle) -> String {
    format!(
        "Re-photograph the subject of this image {label}.\n\n\
Camera: {camera_move}\n{CAMERA_ONLY}\n\n\
Background: {BACKGROUND}\n\n\
Lighting: {LIGHTING} {lighting_shift}\n\n\
Subject: {FIDELITY}\n\n\
Scene: {COHESION}",
        label = angle.label,
        camera_move = angle.camera_move,
        lighting_shift = angle.lighting_shift,
    )
}

/// Ordered, read-only list of views generated for every source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleCatalog {
    specs: Vec<ViewSpec>,
}

impl AngleCatalog {
    /// Right, left, behind and above, in that order.
    pub fn standard() -> Self {
        Self {
            specs: STANDARD_ANGLES
                .iter()
                .map(|angle| ViewSpec::new(angle.label, directive_for(angle)))
                .collect(),
        }
    }

    /// Builds a catalog from caller-supplied views, keeping their order.
    pub fn from_specs(specs: Vec<ViewSpec>) -> Self {
        Self { specs }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ViewSpec> {
        self.specs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViewSpec> {
        self.specs.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.label.as_str()).collect()
    }
}

impl Default for AngleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a AngleCatalog {
    type Item = &'a ViewSpec;
    type IntoIter = std::slice::Iter<'a, ViewSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
