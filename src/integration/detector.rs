//! Seam between an object detector and the compliance engine.

use crate::integration::Detection;

/// A hand/scooper/pizza detector.
///
/// The model is a black box: it only has to report labeled boxes for one
/// image at a time. Labels other than `hand`, `scooper` and `pizza` are
/// dropped downstream, so a detector may pass its raw class names through.
///
/// # Example
///
/// ```
/// use scoopwatch::{Detection, DetectionBuilder, DetectionSource};
///
/// /// Replays a fixed scene, e.g. for a dry run of the zone layout.
/// struct StaticScene;
///
/// impl DetectionSource for StaticScene {
///     type Error = std::convert::Infallible;
///
///     fn detect(
///         &mut self,
///         _input: &[u8],
///         _width: u32,
///         _height: u32,
///     ) -> Result<Vec<Detection>, Self::Error> {
///         Ok(vec![
///             DetectionBuilder::hand().at(50.0, 50.0).score(0.9).build(),
///             DetectionBuilder::scooper().at(58.0, 47.0).score(0.8).build(),
///             DetectionBuilder::pizza().tlbr(40.0, 40.0, 60.0, 60.0).score(0.95).build(),
///         ])
///     }
/// }
///
/// let boxes = StaticScene.detect(&[], 640, 480).unwrap();
/// assert_eq!(boxes.len(), 3);
/// ```
pub trait DetectionSource {
    type Error;

    /// Detect objects in one encoded or raw image of `width` x `height` pixels.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}
