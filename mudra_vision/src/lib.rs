// THEORY:
// This file is the main entry point for the `mudra_vision` library crate.
// It defines the public API exposed to external consumers such as the
// visualizer server and the replay tester.
//
// Two layers are exported. The `core_modules` hold the synchronous, per-frame
// classification engine: landmarks in, one label out. The `pipeline` wraps that
// engine in a live producer task for callers that feed frames continuously and
// read results from elsewhere. The most commonly used types are re-exported at
// the crate root.

pub mod core_modules;
pub mod pipeline;

pub use core_modules::catalog::{CatalogBuilder, DeadAlias, GestureCatalog, GestureRule};
pub use core_modules::classifier::{Classification, Classifier, NO_GESTURE_LABEL, RuleVerdict, Verdict};
pub use core_modules::distance_table::DistanceTables;
pub use core_modules::error::{InvalidLandmarks, PredicateFault};
pub use core_modules::gestures::{GesturePredicate, HandGeometry, Mudra, RuleOutcome};
pub use core_modules::landmark::{Finger, HAND_SKELETON, LANDMARK_COUNT, Landmark, LandmarkSet};
pub use core_modules::mudra_info::{MudraInfo, all_mudras, describe};
