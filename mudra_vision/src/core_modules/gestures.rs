// THEORY:
// The `gestures` module is the vocabulary of the engine: one predicate per named
// mudra, each a conjunction of a handful of geometric checks. None of them learns
// anything or keeps anything between frames. A predicate looks at one hand and
// returns a verdict.
//
// Key architectural principles:
// 1.  **One Capability**: Every rule, built-in or user supplied, is reached through
//     the `GesturePredicate` trait. The catalog and the classifier never know
//     which concrete rule they are holding.
// 2.  **Shared Vocabulary**: `HandGeometry` bundles the landmark set, the distance
//     tables and the finger-state evaluator behind the few questions rules ask
//     ("is this finger straight?", "are these two points touching?", "what is the
//     angle between these two bones?"). The predicates read as the pose they
//     describe.
// 3.  **Palm-Relative Units**: A "touch" is measured against the palm span (index
//     MCP to middle MCP). Absolute offsets are expressed as fractions of the scale
//     reference. No rule compares a raw distance with a bare constant, so scaling
//     the whole hand never changes a verdict.
// 4.  **Undefined Is False**: A degenerate angle or a collapsed finger never
//     satisfies a condition. The built-in rules therefore never fault; they
//     simply decline to match.
// 5.  **Explicit Exclusions**: Where two poses sit next to each other, the rule
//     that must yield calls the other one directly and steps aside if it matches.

use std::fmt;

use crate::core_modules::distance_table::DistanceTables;
use crate::core_modules::error::PredicateFault;
use crate::core_modules::finger_state::{DEFAULT_STRAIGHT_THRESHOLD, FingerState};
use crate::core_modules::geometry::{angle_between, centroid, distance};
use crate::core_modules::landmark::{
    FINGERTIPS, Finger, INDEX_MCP, INDEX_PIP, INDEX_TIP, Landmark, LandmarkSet, MIDDLE_MCP,
    MIDDLE_PIP, MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_IP, THUMB_MCP,
    THUMB_TIP, WRIST,
};

/// Verdict of a single rule for a single frame.
pub type RuleOutcome = Result<bool, PredicateFault>;

/// The capability every catalog entry implements.
pub trait GesturePredicate: Send + Sync {
    fn evaluate(&self, landmarks: &LandmarkSet, tables: &DistanceTables) -> RuleOutcome;
}

/// Read-only view over one frame, shared by every built-in rule.
#[derive(Debug, Clone, Copy)]
pub struct HandGeometry<'a> {
    landmarks: &'a LandmarkSet,
    tables: &'a DistanceTables,
    fingers: FingerState<'a>,
}

impl<'a> HandGeometry<'a> {
    pub fn new(landmarks: &'a LandmarkSet, tables: &'a DistanceTables) -> Self {
        Self {
            landmarks,
            tables,
            fingers: FingerState::new(tables),
        }
    }

    pub fn point(&self, index: usize) -> &'a Landmark {
        self.landmarks.get(index)
    }

    pub fn norm(&self, i: usize, j: usize) -> f64 {
        self.tables.normalized(i, j)
    }

    pub fn raw(&self, i: usize, j: usize) -> f64 {
        self.tables.raw(i, j)
    }

    pub fn scale(&self) -> f64 {
        self.tables.scale_ref()
    }

    /// Normalized index-MCP to middle-MCP distance, the unit of every touch test.
    pub fn palm_span(&self) -> f64 {
        self.norm(INDEX_MCP, MIDDLE_MCP)
    }

    /// `a` and `b` are closer than `k` palm spans.
    pub fn touching(&self, a: usize, b: usize, k: f64) -> bool {
        self.norm(a, b) < k * self.palm_span()
    }

    pub fn straight(&self, finger: Finger, threshold: f64) -> bool {
        self.fingers.is_straight(finger, threshold)
    }

    pub fn bent(&self, finger: Finger, threshold: f64) -> bool {
        self.fingers.is_bent(finger, threshold)
    }

    pub fn all_straight(&self, fingers: &[Finger], threshold: f64) -> bool {
        fingers.iter().all(|f| self.straight(*f, threshold))
    }

    pub fn all_bent(&self, fingers: &[Finger], threshold: f64) -> bool {
        fingers.iter().all(|f| self.bent(*f, threshold))
    }

    /// The fingertip lies farther from the wrist than the finger's own MCP.
    pub fn reaches_past_mcp(&self, finger: Finger) -> bool {
        let (mcp, _, tip) = finger.chain();
        self.norm(tip, WRIST) > self.norm(mcp, WRIST)
    }

    /// Angle between the bones `a.0→a.1` and `b.0→b.1`.
    pub fn bone_angle(&self, a: (usize, usize), b: (usize, usize)) -> Option<f64> {
        angle_between(self.landmarks.vector(a.0, a.1), self.landmarks.vector(b.0, b.1))
    }

    /// Each consecutive pair in `tips` is closer than `k` palm spans.
    fn tips_together(&self, tips: &[usize], k: f64) -> bool {
        tips.windows(2).all(|pair| self.touching(pair[0], pair[1], k))
    }
}

use Finger::{Index, Middle, Pinky, Ring, Thumb};

const NEIGHBOUR_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// The classifiable mudras, in default catalog priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mudra {
    ArdhaChandra,
    Suchi,
    Ardhapataka,
    Mayura,
    Trishula,
    Tripataka,
    Sarpashirsha,
    Pataka,
    Arala,
    KartariMukham,
    ShukaTundam,
    Shikharam,
    Musthi,
    Chandrakala,
    Kapitha,
    Katakamukha,
    Mrigasheersha,
    Simhamukha,
    Padmakosha,
    Chatura,
    Bhramara,
    Hamsasya,
    Hamsapaksha,
    Mukula,
}

impl Mudra {
    pub const ALL: [Mudra; 24] = [
        Mudra::ArdhaChandra,
        Mudra::Suchi,
        Mudra::Ardhapataka,
        Mudra::Mayura,
        Mudra::Trishula,
        Mudra::Tripataka,
        Mudra::Sarpashirsha,
        Mudra::Pataka,
        Mudra::Arala,
        Mudra::KartariMukham,
        Mudra::ShukaTundam,
        Mudra::Shikharam,
        Mudra::Musthi,
        Mudra::Chandrakala,
        Mudra::Kapitha,
        Mudra::Katakamukha,
        Mudra::Mrigasheersha,
        Mudra::Simhamukha,
        Mudra::Padmakosha,
        Mudra::Chatura,
        Mudra::Bhramara,
        Mudra::Hamsasya,
        Mudra::Hamsapaksha,
        Mudra::Mukula,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Mudra::ArdhaChandra => "Ardha Chandra Mudra",
            Mudra::Suchi => "Suchi Mudra",
            Mudra::Ardhapataka => "Ardhapataka Mudra",
            Mudra::Mayura => "Mayura Mudra",
            Mudra::Trishula => "Trishula Mudra",
            Mudra::Tripataka => "Tripataka Mudra",
            Mudra::Sarpashirsha => "Sarpashirsha Mudra",
            Mudra::Pataka => "Pataka Mudra",
            Mudra::Arala => "Arala Mudra",
            Mudra::KartariMukham => "Kartari Mukham Mudra",
            Mudra::ShukaTundam => "Shuka Tundam Mudra",
            Mudra::Shikharam => "Shikharam Mudra",
            Mudra::Musthi => "Musthi Mudra",
            Mudra::Chandrakala => "Chandrakala Mudra",
            Mudra::Kapitha => "Kapitha Mudra",
            Mudra::Katakamukha => "Katakamukha Mudra",
            Mudra::Mrigasheersha => "Mrigasheersha Mudra",
            Mudra::Simhamukha => "Simhamukha Mudra",
            Mudra::Padmakosha => "Padmakosha Mudra",
            Mudra::Chatura => "Chatura Mudra",
            Mudra::Bhramara => "Bhramara Mudra",
            Mudra::Hamsasya => "Hamsasya Mudra",
            Mudra::Hamsapaksha => "Hamsapaksha Mudra",
            Mudra::Mukula => "Mukula Mudra",
        }
    }

    pub fn matches(self, hand: &HandGeometry) -> bool {
        match self {
            Mudra::ArdhaChandra => ardha_chandra(hand),
            Mudra::Suchi => suchi(hand),
            Mudra::Ardhapataka => ardhapataka(hand),
            Mudra::Mayura => mayura(hand),
            Mudra::Trishula => trishula(hand),
            Mudra::Tripataka => tripataka(hand),
            Mudra::Sarpashirsha => sarpashirsha(hand),
            Mudra::Pataka => pataka(hand),
            Mudra::Arala => arala(hand),
            Mudra::KartariMukham => kartari_mukham(hand),
            Mudra::ShukaTundam => shuka_tundam(hand),
            Mudra::Shikharam => shikharam(hand),
            Mudra::Musthi => musthi(hand),
            Mudra::Chandrakala => chandrakala(hand),
            Mudra::Kapitha => kapitha(hand),
            Mudra::Katakamukha => katakamukha(hand),
            Mudra::Mrigasheersha => mrigasheersha(hand),
            Mudra::Simhamukha => simhamukha(hand),
            Mudra::Padmakosha => padmakosha(hand),
            Mudra::Chatura => chatura(hand),
            Mudra::Bhramara => bhramara(hand),
            Mudra::Hamsasya => hamsasya(hand),
            Mudra::Hamsapaksha => hamsapaksha(hand),
            Mudra::Mukula => mukula(hand),
        }
    }
}

impl fmt::Display for Mudra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl GesturePredicate for Mudra {
    fn evaluate(&self, landmarks: &LandmarkSet, tables: &DistanceTables) -> RuleOutcome {
        Ok(self.matches(&HandGeometry::new(landmarks, tables)))
    }
}

// --- Open-palm family ---

fn ardha_chandra(hand: &HandGeometry) -> bool {
    if !hand.straight(Thumb, 0.85) || !hand.all_straight(&Finger::LONG, DEFAULT_STRAIGHT_THRESHOLD) {
        return false;
    }
    let Some(angle) = hand.bone_angle((THUMB_MCP, THUMB_TIP), (INDEX_MCP, INDEX_TIP)) else {
        return false;
    };
    (60.0..=120.0).contains(&angle) && hand.tips_together(&NEIGHBOUR_TIPS, 1.5)
}

fn pataka(hand: &HandGeometry) -> bool {
    hand.all_straight(&Finger::LONG, 0.97) && hand.touching(THUMB_TIP, INDEX_MCP, 1.5)
}

/// Straight fingers whose tips converge: index and pinky tips closer together
/// than their MCPs.
fn sarpashirsha(hand: &HandGeometry) -> bool {
    hand.all_straight(&Finger::LONG, 0.8)
        && hand.norm(INDEX_TIP, PINKY_TIP) < hand.norm(INDEX_MCP, PINKY_MCP)
        && hand.touching(THUMB_TIP, INDEX_MCP, 1.5)
}

fn chatura(hand: &HandGeometry) -> bool {
    if !hand.all_straight(&Finger::LONG, 0.85) {
        return false;
    }
    let scale = hand.scale();
    if hand.raw(INDEX_TIP, MIDDLE_TIP) > scale * 0.30 || hand.raw(MIDDLE_TIP, RING_TIP) > scale * 0.30 {
        return false;
    }

    let thumb = hand.point(THUMB_TIP);
    let (wrist, middle_mcp) = (hand.point(WRIST), hand.point(MIDDLE_MCP));
    let palm_centre = Landmark::new((wrist.x + middle_mcp.x) / 2.0, (wrist.y + middle_mcp.y) / 2.0);

    let below_knuckles = thumb.y > middle_mcp.y - scale * 0.01;
    let (index_x, pinky_x) = (hand.point(INDEX_MCP).x, hand.point(PINKY_MCP).x);
    let within_palm = index_x.min(pinky_x) < thumb.x && thumb.x < index_x.max(pinky_x);
    let to_centre = distance(thumb, &palm_centre);
    let tucked = NEIGHBOUR_TIPS
        .iter()
        .all(|tip| to_centre < distance(thumb, hand.point(*tip)));

    below_knuckles && within_palm && tucked
}

// --- Partial-flag family ---

fn suchi(hand: &HandGeometry) -> bool {
    hand.straight(Index, 0.95)
        && hand.reaches_past_mcp(Index)
        && hand.all_bent(&[Middle, Ring, Pinky], 0.8)
        && hand.touching(THUMB_TIP, MIDDLE_PIP, 0.9)
}

fn ardhapataka(hand: &HandGeometry) -> bool {
    hand.all_straight(&[Index, Middle], DEFAULT_STRAIGHT_THRESHOLD)
        && hand.all_bent(&[Ring, Pinky], 0.8)
        && hand.touching(THUMB_TIP, INDEX_MCP, 1.5)
}

fn mayura(hand: &HandGeometry) -> bool {
    hand.all_straight(&[Index, Middle, Pinky], DEFAULT_STRAIGHT_THRESHOLD)
        && hand.bent(Ring, 0.8)
        && hand.touching(THUMB_TIP, RING_TIP, 1.0)
}

fn trishula(hand: &HandGeometry) -> bool {
    hand.all_straight(&[Index, Middle, Ring], DEFAULT_STRAIGHT_THRESHOLD)
        && hand.bent(Pinky, 0.8)
        && hand.touching(THUMB_TIP, PINKY_TIP, 1.0)
}

/// Same fingers as Mayura; yields to it when the thumb reaches the ring tip.
/// The standard order already tries Mayura first, so the exclusion only takes
/// effect in catalogs that place Tripataka ahead of it.
fn tripataka(hand: &HandGeometry) -> bool {
    hand.all_straight(&[Index, Middle, Pinky], DEFAULT_STRAIGHT_THRESHOLD)
        && hand.bent(Ring, 0.8)
        && hand.touching(THUMB_TIP, INDEX_MCP, 1.5)
        && !mayura(hand)
}

fn arala(hand: &HandGeometry) -> bool {
    hand.all_straight(&[Middle, Ring, Pinky], 0.88)
        && hand.bent(Index, 0.92)
        && hand.touching(THUMB_TIP, INDEX_TIP, 1.2)
        && (hand.point(THUMB_IP).x - hand.point(INDEX_PIP).x).abs() > 0.25 * hand.scale()
}

fn kartari_mukham(hand: &HandGeometry) -> bool {
    if !hand.all_straight(&[Index, Middle], DEFAULT_STRAIGHT_THRESHOLD) {
        return false;
    }
    if !hand.reaches_past_mcp(Index) || !hand.reaches_past_mcp(Middle) {
        return false;
    }
    hand.all_bent(&[Ring, Pinky], 0.8)
        && (hand.touching(THUMB_TIP, RING_PIP, 2.0) || hand.touching(THUMB_TIP, RING_TIP, 2.0))
}

fn shuka_tundam(hand: &HandGeometry) -> bool {
    hand.all_straight(&[Middle, Pinky], DEFAULT_STRAIGHT_THRESHOLD)
        && hand.all_bent(&[Index, Ring], 0.7)
        && hand.touching(THUMB_TIP, INDEX_MCP, 1.5)
}

fn chandrakala(hand: &HandGeometry) -> bool {
    if !hand.straight(Index, DEFAULT_STRAIGHT_THRESHOLD) || !hand.straight(Thumb, 0.85) {
        return false;
    }
    if !hand.all_bent(&[Middle, Ring, Pinky], 0.8) {
        return false;
    }
    hand.bone_angle((THUMB_MCP, THUMB_TIP), (INDEX_MCP, INDEX_TIP))
        .is_some_and(|angle| angle > 45.0)
}

/// Only the pinky and thumb open, the thumb swung away from the palm axis.
fn mrigasheersha(hand: &HandGeometry) -> bool {
    hand.straight(Pinky, 0.85)
        && hand.straight(Thumb, 0.80)
        && hand.all_bent(&[Index, Middle, Ring], 0.85)
        && hand
            .bone_angle((THUMB_MCP, THUMB_TIP), (WRIST, MIDDLE_MCP))
            .is_some_and(|angle| angle > 45.0)
}

fn simhamukha(hand: &HandGeometry) -> bool {
    hand.straight(Index, 0.82)
        && hand.straight(Pinky, 0.80)
        && hand.all_bent(&[Middle, Ring], 0.92)
        && hand.point(PINKY_TIP).y < hand.point(PINKY_MCP).y - hand.scale() * 0.20
        && hand.norm(THUMB_TIP, MIDDLE_PIP) < 3.5
}

// --- Closed-hand family ---

fn thumb_on_index_side(hand: &HandGeometry) -> bool {
    hand.touching(THUMB_TIP, INDEX_PIP, 1.5) || hand.touching(THUMB_TIP, MIDDLE_PIP, 1.5)
}

fn shikharam(hand: &HandGeometry) -> bool {
    hand.all_bent(&Finger::LONG, 0.8) && hand.straight(Thumb, 0.85) && !thumb_on_index_side(hand)
}

fn musthi(hand: &HandGeometry) -> bool {
    hand.all_bent(&Finger::LONG, 0.8) && thumb_on_index_side(hand)
}

fn kapitha(hand: &HandGeometry) -> bool {
    hand.all_bent(&Finger::ALL, 0.92)
        && (hand.touching(THUMB_TIP, INDEX_TIP, 1.5) || hand.touching(THUMB_TIP, MIDDLE_TIP, 1.5))
}

fn katakamukha(hand: &HandGeometry) -> bool {
    hand.all_straight(&[Ring, Pinky], 0.83)
        && hand.touching(THUMB_TIP, INDEX_TIP, 0.55)
        && hand.touching(THUMB_TIP, MIDDLE_TIP, 0.55)
}

fn padmakosha(hand: &HandGeometry) -> bool {
    hand.all_bent(&Finger::LONG, 0.90) && hand.tips_together(&NEIGHBOUR_TIPS, 1.0) && hand.bent(Thumb, 0.90)
}

fn bhramara(hand: &HandGeometry) -> bool {
    let reach = hand.scale() * 0.22;
    hand.raw(THUMB_TIP, MIDDLE_TIP) <= reach
        && hand.all_straight(&[Ring, Pinky], 0.85)
        && hand.raw(INDEX_TIP, INDEX_MCP) <= reach
}

fn hamsasya(hand: &HandGeometry) -> bool {
    (hand.norm(THUMB_TIP, INDEX_TIP) < 0.40 || hand.norm(THUMB_TIP, INDEX_PIP) < 0.40)
        && !hand.straight(Index, 0.88)
        && hand.all_straight(&[Middle, Ring], 0.80)
        && hand.straight(Pinky, 0.78)
}

/// Pinky raised above a level row of the other three tips, thumb held clear.
/// Yields to Simhamukha. As with Tripataka, the exclusion only takes effect in
/// catalogs that place this rule ahead of Simhamukha.
fn hamsapaksha(hand: &HandGeometry) -> bool {
    let scale = hand.scale();
    let [index, middle, ring, pinky] = NEIGHBOUR_TIPS.map(|tip| hand.point(tip).y);

    // --- 1. Height Ordering ---
    if pinky + scale * 0.06 >= index.min(middle).min(ring) {
        return false;
    }

    // --- 2. Level Row ---
    let tolerance = scale * 0.16;
    let level = (index - middle).abs() < tolerance
        && (middle - ring).abs() < tolerance
        && (index - ring).abs() < tolerance;
    if !level {
        return false;
    }

    // --- 3. Thumb Clearance ---
    if hand.norm(THUMB_TIP, INDEX_TIP) < 0.25 || hand.norm(THUMB_TIP, MIDDLE_TIP) < 0.25 {
        return false;
    }

    !simhamukha(hand)
}

/// All five tips gathered into a bud.
fn mukula(hand: &HandGeometry) -> bool {
    let Some(centre) = centroid(FINGERTIPS.iter().map(|tip| hand.point(*tip))) else {
        return false;
    };
    let spread = FINGERTIPS
        .iter()
        .map(|tip| distance(hand.point(*tip), &centre))
        .fold(0.0_f64, f64::max);
    if spread > hand.scale() * 2.2 {
        return false;
    }
    hand.all_bent(&Finger::ALL, 0.93)
        && FINGERTIPS
            .windows(2)
            .all(|pair| hand.norm(pair[0], pair[1]) <= 1.25)
}
