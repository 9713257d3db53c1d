// Synthetic hand poses shared by the unit tests.
//
// Every pose starts from the same upright palm (wrist below, fingers pointing up
// the image) with all four fingers curled. A test then extends, fans or bends
// individual fingers and places the thumb.

use crate::core_modules::landmark::{
    Finger, LANDMARK_COUNT, Landmark, LandmarkSet, THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

const WRIST_AT: (f64, f64) = (0.50, 0.80);
const THUMB_CMC_AT: (f64, f64) = (0.45, 0.76);
const THUMB_MCP_AT: (f64, f64) = (0.40, 0.72);

type Point = (f64, f64);

fn mcp_at(finger: Finger) -> Point {
    match finger {
        Finger::Index => (0.44, 0.60),
        Finger::Middle => (0.50, 0.60),
        Finger::Ring => (0.56, 0.61),
        Finger::Pinky => (0.61, 0.63),
        Finger::Thumb => THUMB_MCP_AT,
    }
}

/// Shape of one non-thumb finger: PIP, DIP and TIP positions.
#[derive(Debug, Clone, Copy)]
pub enum Chain {
    /// Straight up from the MCP.
    Extended,
    /// PIP raised, tip folded back down next to the MCP.
    Curled,
    /// Straight, leaning `dx` sideways over a length of `len`.
    Fanned { dx: f64, len: f64 },
    /// Curled, with the tip placed explicitly.
    CurledTo(Point),
    Explicit([Point; 3]),
}

impl Chain {
    fn joints(self, (x, y): Point) -> [Point; 3] {
        match self {
            Chain::Extended => [(x, y - 0.08), (x, y - 0.13), (x, y - 0.17)],
            Chain::Curled => [(x, y - 0.06), (x, y - 0.07), (x, y - 0.02)],
            Chain::Fanned { dx, len } => [
                (x + dx * 0.47, y - len * 0.47),
                (x + dx * 0.76, y - len * 0.76),
                (x + dx, y - len),
            ],
            Chain::CurledTo(tip) => [(x, y - 0.06), (x, y - 0.07), tip],
            Chain::Explicit(joints) => joints,
        }
    }
}

pub const fn fanned(dx: f64) -> Chain {
    Chain::Fanned { dx, len: 0.17 }
}

pub struct PoseBuilder {
    points: [Landmark; LANDMARK_COUNT],
}

impl PoseBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            points: [Landmark::default(); LANDMARK_COUNT],
        };
        builder.set(WRIST, WRIST_AT);
        builder.set(THUMB_CMC, THUMB_CMC_AT);
        builder.set(THUMB_MCP, THUMB_MCP_AT);
        for finger in Finger::LONG {
            builder = builder.finger(finger, Chain::Curled);
        }
        builder
    }

    fn set(&mut self, index: usize, (x, y): Point) {
        self.points[index] = Landmark::new(x, y);
    }

    pub fn finger(mut self, finger: Finger, chain: Chain) -> Self {
        let base = finger.chain().0;
        let mcp = mcp_at(finger);
        self.set(base, mcp);
        for (offset, joint) in chain.joints(mcp).into_iter().enumerate() {
            self.set(base + 1 + offset, joint);
        }
        self
    }

    pub fn thumb(mut self, ip: Point, tip: Point) -> Self {
        self.set(THUMB_IP, ip);
        self.set(THUMB_TIP, tip);
        self
    }

    pub fn build(self) -> LandmarkSet {
        LandmarkSet::new(self.points).expect("fixture landmarks are finite")
    }
}

/// Every coordinate multiplied by `k` about the image origin.
pub fn scaled(set: &LandmarkSet, k: f64) -> LandmarkSet {
    let points = set.points().map(|p| Landmark::new(p.x * k, p.y * k));
    LandmarkSet::new(points).expect("scaled landmarks are finite")
}

/// All 21 landmarks on one point.
pub fn collapsed() -> LandmarkSet {
    LandmarkSet::new([Landmark::new(0.3, 0.3); LANDMARK_COUNT]).expect("finite")
}

pub fn index_folded_onto_mcp() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Explicit([(0.44, 0.54), (0.46, 0.57), (0.44, 0.60)]))
        .thumb((0.44, 0.66), (0.50, 0.62))
        .build()
}

/// Every fingertip, thumb included, pressed onto one point above the palm.
pub fn fist() -> LandmarkSet {
    let tip = (0.50, 0.62);
    let mut builder = PoseBuilder::new();
    for finger in Finger::LONG {
        let x = mcp_at(finger).0;
        builder = builder.finger(finger, Chain::Explicit([(x, 0.54), (x * 0.5 + 0.25, 0.56), tip]));
    }
    builder.thumb((0.44, 0.66), tip).build()
}

/// Index extended, the rest curled, thumb resting on the middle finger.
pub fn pointing() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .thumb((0.46, 0.62), (0.49, 0.56))
        .build()
}

/// Index and middle extended with the thumb by the index base. Satisfies
/// both the Ardhapataka and the Kartari Mukham rules.
pub fn two_fingers() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .finger(Finger::Middle, Chain::Extended)
        .thumb((0.50, 0.66), (0.52, 0.60))
        .build()
}

pub fn kartari_mukham() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .finger(Finger::Middle, Chain::Extended)
        .thumb((0.50, 0.64), (0.56, 0.58))
        .build()
}

pub fn pataka() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, fanned(-0.03))
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Ring, fanned(0.02))
        .finger(Finger::Pinky, fanned(0.04))
        .thumb((0.42, 0.68), (0.44, 0.64))
        .build()
}

/// Four straight fingers converging at the tips. Satisfies the Sarpashirsha
/// rule and the Pataka rule.
pub fn sarpashirsha() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, fanned(0.03))
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Ring, fanned(-0.02))
        .finger(Finger::Pinky, fanned(-0.04))
        .thumb((0.42, 0.68), (0.44, 0.64))
        .build()
}

pub fn ardha_chandra() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Ring, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .thumb((0.33, 0.70), (0.26, 0.68))
        .build()
}

pub fn trishula() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Ring, Chain::Extended)
        .thumb((0.50, 0.66), (0.59, 0.62))
        .build()
}

pub fn mayura() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .thumb((0.50, 0.62), (0.555, 0.57))
        .build()
}

pub fn tripataka() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .thumb((0.44, 0.66), (0.46, 0.62))
        .build()
}

pub fn arala() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Ring, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .finger(Finger::Index, Chain::Explicit([(0.44, 0.53), (0.42, 0.50), (0.39, 0.49)]))
        .thumb((0.35, 0.62), (0.37, 0.53))
        .build()
}

pub fn shuka_tundam() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .thumb((0.44, 0.66), (0.46, 0.62))
        .build()
}

/// All fingers curled with the thumb standing clear of them.
pub fn shikharam() -> LandmarkSet {
    PoseBuilder::new().thumb((0.36, 0.66), (0.32, 0.60)).build()
}

pub fn chandrakala() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .thumb((0.34, 0.70), (0.28, 0.69))
        .build()
}

pub fn kapitha() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Explicit([(0.44, 0.50), (0.48, 0.50), (0.50, 0.52)]))
        .finger(Finger::Middle, Chain::Explicit([(0.50, 0.52), (0.52, 0.50), (0.54, 0.50)]))
        .thumb((0.40, 0.60), (0.53, 0.52))
        .build()
}

pub fn katakamukha() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Ring, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .finger(Finger::Index, Chain::Explicit([(0.44, 0.52), (0.47, 0.51), (0.49, 0.53)]))
        .finger(Finger::Middle, Chain::Explicit([(0.50, 0.52), (0.505, 0.51), (0.505, 0.535)]))
        .thumb((0.45, 0.60), (0.495, 0.545))
        .build()
}

pub fn mrigasheersha() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Pinky, Chain::Extended)
        .thumb((0.33, 0.66), (0.27, 0.60))
        .build()
}

pub fn simhamukha() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .thumb((0.44, 0.66), (0.48, 0.60))
        .build()
}

pub fn padmakosha() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::CurledTo((0.47, 0.58)))
        .finger(Finger::Middle, Chain::CurledTo((0.50, 0.58)))
        .finger(Finger::Ring, Chain::CurledTo((0.53, 0.59)))
        .finger(Finger::Pinky, Chain::CurledTo((0.56, 0.60)))
        .thumb((0.36, 0.70), (0.38, 0.66))
        .build()
}

pub fn chatura() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, fanned(0.01))
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Ring, fanned(-0.01))
        .finger(Finger::Pinky, Chain::Extended)
        .thumb((0.45, 0.77), (0.50, 0.70))
        .build()
}

pub fn bhramara() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Ring, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .finger(Finger::Index, Chain::Explicit([(0.44, 0.55), (0.43, 0.57), (0.445, 0.60)]))
        .finger(Finger::Middle, Chain::Explicit([(0.50, 0.53), (0.48, 0.53), (0.47, 0.56)]))
        .thumb((0.42, 0.64), (0.465, 0.57))
        .build()
}

pub fn hamsasya() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Middle, Chain::Extended)
        .finger(Finger::Ring, Chain::Extended)
        .finger(Finger::Pinky, Chain::Extended)
        .finger(Finger::Index, Chain::Explicit([(0.44, 0.53), (0.42, 0.50), (0.39, 0.50)]))
        .thumb((0.43, 0.62), (0.40, 0.56))
        .build()
}

pub fn hamsapaksha() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Pinky, Chain::Fanned { dx: 0.0, len: 0.25 })
        .thumb((0.36, 0.70), (0.38, 0.66))
        .build()
}

pub fn mukula() -> LandmarkSet {
    PoseBuilder::new()
        .finger(Finger::Index, Chain::CurledTo((0.43, 0.58)))
        .thumb((0.36, 0.70), (0.38, 0.66))
        .build()
}
