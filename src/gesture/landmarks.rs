//! Hand landmark data structures.
//!
//! Models the 21-point hand layout reported by 2D landmark trackers:
//! wrist first, then four joints per finger ordered proximal to distal.
//! Joint sequences are validated once at the boundary and are fixed-size
//! arrays from then on.

use std::fmt;

use tracing::warn;

use crate::error::{RefereeError, Result};

// ── Joint definitions ──────────────────────────────────────

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Number of fingers per hand.
pub const FINGER_COUNT: usize = 5;

// ── Finger enum ────────────────────────────────────────────

/// The five fingers, in thumb-to-pinky order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers in state-vector order.
    pub const ALL: [Finger; FINGER_COUNT] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    /// Position in the finger state vector (0-4).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for IPC.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }

    /// Landmark indices of the finger, proximal to distal.
    pub fn joints(&self) -> [usize; 4] {
        match self {
            Self::Thumb => [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
            Self::Index => [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
            Self::Middle => [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
            Self::Ring => [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
            Self::Pinky => [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
        }
    }

    /// Triple whose middle joint is the main bending joint.
    ///
    /// Thumb bends at its MCP (landmark 2), the other fingers at their PIP.
    pub fn primary_triple(&self) -> (usize, usize, usize) {
        let [a, b, c, _] = self.joints();
        (a, b, c)
    }

    /// Primary triple plus the overlapping triple one joint further out.
    pub fn paired_triples(&self) -> [(usize, usize, usize); 2] {
        let [a, b, c, d] = self.joints();
        [(a, b, c), (b, c, d)]
    }
}

// ── Joint position ─────────────────────────────────────────

/// A single tracked joint, normalized to the camera frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointPosition {
    /// Horizontal position, 0.0-1.0 across the frame.
    pub x: f32,
    /// Vertical position, 0.0-1.0 down the frame.
    pub y: f32,
    /// Relative depth; 0.0 for 2D trackers.
    pub z: f32,
}

impl JointPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<(f32, f32)> for JointPosition {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

// ── Hand landmarks ─────────────────────────────────────────

/// A validated 21-point joint sequence for one hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    joints: [JointPosition; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Validate a tracker sequence.
    ///
    /// Fails if the sequence is not exactly 21 joints long or any coordinate
    /// is non-finite. Never pads or truncates.
    pub fn from_slice(joints: &[JointPosition]) -> Result<Self> {
        let joints: [JointPosition; LANDMARK_COUNT] = joints.try_into().map_err(|_| {
            warn!(
                "Hand landmarks: expected {} joints, got {}",
                LANDMARK_COUNT,
                joints.len(),
            );
            RefereeError::wrong_length(joints.len())
        })?;
        Self::new(joints)
    }

    /// Validate a fixed-size array (coordinates only).
    pub fn new(joints: [JointPosition; LANDMARK_COUNT]) -> Result<Self> {
        if let Some(index) = joints.iter().position(|j| !j.is_finite()) {
            warn!("Hand landmarks: joint {} has a non-finite coordinate", index);
            return Err(RefereeError::NonFiniteJoint { index });
        }
        Ok(Self { joints })
    }

    /// Joint at a landmark index (0-20).
    pub fn joint(&self, index: usize) -> &JointPosition {
        &self.joints[index]
    }

    pub fn joints(&self) -> &[JointPosition; LANDMARK_COUNT] {
        &self.joints
    }
}

impl TryFrom<&[JointPosition]> for HandLandmarks {
    type Error = RefereeError;

    fn try_from(joints: &[JointPosition]) -> Result<Self> {
        Self::from_slice(joints)
    }
}

impl TryFrom<Vec<JointPosition>> for HandLandmarks {
    type Error = RefereeError;

    fn try_from(joints: Vec<JointPosition>) -> Result<Self> {
        Self::from_slice(&joints)
    }
}

// ── Finger states ──────────────────────────────────────────

/// Extended (true) / folded (false) flags, thumb to pinky.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FingerStates([bool; FINGER_COUNT]);

impl FingerStates {
    pub const fn new(extended: [bool; FINGER_COUNT]) -> Self {
        Self(extended)
    }

    /// Build from 0/1 values; any non-zero value counts as extended.
    pub const fn from_bits(bits: [u8; FINGER_COUNT]) -> Self {
        Self([bits[0] != 0, bits[1] != 0, bits[2] != 0, bits[3] != 0, bits[4] != 0])
    }

    /// 0 = folded, 1 = extended.
    pub fn bits(&self) -> [u8; FINGER_COUNT] {
        self.0.map(u8::from)
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger.index()]
    }

    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|&&e| e).count()
    }

    /// Number of positions that differ from `other`.
    pub fn hamming_distance(&self, other: &FingerStates) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl fmt::Display for FingerStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.bits();
        write!(f, "[{a},{b},{c},{d},{e}]")
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Synthetic hand with each finger either straight or curled.
///
/// Straight fingers run upward in a near-vertical line; curled fingers
/// hook back toward the palm so both bending joints stay below 80°.
#[cfg(test)]
pub(crate) fn make_hand(extended: [bool; FINGER_COUNT]) -> Vec<JointPosition> {
    let base_x = [0.3f32, 0.4, 0.5, 0.6, 0.7];
    let base_y = 0.8f32;
    let mut joints = vec![JointPosition::new(0.5, 0.9)];
    for (finger, &is_extended) in extended.iter().enumerate() {
        let x = base_x[finger];
        let offsets: [(f32, f32); 4] = if is_extended {
            [(0.0, 0.0), (0.001, -0.15), (0.002, -0.30), (0.003, -0.45)]
        } else {
            [(0.0, 0.0), (0.0, -0.10), (0.05, -0.05), (0.0, -0.02)]
        };
        joints.extend(
            offsets
                .iter()
                .map(|(dx, dy)| JointPosition::new(x + dx, base_y + dy)),
        );
    }
    joints
}

// ── Tests ──────────────────────────────────────────────────
