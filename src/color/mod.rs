//! Colorimetry tables for the YIQ color model

/// Chroma translation offset added to the raw I component before scaling
pub(crate) const I_OFFSET: f32 = 0.5957;
/// Chroma translation offset added to the raw Q component before scaling
pub(crate) const Q_OFFSET: f32 = 0.5226;

/// Upper bound of the stored Y channel, inclusive
pub(crate) const Y_MAX: u8 = 100;
/// Upper bound of the stored I channel, inclusive
pub(crate) const I_MAX: u8 = 119;
/// Upper bound of the stored Q channel, inclusive
pub(crate) const Q_MAX: u8 = 105;

pub(crate) mod mat_idxs {
    pub(crate) const Y: usize = 0;
    pub(crate) const I: usize = 1;
    pub(crate) const Q: usize = 2;

    pub(crate) const R: usize = 0;
    pub(crate) const G: usize = 1;
    pub(crate) const B: usize = 2;
}

/// Colorimetry standard the YIQ components are derived with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorimetryMethod {
    /// Original FCC NTSC standard from 1953
    NTSC1953,

    /// SMPTE C (1987 revision with updated phosphors)
    SMPTEC,
}

impl ColorimetryMethod {
    /// Weights applied to (R, G, B), one row per output component (Y, I, Q)
    pub fn rgb_to_yiq_mat(self) -> &'static [[f32; 3]; 3] {
        match self {
            ColorimetryMethod::NTSC1953 => &consts::NTSC1953_RGB_TO_YIQ,
            ColorimetryMethod::SMPTEC => &consts::SMPTEC_RGB_TO_YIQ,
        }
    }

    /// Weights applied to (Y, I, Q), one row per output component (R, G, B)
    pub fn yiq_to_rgb_mat(self) -> &'static [[f32; 3]; 3] {
        match self {
            ColorimetryMethod::NTSC1953 => &consts::NTSC1953_YIQ_TO_RGB,
            ColorimetryMethod::SMPTEC => &consts::SMPTEC_YIQ_TO_RGB,
        }
    }

    /// Single byte identifying the method in the container header
    pub fn tag(self) -> u8 {
        match self {
            ColorimetryMethod::NTSC1953 => 0,
            ColorimetryMethod::SMPTEC => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ColorimetryMethod::NTSC1953),
            1 => Some(ColorimetryMethod::SMPTEC),
            _ => None,
        }
    }
}

mod consts {
    pub(super) const NTSC1953_RGB_TO_YIQ: [[f32; 3]; 3] = [
        [0.30, 0.59, 0.11],
        [0.599, -0.2773, -0.3217],
        [0.213, -0.5251, 0.3121],
    ];
    pub(super) const NTSC1953_YIQ_TO_RGB: [[f32; 3]; 3] = [
        [1.0, 0.94688222, 0.62355658],
        [1.0, -0.27478765, -0.63569108],
        [1.0, -1.10854503, 1.70900693],
    ];

    pub(super) const SMPTEC_RGB_TO_YIQ: [[f32; 3]; 3] = [
        [0.2989, 0.5870, 0.1140],
        [0.5959, -0.2746, -0.3213],
        [0.2115, -0.5227, 0.3112],
    ];
    pub(super) const SMPTEC_YIQ_TO_RGB: [[f32; 3]; 3] = [
        [1.00010001, 0.95614584, 0.62081702],
        [1.00010001, -0.27195673, -0.64714363],
        [1.00010001, -1.10660870, 1.70448337],
    ];
}
