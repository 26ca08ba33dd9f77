use derive_more::Display;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::params::{
    GAIN_DATA_MODE_PHASE_DUTY_FULL, GAIN_DATA_MODE_PHASE_FULL, GAIN_DATA_MODE_PHASE_HALF,
    TRANS_NUM,
};

use super::{
    flags::{CPUControlFlags, FPGAControlFlags},
    header::Header,
};

const POINT_STM_HEAD_WORDS: usize = 5;
const POINT_STM_BODY_WORDS: usize = 1;

/// The per-transducer table of a frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
pub struct Body([u16; TRANS_NUM]);

/// Encoding of the gain-sequence samples, selected by the head frame of a stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum GainDataMode {
    /// Phase and duty in full resolution, one pattern per frame.
    #[default]
    #[display("PhaseDutyFull")]
    PhaseDutyFull,
    /// Phase only, two patterns per frame in legacy encoding.
    #[display("PhaseFull")]
    PhaseFull,
    /// 4-bit phase only, four patterns per frame. Legacy encoding only.
    #[display("PhaseHalf")]
    PhaseHalf,
    /// An unrecognized mode word.
    #[display("Unknown({:#06X})", _0)]
    Unknown(u16),
}

impl From<u16> for GainDataMode {
    fn from(value: u16) -> Self {
        match value {
            GAIN_DATA_MODE_PHASE_DUTY_FULL => Self::PhaseDutyFull,
            GAIN_DATA_MODE_PHASE_FULL => Self::PhaseFull,
            GAIN_DATA_MODE_PHASE_HALF => Self::PhaseHalf,
            v => Self::Unknown(v),
        }
    }
}

impl From<GainDataMode> for u16 {
    fn from(value: GainDataMode) -> Self {
        match value {
            GainDataMode::PhaseDutyFull => GAIN_DATA_MODE_PHASE_DUTY_FULL,
            GainDataMode::PhaseFull => GAIN_DATA_MODE_PHASE_FULL,
            GainDataMode::PhaseHalf => GAIN_DATA_MODE_PHASE_HALF,
            GainDataMode::Unknown(v) => v,
        }
    }
}

/// The body payload, decoded according to the control flags of the accompanying [`Header`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyPayload<'a> {
    /// The body is not valid for this frame.
    None,
    /// Per-transducer modulation delays.
    ModDelay {
        /// The delays.
        delays: &'a [u16],
    },
    /// Direct drive words.
    Normal {
        /// Whether the words are in legacy encoding.
        legacy: bool,
        /// Whether the words are duties, in raw encoding.
        is_duty: bool,
        /// The drive words.
        data: &'a [u16],
    },
    /// The first frame of a point-sequence.
    PointStmHead {
        /// The number of points in this frame.
        size: u16,
        /// The sampling frequency division.
        freq_div: u32,
        /// The sound speed.
        sound_speed: u32,
        /// The packed points.
        points: &'a [u16],
    },
    /// A continuation frame of a point-sequence.
    PointStmBody {
        /// The number of points in this frame.
        size: u16,
        /// The packed points.
        points: &'a [u16],
    },
    /// The first frame of a gain-sequence.
    GainStmHead {
        /// The sampling frequency division.
        freq_div: u32,
        /// The encoding of the following body frames.
        mode: GainDataMode,
    },
    /// A continuation frame of a gain-sequence.
    GainStmBody {
        /// Whether the samples are in legacy encoding.
        legacy: bool,
        /// Whether the samples are duties, in raw encoding.
        is_duty: bool,
        /// The samples.
        data: &'a [u16],
    },
}

impl Default for Body {
    fn default() -> Self {
        Self([0; TRANS_NUM])
    }
}

impl Body {
    /// Creates a body from the per-transducer words.
    #[must_use]
    pub const fn new(data: [u16; TRANS_NUM]) -> Self {
        Self(data)
    }

    /// Returns the raw words.
    #[must_use]
    pub const fn data(&self) -> &[u16; TRANS_NUM] {
        &self.0
    }

    /// Returns the raw words.
    #[must_use]
    pub fn data_mut(&mut self) -> &mut [u16; TRANS_NUM] {
        &mut self.0
    }

    /// Returns the body read as a transducer cycle table.
    #[must_use]
    pub const fn cycles(&self) -> &[u16; TRANS_NUM] {
        &self.0
    }

    /// Decodes the payload according to `header`.
    #[must_use]
    pub fn payload(&self, header: &Header) -> BodyPayload<'_> {
        let cpu_flag = header.cpu_flag;
        let fpga_flag = header.fpga_flag();
        if !cpu_flag.contains(CPUControlFlags::WRITE_BODY) {
            return BodyPayload::None;
        }
        if cpu_flag.contains(CPUControlFlags::MOD_DELAY) {
            return BodyPayload::ModDelay { delays: &self.0 };
        }

        let legacy = fpga_flag.contains(FPGAControlFlags::LEGACY_MODE);
        let is_duty = cpu_flag.contains(CPUControlFlags::IS_DUTY);
        if !fpga_flag.contains(FPGAControlFlags::OP_MODE) {
            return BodyPayload::Normal {
                legacy,
                is_duty,
                data: &self.0,
            };
        }

        let d = &self.0;
        let begin = cpu_flag.contains(CPUControlFlags::STM_BEGIN);
        match (fpga_flag.contains(FPGAControlFlags::STM_GAIN_MODE), begin) {
            (false, true) => BodyPayload::PointStmHead {
                size: d[0],
                freq_div: Self::u32_at(d, 1),
                sound_speed: Self::u32_at(d, 3),
                points: &d[POINT_STM_HEAD_WORDS..],
            },
            (false, false) => BodyPayload::PointStmBody {
                size: d[0],
                points: &d[POINT_STM_BODY_WORDS..],
            },
            (true, true) => BodyPayload::GainStmHead {
                freq_div: Self::u32_at(d, 0),
                mode: GainDataMode::from(d[2]),
            },
            (true, false) => BodyPayload::GainStmBody {
                legacy,
                is_duty,
                data: &self.0,
            },
        }
    }

    const fn u32_at(d: &[u16; TRANS_NUM], idx: usize) -> u32 {
        d[idx] as u32 | ((d[idx + 1] as u32) << 16)
    }
}
