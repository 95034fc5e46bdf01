//! MPEG 音频帧头字段解码.
//!
//! 帧头结构 (32 位, 大端, 高位在前):
//! ```text
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//! A = 同步位 (11 bit, 全1)   B = MPEG 版本    C = 层
//! D = CRC 保护 (0 = 有 CRC)  E = 比特率索引    F = 采样率索引
//! G = 填充位                H = 私有位        I = 声道模式
//! J = 模式扩展              K = 版权         L = 原始/复制
//! M = 强调
//! ```
//!
//! [`FrameHeader`] 只是 4 字节的只读视图, 所有字段都在访问时从位中解出.

use std::fmt;
use std::time::Duration;

use crate::error::{MpaError, MpaResult};
use crate::tables::{BITRATES, SAMPLE_RATES, SAMPLES_PER_FRAME, SLOT_SIZE};

/// 帧头字节数
pub const HEADER_LEN: usize = 4;

/// MPEG 版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Version {
    /// MPEG-2.5 (非官方扩展)
    Mpeg25 = 0,
    /// 保留
    Reserved = 1,
    /// MPEG-2
    Mpeg2 = 2,
    /// MPEG-1
    Mpeg1 = 3,
}

impl Version {
    /// 从 2 bit 字段构造, 高位被忽略
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Mpeg25,
            1 => Self::Reserved,
            2 => Self::Mpeg2,
            _ => Self::Mpeg1,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mpeg25 => "MPEG 2.5",
            Self::Reserved => "Reserved",
            Self::Mpeg2 => "MPEG 2",
            Self::Mpeg1 => "MPEG 1",
        };
        f.write_str(name)
    }
}

/// MPEG 层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Layer {
    Reserved = 0,
    Layer3 = 1,
    Layer2 = 2,
    Layer1 = 3,
}

impl Layer {
    /// 从 2 bit 字段构造, 高位被忽略
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Reserved,
            1 => Self::Layer3,
            2 => Self::Layer2,
            _ => Self::Layer1,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reserved => "Reserved",
            Self::Layer3 => "Layer III",
            Self::Layer2 => "Layer II",
            Self::Layer1 => "Layer I",
        };
        f.write_str(name)
    }
}

/// 声道模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelMode {
    Stereo = 0,
    JointStereo = 1,
    DualChannel = 2,
    SingleChannel = 3,
}

impl ChannelMode {
    /// 从 2 bit 字段构造, 高位被忽略
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Stereo,
            1 => Self::JointStereo,
            2 => Self::DualChannel,
            _ => Self::SingleChannel,
        }
    }
}

impl TryFrom<u8> for ChannelMode {
    type Error = MpaError;

    fn try_from(value: u8) -> MpaResult<Self> {
        if value > 0x03 {
            return Err(MpaError::InvalidChannelMode(value));
        }
        Ok(Self::from_bits(value))
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stereo => "Stereo",
            Self::JointStereo => "Joint Stereo",
            Self::DualChannel => "Dual Channel",
            Self::SingleChannel => "Single Channel",
        };
        f.write_str(name)
    }
}

/// 去加重方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Emphasis {
    None = 0,
    /// 50/15 微秒
    Ms5015 = 1,
    Reserved = 2,
    /// CCITT J.17
    CcittJ17 = 3,
}

impl Emphasis {
    /// 从 2 bit 字段构造, 高位被忽略
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::None,
            1 => Self::Ms5015,
            2 => Self::Reserved,
            _ => Self::CcittJ17,
        }
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Ms5015 => "50/15 ms",
            Self::Reserved => "Reserved",
            Self::CcittJ17 => "CCITT J.17",
        };
        f.write_str(name)
    }
}

/// MPEG 音频帧头
///
/// 借用自帧缓冲区的 4 字节视图, 不单独分配. 所有访问器都是这 4 字节的纯函数,
/// 对非法帧头同样可以调用; 比特率与采样率在保留码下返回 `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader<'a> {
    bytes: &'a [u8; HEADER_LEN],
}

impl<'a> FrameHeader<'a> {
    /// 包装 4 字节帧头
    pub const fn new(bytes: &'a [u8; HEADER_LEN]) -> Self {
        Self { bytes }
    }

    /// 取切片的前 4 字节作为帧头, 不足 4 字节时返回 `None`
    pub fn from_slice(data: &'a [u8]) -> Option<Self> {
        data.first_chunk::<HEADER_LEN>().map(Self::new)
    }

    /// 原始帧头字节
    pub const fn as_bytes(&self) -> &'a [u8; HEADER_LEN] {
        self.bytes
    }

    /// 是否以 11 bit 同步字开头
    pub const fn has_sync(&self) -> bool {
        self.bytes[0] == 0xFF && (self.bytes[1] & 0xE0) == 0xE0
    }

    /// MPEG 版本 (byte1 第 3-4 位)
    pub const fn version(&self) -> Version {
        Version::from_bits(self.bytes[1] >> 3)
    }

    /// 层 (byte1 第 1-2 位)
    pub const fn layer(&self) -> Layer {
        Layer::from_bits(self.bytes[1] >> 1)
    }

    /// 帧头后是否紧跟 16 bit CRC (保护位为 0 时存在)
    pub const fn protection(&self) -> bool {
        (self.bytes[1] & 0x01) == 0
    }

    /// 比特率 (bps)
    ///
    /// 索引 `0b1111` 或表项为 0 (free format, 保留版本/层) 时返回 `None`.
    pub fn bit_rate(&self) -> Option<u32> {
        let index = (self.bytes[2] >> 4) & 0x0F;
        if index == 0x0F {
            return None;
        }
        let kbps = BITRATES[self.version() as usize][self.layer() as usize][usize::from(index)];
        if kbps == 0 {
            return None;
        }
        Some(u32::from(kbps) * 1000)
    }

    /// 采样率 (Hz)
    ///
    /// 索引 `0b11` 或保留版本时返回 `None`.
    pub fn sample_rate(&self) -> Option<u32> {
        let index = (self.bytes[2] >> 2) & 0x03;
        if index == 0x03 {
            return None;
        }
        match SAMPLE_RATES[self.version() as usize][usize::from(index)] {
            0 => None,
            rate => Some(rate),
        }
    }

    /// 填充位: 本帧额外包含一个填充槽
    pub const fn pad(&self) -> bool {
        (self.bytes[2] & 0x02) != 0
    }

    /// 私有位, 供应用自定义
    pub const fn private(&self) -> bool {
        (self.bytes[2] & 0x01) != 0
    }

    /// 声道模式 (byte3 高 2 位)
    pub const fn channel_mode(&self) -> ChannelMode {
        ChannelMode::from_bits(self.bytes[3] >> 6)
    }

    /// 模式扩展 (仅联合立体声有意义), 原始 2 bit 值
    pub const fn mode_extension(&self) -> u8 {
        (self.bytes[3] >> 4) & 0x03
    }

    /// 版权位
    pub const fn copy_right(&self) -> bool {
        (self.bytes[3] & 0x08) != 0
    }

    /// 原版位: 0 表示拷贝
    pub const fn original(&self) -> bool {
        (self.bytes[3] & 0x04) != 0
    }

    /// 去加重方式
    pub const fn emphasis(&self) -> Emphasis {
        Emphasis::from_bits(self.bytes[3])
    }

    /// 是否为可以作为同步点的合法帧头
    pub fn is_valid(&self) -> bool {
        self.has_sync()
            && self.emphasis() != Emphasis::Reserved
            && self.layer() != Layer::Reserved
            && self.version() != Version::Reserved
            && self.sample_rate().is_some()
            && self.bit_rate().is_some()
    }

    /// 侧边信息字节数
    pub fn side_info_len(&self) -> MpaResult<usize> {
        let mono = self.channel_mode() == ChannelMode::SingleChannel;
        match self.version() {
            Version::Mpeg1 => Ok(if mono { 17 } else { 32 }),
            Version::Mpeg2 | Version::Mpeg25 => Ok(if mono { 9 } else { 17 }),
            version => Err(MpaError::InvalidVersionForSideInfo(version)),
        }
    }

    /// 每帧采样数, 保留版本/层为 0
    pub fn samples(&self) -> usize {
        usize::from(SAMPLES_PER_FRAME[self.version() as usize][self.layer() as usize])
    }

    /// 帧总字节数 (含帧头), 非法帧头返回 `None`
    ///
    /// `size = trunc(samples / 8 * bitrate / samplerate)`, 有填充位时再加一个填充槽.
    pub fn frame_size(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let bit_rate = f64::from(self.bit_rate()?);
        let sample_rate = f64::from(self.sample_rate()?);
        let bytes_per_sample = self.samples() as f64 / 8.0;
        let mut size = (bytes_per_sample * bit_rate) / sample_rate;
        if self.pad() {
            size += SLOT_SIZE[self.layer() as usize] as f64;
        }
        Some(size as usize)
    }

    /// 帧时长, 非法帧头返回 `None`
    ///
    /// 先按浮点算出毫秒数, 截断到整毫秒后再转换.
    pub fn duration(&self) -> Option<Duration> {
        if !self.is_valid() {
            return None;
        }
        let sample_rate = f64::from(self.sample_rate()?);
        let ms = (1000.0 / sample_rate) * self.samples() as f64;
        Some(Duration::from_millis(ms as u64))
    }
}

fn write_opt(f: &mut fmt::Formatter<'_>, value: Option<u32>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v}"),
        None => f.write_str("invalid"),
    }
}

impl fmt::Display for FrameHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Layer: {}", self.layer())?;
        writeln!(f, " Version: {}", self.version())?;
        writeln!(f, " Protection: {}", self.protection())?;
        f.write_str(" BitRate: ")?;
        write_opt(f, self.bit_rate())?;
        f.write_str("\n SampleRate: ")?;
        write_opt(f, self.sample_rate())?;
        writeln!(f)?;
        writeln!(f, " Pad: {}", self.pad())?;
        writeln!(f, " Private: {}", self.private())?;
        writeln!(f, " ChannelMode: {}", self.channel_mode())?;
        writeln!(f, " CopyRight: {}", self.copy_right())?;
        writeln!(f, " Original: {}", self.original())?;
        writeln!(f, " Emphasis: {}", self.emphasis())
    }
}
