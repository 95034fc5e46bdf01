//! MPEG 音频帧与侧边信息视图.
//!
//! 帧布局:
//! ```text
//! [帧头 4 字节][CRC 2 字节 (可选)][侧边信息 9/17/32 字节][压缩负载]
//! ```

use std::fmt;
use std::io::Cursor;
use std::time::Duration;

use byteorder::{BigEndian, ReadBytesExt};
use bytes::Bytes;
use mpa_core::{FrameHeader, HEADER_LEN, MpaResult, Version};

/// CRC 字节数
pub const CRC_LEN: usize = 2;

/// 未解码帧使用的帧头, 全零, 永远不合法
static EMPTY_HEADER: [u8; HEADER_LEN] = [0; HEADER_LEN];

/// 一个完整的 MPEG 音频帧
///
/// 持有可增长的字节缓冲区, 在多次 [`Decoder::decode`](crate::Decoder::decode)
/// 调用之间复用以避免重复分配. 每次解码都会覆盖之前的内容; 解码成功后
/// 缓冲区长度等于帧头声明的帧大小, 解码失败后缓冲区为空.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// 帧数据, 前 4 字节为帧头
    pub(crate) buf: Vec<u8>,
}

impl Frame {
    /// 创建空帧
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建预分配缓冲区的空帧
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// 由已知合法的帧字节构造
    pub(crate) fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf }
    }

    /// 帧头视图
    ///
    /// 未成功解码的帧返回全零帧头, 其 `is_valid()` 为 `false`.
    pub fn header(&self) -> FrameHeader<'_> {
        FrameHeader::new(self.buf.first_chunk().unwrap_or(&EMPTY_HEADER))
    }

    /// CRC 字节数 (0 或 2)
    pub fn crc_len(&self) -> usize {
        if self.header().protection() {
            CRC_LEN
        } else {
            0
        }
    }

    /// 帧头后的 16 bit CRC (大端)
    ///
    /// 帧头未声明 CRC 时返回 0; 缓冲区不足以容纳 CRC 时返回 I/O 错误.
    pub fn crc(&self) -> MpaResult<u16> {
        if !self.header().protection() {
            return Ok(0);
        }
        let mut rest = self.buf.get(HEADER_LEN..).unwrap_or_default();
        Ok(rest.read_u16::<BigEndian>()?)
    }

    /// 侧边信息字节数
    pub fn side_info_len(&self) -> MpaResult<usize> {
        self.header().side_info_len()
    }

    /// 侧边信息视图
    ///
    /// 帧大小小于帧头声明的侧边信息长度时 (低码率 Layer I), 视图截断到帧尾.
    pub fn side_info(&self) -> FrameSideInfo<'_> {
        let start = (HEADER_LEN + self.crc_len()).min(self.buf.len());
        let len = self.side_info_len().unwrap_or(0);
        let end = (start + len).min(self.buf.len());
        FrameSideInfo::new(&self.buf[start..end], self.header().version())
    }

    /// 每帧采样数
    pub fn samples(&self) -> usize {
        self.header().samples()
    }

    /// 帧头声明的帧大小 (字节), 未解码帧为 0
    pub fn size(&self) -> usize {
        self.header().frame_size().unwrap_or(0)
    }

    /// 帧时长 (截断到整毫秒), 未解码帧为 0
    pub fn duration(&self) -> Duration {
        self.header().duration().unwrap_or_default()
    }

    /// 实际持有的字节数
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// 完整的原始帧字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// 按字节读取整帧, 用于直通或重新封装
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.buf.as_slice())
    }

    /// 复制整帧为 [`Bytes`], 可脱离本帧的生命周期传递给封装器
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Header: \n{}", self.header())?;
        write!(f, "SideInfo: \n{}", self.side_info())?;
        match self.crc() {
            Ok(crc) => writeln!(f, "CRC: {crc:x}")?,
            Err(e) => writeln!(f, "CRC: 读取失败 ({e})")?,
        }
        writeln!(f, "Samples: {}", self.samples())?;
        writeln!(f, "Size: {}", self.size())?;
        writeln!(f, "Duration: {:?}", self.duration())
    }
}

/// 侧边信息视图
///
/// 紧随帧头 (及 CRC) 之后的只读字节, 长度由版本与声道模式决定.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSideInfo<'a> {
    bytes: &'a [u8],
    version: Version,
}

impl<'a> FrameSideInfo<'a> {
    /// 包装侧边信息字节, `version` 决定字段宽度
    pub fn new(bytes: &'a [u8], version: Version) -> Self {
        Self { bytes, version }
    }

    /// 原始侧边信息字节
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// 侧边信息字节数, 帧被截断时可能小于帧头声明的长度
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// main_data_begin: 本帧主数据从同步字向前回溯的字节数 (位存储器)
    ///
    /// MPEG-1 为 9 bit, MPEG-2/2.5 为 8 bit. 0 表示主数据紧跟侧边信息.
    pub fn main_data_begin(&self) -> u16 {
        match (self.version, self.bytes) {
            (Version::Mpeg1, [b0, b1, ..]) => (u16::from(*b0) << 1) | u16::from(*b1 >> 7),
            (Version::Mpeg1, _) => 0,
            (_, [b0, ..]) => u16::from(*b0),
            _ => 0,
        }
    }
}

impl fmt::Display for FrameSideInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " MainDataBegin: {}", self.main_data_begin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(header: [u8; 4], len: usize) -> Frame {
        let mut buf = vec![0u8; len];
        buf[..4].copy_from_slice(&header);
        Frame::from_vec(buf)
    }

    #[test]
    fn test_空帧访问器不会_panic() {
        let frame = Frame::new();
        assert!(frame.is_empty());
        assert!(!frame.header().is_valid());
        assert_eq!(frame.size(), 0);
        assert_eq!(frame.duration(), Duration::ZERO);
        assert!(frame.side_info().is_empty());
        // 全零帧头的保护位为 0, 声明了 CRC 但缓冲区为空
        assert!(frame.crc().is_err());
        assert!(frame.to_string().contains("CRC: 读取失败"));
    }

    #[test]
    fn test_crc_与侧边信息位置() {
        let mut frame = frame_with([0xFF, 0xFA, 0x90, 0x04], 417);
        frame.buf[4] = 0xAB;
        frame.buf[5] = 0xCD;
        frame.buf[6] = 0x80;
        frame.buf[7] = 0x80;
        assert_eq!(frame.crc_len(), 2);
        assert_eq!(frame.crc().unwrap(), 0xABCD);

        let side = frame.side_info();
        assert_eq!(side.len(), 32);
        assert_eq!(side.as_bytes()[0], 0x80);
        // 9 bit: 1000_0000 1
        assert_eq!(side.main_data_begin(), 257);
    }

    #[test]
    fn test_无_crc_时返回零() {
        let mut frame = frame_with([0xFF, 0xFB, 0x90, 0x04], 417);
        frame.buf[4] = 0x12;
        assert_eq!(frame.crc_len(), 0);
        assert_eq!(frame.crc().unwrap(), 0);
        assert_eq!(frame.side_info().as_bytes()[0], 0x12);
    }

    #[test]
    fn test_mpeg2_main_data_begin_为_8_bit() {
        let mut frame = frame_with([0xFF, 0xF3, 0x80, 0xC0], 208);
        frame.buf[4] = 0xC8;
        frame.buf[5] = 0xFF;
        let side = frame.side_info();
        assert_eq!(side.len(), 9);
        assert_eq!(side.main_data_begin(), 0xC8);
    }

    #[test]
    fn test_侧边信息截断到帧尾() {
        // MPEG-1 Layer I 32 kbps 48000 Hz 立体声, 帧大小 32 小于 4 + 32
        let frame = frame_with([0xFF, 0xFF, 0x14, 0x00], 32);
        assert_eq!(frame.size(), 32);
        assert_eq!(frame.side_info_len().unwrap(), 32);
        assert_eq!(frame.side_info().len(), 28);
    }

    #[test]
    fn test_原始字节访问() {
        use std::io::Read;

        let frame = frame_with([0xFF, 0xFB, 0x90, 0x04], 417);
        assert_eq!(frame.len(), 417);
        let raw: &[u8] = frame.as_ref();
        assert_eq!(raw, frame.as_bytes());

        let mut copied = Vec::new();
        frame.reader().read_to_end(&mut copied).unwrap();
        assert_eq!(copied, frame.as_bytes());

        let bytes = frame.to_bytes();
        assert_eq!(&bytes[..], frame.as_bytes());
    }

    #[test]
    fn test_display_输出() {
        let frame = frame_with([0xFF, 0xFB, 0x90, 0x04], 417);
        let text = frame.to_string();
        assert!(text.starts_with("Header: \n Layer: Layer III\n"));
        assert!(text.contains("SideInfo: \n MainDataBegin: 0\n"));
        assert!(text.contains("CRC: 0\n"));
        assert!(text.contains("Samples: 1152\n"));
        assert!(text.contains("Size: 417\n"));
        assert!(text.contains("Duration: 26ms\n"));
    }
}
