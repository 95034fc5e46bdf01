//! 静音帧数据源.
//!
//! 提供一个 MPEG-1 Layer III 128 kbps 44100 Hz 立体声的静音帧, 以及无限重复
//! 该帧的字节流. 帧内除帧头外全部为 0, 即 main_data_begin 为 0 且所有
//! 粒度的 part2_3_length 为 0, 解码器会为其输出静音.

use std::io::{self, Read};

use crate::frame::Frame;

/// 静音帧字节数
pub const SILENT_FRAME_LEN: usize = 417;

/// 静音帧帧头: MPEG-1 Layer III, 无 CRC, 128 kbps, 44100 Hz, 无填充, 立体声, 原版
const SILENT_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x04];

/// 完整的静音帧 (帧头 + 零侧边信息 + 零负载)
pub static SILENT_FRAME: [u8; SILENT_FRAME_LEN] = {
    let mut frame = [0u8; SILENT_FRAME_LEN];
    let mut i = 0;
    while i < SILENT_HEADER.len() {
        frame[i] = SILENT_HEADER[i];
        i += 1;
    }
    frame
};

/// 无限重复 [`SILENT_FRAME`] 的字节流
///
/// 每次读取尽量填满目标缓冲区, 永远不会返回 0 (目标缓冲区为空时除外).
#[derive(Debug, Clone, Default)]
pub struct SilenceReader {
    /// 当前在静音帧内的偏移
    pos: usize,
}

impl SilenceReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Read for SilenceReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            let chunk = &SILENT_FRAME[self.pos..];
            let n = chunk.len().min(buf.len() - written);
            buf[written..written + n].copy_from_slice(&chunk[..n]);
            written += n;
            self.pos = (self.pos + n) % SILENT_FRAME_LEN;
        }
        Ok(written)
    }
}

/// 创建无限静音帧字节流
pub fn make_silence() -> SilenceReader {
    SilenceReader::new()
}

/// 返回一个已解码的静音帧
pub fn silent_frame() -> Frame {
    Frame::from_vec(SILENT_FRAME.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpa_core::{ChannelMode, FrameHeader, Layer, Version};

    #[test]
    fn test_静音帧帧头() {
        let header = FrameHeader::from_slice(&SILENT_FRAME).unwrap();
        assert!(header.is_valid());
        assert_eq!(header.version(), Version::Mpeg1);
        assert_eq!(header.layer(), Layer::Layer3);
        assert_eq!(header.channel_mode(), ChannelMode::Stereo);
        assert_eq!(header.frame_size(), Some(SILENT_FRAME_LEN));
        assert!(SILENT_FRAME[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_静音流跨帧边界() {
        let mut reader = make_silence();
        let mut buf = vec![0u8; SILENT_FRAME_LEN + 10];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf[..SILENT_FRAME_LEN], &SILENT_FRAME[..]);
        assert_eq!(&buf[SILENT_FRAME_LEN..SILENT_FRAME_LEN + 4], &SILENT_HEADER);

        // 继续读取从第二帧的偏移 10 开始
        let mut rest = vec![0u8; SILENT_FRAME_LEN - 10];
        reader.read_exact(&mut rest).unwrap();
        assert_eq!(&rest[..], &SILENT_FRAME[10..]);
        let mut next = [0u8; 4];
        reader.read_exact(&mut next).unwrap();
        assert_eq!(next, SILENT_HEADER);
    }

    #[test]
    fn test_静音帧对象() {
        let frame = silent_frame();
        assert_eq!(frame.len(), SILENT_FRAME_LEN);
        assert_eq!(frame.size(), SILENT_FRAME_LEN);
        assert_eq!(frame.samples(), 1152);
        assert_eq!(frame.side_info().main_data_begin(), 0);
    }
}
