//! MPEG 音频帧同步器.
//!
//! 从任意字节流中定位帧同步点并读出整帧, 容忍流中夹杂的损坏数据或非音频数据.
//! 每次 [`Decoder::decode`] 都从头执行四个阶段:
//!
//! 1. 搜索同步: 保证缓冲区至少 4 字节并校验帧头; 不合法时丢弃 1 或 2 字节后重试
//! 2. 读取 CRC (帧头声明存在时)
//! 3. 读取侧边信息
//! 4. 读取压缩负载, 使缓冲区长度等于帧头声明的帧大小
//!
//! 每一步只从数据源拉取缺少的字节数, 已校验的字节不会被重新读取或移动.

use std::io::Read;

use log::{debug, trace};
use mpa_core::{FrameHeader, HEADER_LEN, MpaError, MpaResult};

use crate::frame::{CRC_LEN, Frame};
use crate::io::fill_buf;

/// 帧同步器
///
/// 绑定一个阻塞的字节数据源, 不需要 seek. 同一实例不可被多个线程同时使用;
/// 并发处理多个流时每个流使用独立的 `Decoder` 与 [`Frame`].
#[derive(Debug)]
pub struct Decoder<R> {
    /// 字节数据源
    src: R,
}

impl<R: Read> Decoder<R> {
    /// 创建读取 `src` 的同步器
    pub fn new(src: R) -> Self {
        Self { src }
    }

    /// 数据源的引用
    pub fn get_ref(&self) -> &R {
        &self.src
    }

    /// 数据源的可变引用, 直接读取会打乱同步
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.src
    }

    /// 取回数据源
    pub fn into_inner(self) -> R {
        self.src
    }

    /// 读取下一个完整帧到 `frame`
    ///
    /// 覆盖 `frame` 之前的内容. 成功时返回找到该帧之前丢弃的非帧字节数
    /// (第一个候选帧头即合法时为 0).
    ///
    /// # 错误
    /// - [`MpaError::NoSyncFound`]: 搜索同步期间数据源结束, 携带已丢弃字节数
    /// - [`MpaError::PrematureEof`]: 找到合法帧头后, 整帧读完前数据源结束
    /// - [`MpaError::Io`]: 数据源的其他错误
    ///
    /// 失败时 `frame` 为空, 不会暴露不完整的帧.
    pub fn decode(&mut self, frame: &mut Frame) -> MpaResult<usize> {
        frame.buf.clear();
        let result = self.read_frame(&mut frame.buf);
        if result.is_err() {
            frame.buf.clear();
        }
        result
    }

    fn read_frame(&mut self, buf: &mut Vec<u8>) -> MpaResult<usize> {
        let (head, frame_size, skipped) = self.sync(buf)?;
        let header = FrameHeader::new(&head);
        if skipped > 0 {
            debug!("MPA: 跳过 {skipped} 字节后找到帧同步");
        }

        let crc_len = if header.protection() { CRC_LEN } else { 0 };
        if crc_len > 0 {
            self.fill(buf, HEADER_LEN + crc_len, frame_size)?;
        }

        // 低码率 Layer I 的帧大小可能小于帧头 + 侧边信息, 不能越过帧尾读取
        let side_info_len = header.side_info_len()?;
        let head_len = (HEADER_LEN + crc_len + side_info_len).min(frame_size);
        self.fill(buf, head_len, frame_size)?;

        self.fill(buf, frame_size, frame_size)?;

        trace!(
            "MPA: {} {} {}Hz {}bps, {} 字节",
            header.version(),
            header.layer(),
            header.sample_rate().unwrap_or(0),
            header.bit_rate().unwrap_or(0),
            frame_size,
        );
        Ok(skipped)
    }

    /// 搜索同步点
    ///
    /// 返回合法的帧头字节、帧头声明的帧大小与丢弃的字节数. 返回时 `buf` 恰好
    /// 持有这 4 字节帧头.
    fn sync(&mut self, buf: &mut Vec<u8>) -> MpaResult<([u8; HEADER_LEN], usize, usize)> {
        let mut skipped = 0;
        loop {
            if !fill_buf(buf, &mut self.src, HEADER_LEN)? {
                trace!("MPA: 搜索同步时流结束, 已跳过 {skipped} 字节");
                return Err(MpaError::NoSyncFound { skipped });
            }

            let head = [buf[0], buf[1], buf[2], buf[3]];
            if let Some(frame_size) = FrameHeader::new(&head).frame_size() {
                return Ok((head, frame_size, skipped));
            }

            // 第二字节为 0xFF 时它本身可能是下一个同步字的开头
            let discard = if buf[1] == 0xFF { 1 } else { 2 };
            buf.drain(..discard);
            skipped += discard;
        }
    }

    /// 在已找到同步的帧内补齐到 `len` 字节
    fn fill(&mut self, buf: &mut Vec<u8>, len: usize, frame_size: usize) -> MpaResult<()> {
        if fill_buf(buf, &mut self.src, len)? {
            return Ok(());
        }
        trace!("MPA: 帧读取中途流结束, 需要 {len} / {frame_size} 字节");
        Err(MpaError::PrematureEof)
    }
}
