//! 统一错误类型定义.
//!
//! 所有 mpa crate 共用的错误类型, 区分"找不到同步"、"帧读到一半流结束"
//! 与底层数据源的 I/O 错误.

use thiserror::Error;

use crate::header::Version;

/// MPEG 音频帧解析错误
#[derive(Debug, Error)]
pub enum MpaError {
    /// 搜索帧同步字期间数据源结束, 未产生任何帧
    #[error("流结束前未找到帧同步字 (已跳过 {skipped} 字节)")]
    NoSyncFound {
        /// 放弃前已丢弃的非帧字节数
        skipped: usize,
    },

    /// 已找到合法帧头, 但 CRC/侧边信息/负载读取完整前数据源结束
    #[error("帧数据不完整, 流提前结束")]
    PrematureEof,

    /// 数据源 I/O 错误 (原样透传)
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 声道模式取值超出 2 bit 范围
    #[error("无效声道模式: {0}")]
    InvalidChannelMode(u8),

    /// 该 MPEG 版本没有定义侧边信息长度
    #[error("无法计算侧边信息长度, MPEG 版本无效: {0}")]
    InvalidVersionForSideInfo(Version),
}

/// mpa 统一 Result 类型
pub type MpaResult<T> = Result<T, MpaError>;
