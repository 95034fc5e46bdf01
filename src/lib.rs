//! # mpa
//!
//! 纯 Rust 实现的 MPEG 音频帧提取器.
//!
//! 从 MP3/MP2/MP1 基本流 (可能夹杂 ID3 标签或损坏数据) 中逐帧读出完整的
//! 压缩帧, 并解析帧头中的版本、层、比特率、采样率、声道模式等字段.
//! 适用于直通、重新封装、时长统计等不需要解码 PCM 的场景.
//!
//! # 快速开始
//!
//! ```rust
//! use mpa::format::{Decoder, Frame, MpaError, make_silence};
//! use std::io::Read;
//!
//! // 三个静音帧
//! let mut decoder = Decoder::new(make_silence().take(417 * 3));
//! let mut frame = Frame::new();
//! let mut count = 0;
//! loop {
//!     match decoder.decode(&mut frame) {
//!         Ok(_) => count += 1,
//!         Err(MpaError::NoSyncFound { .. }) => break,
//!         Err(e) => panic!("{e}"),
//!     }
//! }
//! assert_eq!(count, 3);
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `mpa-core` | 帧头字段解析、查找表与错误类型 |
//! | `mpa-format` | 帧同步器、帧与侧边信息视图、静音源 |

/// 帧头字段解析与查找表
pub use mpa_core as core;

/// 帧同步与帧提取
pub use mpa_format as format;

/// 获取版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
