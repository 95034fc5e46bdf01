//! # mpa-core
//!
//! MPEG 音频帧解析核心库, 提供错误类型、帧头查找表和帧头字段解码.
//!
//! 本 crate 只处理固定 4 字节的帧头视图, 不做任何 I/O.
//! 同步搜索与整帧读取见 `mpa-format`.

pub mod error;
pub mod header;
pub mod tables;

// 重导出常用类型
pub use error::{MpaError, MpaResult};
pub use header::{ChannelMode, Emphasis, FrameHeader, HEADER_LEN, Layer, Version};
