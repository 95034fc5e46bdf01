//! # mpa-format
//!
//! MPEG 音频基本流的帧提取层: 在任意字节流中定位帧同步点, 按帧头算出整帧长度,
//! 读出包含帧头、可选 CRC、侧边信息与压缩负载的完整帧. 不解码音频样本.
//!
//! ```rust,no_run
//! use mpa_format::{Decoder, Frame};
//!
//! let file = std::fs::File::open("song.mp3").unwrap();
//! let mut decoder = Decoder::new(std::io::BufReader::new(file));
//! let mut frame = Frame::new();
//! while let Ok(skipped) = decoder.decode(&mut frame) {
//!     println!("跳过 {skipped} 字节\n{frame}");
//! }
//! ```

pub mod decoder;
pub mod frame;
mod io;
pub mod silence;

// 重导出常用类型
pub use decoder::Decoder;
pub use frame::{CRC_LEN, Frame, FrameSideInfo};
pub use mpa_core::{MpaError, MpaResult};
pub use silence::{SILENT_FRAME, SILENT_FRAME_LEN, SilenceReader, make_silence, silent_frame};
