//! 数据源读取辅助.
//!
//! 解码器对数据源只要求 [`std::io::Read`]: 阻塞读取, 能报告 EOF 与错误, 不需要 seek.

use std::io::{self, Read};

/// 将 `buf` 补齐到 `len` 字节
///
/// 只从数据源拉取缺少的部分并追加到已有数据之后, 复用 `Vec` 已有容量.
/// 补齐返回 `Ok(true)`; 数据源读到 0 字节 (流结束) 返回 `Ok(false)`.
/// 数据源的错误原样返回, 不按错误类型推断流结束; `Interrupted` 时重试.
/// 未补齐时 `buf` 恢复为调用前的长度.
pub(crate) fn fill_buf<R: Read + ?Sized>(
    buf: &mut Vec<u8>,
    src: &mut R,
    len: usize,
) -> io::Result<bool> {
    let start = buf.len();
    if start >= len {
        return Ok(true);
    }
    buf.resize(len, 0);
    let mut filled = start;
    while filled < len {
        match src.read(&mut buf[filled..]) {
            Ok(0) => {
                buf.truncate(start);
                return Ok(false);
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                buf.truncate(start);
                return Err(e);
            }
        }
    }
    Ok(true)
}
