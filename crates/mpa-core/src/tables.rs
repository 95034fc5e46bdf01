//! MPEG 音频帧头查找表.
//!
//! 所有表都按帧头中的原始位值索引: 第一维是版本 ([`Version`] 的判别值),
//! 第二维是层 ([`Layer`] 的判别值). 保留码对应的行全部为 0.
//!
//! MPEG 2.5 的比特率与每帧采样数和 MPEG 2 完全相同, 原始表中省略,
//! 在常量初始化阶段从 MPEG 2 行复制.

use crate::header::{Layer, Version};

/// 比特率原始表 (kbps), 不含 MPEG 2.5 行
const BITRATES_RAW: [[[u16; 15]; 4]; 4] = [
    // MPEG 2.5: 初始化时从 MPEG 2 复制
    [[0; 15]; 4],
    // 保留版本
    [[0; 15]; 4],
    // MPEG 2
    [
        [0; 15],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160], // Layer III
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160], // Layer II
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256], // Layer I
    ],
    // MPEG 1
    [
        [0; 15],
        [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320], // Layer III
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384], // Layer II
        [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448], // Layer I
    ],
];

/// 每帧采样数原始表, 不含 MPEG 2.5 行
const SAMPLES_PER_FRAME_RAW: [[u16; 4]; 4] = [
    // MPEG 2.5: 初始化时从 MPEG 2 复制
    [0, 0, 0, 0],
    // 保留版本
    [0, 0, 0, 0],
    // MPEG 2: 保留层, Layer III, Layer II, Layer I
    [0, 576, 1152, 384],
    // MPEG 1
    [0, 1152, 1152, 384],
];

/// 比特率表 (kbps), `[版本][层][比特率索引]`
///
/// 索引 0 (free format) 对应 0; 索引 15 是保留码, 不在表内.
pub static BITRATES: [[[u16; 15]; 4]; 4] = {
    let mut table = BITRATES_RAW;
    table[Version::Mpeg25 as usize] = table[Version::Mpeg2 as usize];
    table
};

/// 采样率表 (Hz), `[版本][采样率索引]`, 索引 3 是保留码, 不在表内
pub static SAMPLE_RATES: [[u32; 3]; 4] = [
    [11025, 12000, 8000],  // MPEG 2.5
    [0, 0, 0],             // 保留版本
    [22050, 24000, 16000], // MPEG 2
    [44100, 48000, 32000], // MPEG 1
];

/// 每帧采样数, `[版本][层]`
pub static SAMPLES_PER_FRAME: [[u16; 4]; 4] = {
    let mut table = SAMPLES_PER_FRAME_RAW;
    table[Version::Mpeg25 as usize] = table[Version::Mpeg2 as usize];
    table
};

/// 填充槽字节数, `[层]`: Layer I 为 4 字节, 其余为 1 字节
pub static SLOT_SIZE: [usize; 4] = {
    let mut table = [0usize; 4];
    table[Layer::Layer3 as usize] = 1;
    table[Layer::Layer2 as usize] = 1;
    table[Layer::Layer1 as usize] = 4;
    table
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpeg25_行从_mpeg2_复制() {
        assert_eq!(
            BITRATES[Version::Mpeg25 as usize],
            BITRATES[Version::Mpeg2 as usize]
        );
        assert_eq!(
            SAMPLES_PER_FRAME[Version::Mpeg25 as usize],
            SAMPLES_PER_FRAME[Version::Mpeg2 as usize]
        );
        // 原始表本身保持省略状态
        assert_eq!(BITRATES_RAW[Version::Mpeg25 as usize], [[0; 15]; 4]);
    }

    #[test]
    fn test_保留码行全部为零() {
        assert_eq!(BITRATES[Version::Reserved as usize], [[0; 15]; 4]);
        assert_eq!(SAMPLE_RATES[Version::Reserved as usize], [0; 3]);
        assert_eq!(SAMPLES_PER_FRAME[Version::Reserved as usize], [0; 4]);
        for version in 0..4 {
            assert_eq!(BITRATES[version][Layer::Reserved as usize], [0; 15]);
            assert_eq!(SAMPLES_PER_FRAME[version][Layer::Reserved as usize], 0);
        }
    }

    #[test]
    fn test_常用表项() {
        // MPEG-1 Layer III 索引 9 = 128 kbps
        assert_eq!(
            BITRATES[Version::Mpeg1 as usize][Layer::Layer3 as usize][9],
            128
        );
        // MPEG-2 Layer I 索引 14 = 256 kbps
        assert_eq!(
            BITRATES[Version::Mpeg2 as usize][Layer::Layer1 as usize][14],
            256
        );
        assert_eq!(SAMPLE_RATES[Version::Mpeg1 as usize][0], 44100);
        assert_eq!(SAMPLE_RATES[Version::Mpeg25 as usize][2], 8000);
        assert_eq!(
            SAMPLES_PER_FRAME[Version::Mpeg1 as usize][Layer::Layer3 as usize],
            1152
        );
        assert_eq!(
            SAMPLES_PER_FRAME[Version::Mpeg25 as usize][Layer::Layer3 as usize],
            576
        );
        assert_eq!(SLOT_SIZE, [0, 1, 1, 4]);
    }
}
