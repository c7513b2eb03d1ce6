//! 链路介质注册表
//!
//! 介质字 ([`MediaWord`]) 沿用 BSD 的位布局：
//!
//! | 位            | 含义                  |
//! |---------------|-----------------------|
//! | `0x0000_001f` | 介质子类型            |
//! | `0x0000_00e0` | 网络类型              |
//! | `0x0fff_ff00` | 选项（全双工等）      |
//! | `0xf000_0000` | 实例号                |

use alloc::vec::Vec;
use core::{fmt, ops::BitOr};

use crate::error::DriverError;

/// 链路介质描述字
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MediaWord(u32);

impl MediaWord {
    /// 网络类型掩码
    pub const NMASK: u32 = 0x0000_00e0;
    /// 子类型掩码
    pub const TMASK: u32 = 0x0000_001f;
    /// 实例号掩码
    pub const IMASK: u32 = 0xf000_0000;

    /// 以太网
    pub const ETHER: MediaWord = MediaWord(0x0000_0020);
    /// 令牌环
    pub const TOKEN: MediaWord = MediaWord(0x0000_0040);
    /// FDDI
    pub const FDDI: MediaWord = MediaWord(0x0000_0060);
    /// IEEE 802.11
    pub const IEEE80211: MediaWord = MediaWord(0x0000_0080);

    /// 自动选择子类型
    pub const AUTO: MediaWord = MediaWord(0);
    /// 无介质
    pub const NONE: MediaWord = MediaWord(2);
    /// 10GBASE-T
    pub const ETHER_10G_T: MediaWord = MediaWord(26);

    /// 全双工
    pub const FDX: MediaWord = MediaWord(0x0010_0000);
    /// 半双工
    pub const HDX: MediaWord = MediaWord(0x0020_0000);

    /// 从原始值构造
    pub const fn from_bits(bits: u32) -> Self {
        MediaWord(bits)
    }

    /// 原始值
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// 网络类型部分
    pub const fn media_type(&self) -> MediaWord {
        MediaWord(self.0 & Self::NMASK)
    }

    /// 子类型部分
    pub const fn subtype(&self) -> MediaWord {
        MediaWord(self.0 & Self::TMASK)
    }

    /// 是否包含全部给定位
    pub const fn contains(&self, other: MediaWord) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MediaWord {
    type Output = MediaWord;

    fn bitor(self, rhs: MediaWord) -> MediaWord {
        MediaWord(self.0 | rhs.0)
    }
}

impl fmt::Debug for MediaWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaWord({:#010x})", self.0)
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// 介质状态位
    pub struct MediaStatus: u32 {
        /// 状态字段有效
        const AVALID = 0x1;
        /// 链路处于活动状态
        const ACTIVE = 0x2;
    }
}

/// 介质查询结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IfMediaReq {
    /// 链路状态
    pub status: MediaStatus,
    /// 当前生效的介质
    pub active: MediaWord,
}

/// 介质注册表
///
/// 保存设备支持的介质列表、当前选中项以及最近一次请求的介质字。
#[derive(Debug, Default)]
pub struct IfMedia {
    mask: u32,
    entries: Vec<MediaWord>,
    current: Option<MediaWord>,
    requested: MediaWord,
}

impl IfMedia {
    /// 创建空注册表
    ///
    /// `dontcare_mask` 中的位在匹配介质时被忽略。
    pub fn new(dontcare_mask: u32) -> Self {
        Self {
            mask: dontcare_mask,
            ..Self::default()
        }
    }

    /// 添加一个支持的介质
    pub fn add(&mut self, word: MediaWord) {
        self.entries.push(word);
    }

    /// 选中一个已注册的介质
    ///
    /// 没有匹配项时返回 [`DriverError::InvalidArgument`]。
    pub fn set(&mut self, word: MediaWord) -> Result<(), DriverError> {
        let found = self.find(word).ok_or(DriverError::InvalidArgument)?;
        self.current = Some(found);
        self.requested = word;
        Ok(())
    }

    /// 在忽略 dontcare 位的前提下查找匹配项
    pub fn find(&self, word: MediaWord) -> Option<MediaWord> {
        let keep = !self.mask;
        self.entries
            .iter()
            .copied()
            .find(|e| e.bits() & keep == word.bits() & keep)
    }

    /// 清空所有介质
    pub fn remove_all(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    /// 当前选中的介质
    pub fn current(&self) -> Option<MediaWord> {
        self.current
    }

    /// 最近一次请求的介质字
    pub fn requested(&self) -> MediaWord {
        self.requested
    }

    /// 记录管理面请求的介质字
    pub fn set_requested(&mut self, word: MediaWord) {
        self.requested = word;
    }

    /// 所有已注册的介质
    pub fn entries(&self) -> &[MediaWord] {
        &self.entries
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
