//! 链路介质协商
//!
//! ptnet 只有一种介质：以太网 10GBASE-T 全双工。

use device::{DriverError, IfMedia, IfMediaReq, MediaStatus, MediaWord};

/// 唯一支持的介质
pub const PTNET_MEDIA: MediaWord = MediaWord::from_bits(
    MediaWord::ETHER.bits() | MediaWord::ETHER_10G_T.bits() | MediaWord::FDX.bits(),
);

/// 创建介质注册表，登记并选中默认介质
pub fn media_init() -> Result<IfMedia, DriverError> {
    let mut media = IfMedia::new(MediaWord::IMASK);
    media.add(PTNET_MEDIA);
    media.set(PTNET_MEDIA)?;
    Ok(media)
}

/// 处理介质切换请求
///
/// 只检查网络类型是否为以太网；只有一种介质，无需进一步协商。
pub fn media_change(media: &mut IfMedia, requested: MediaWord) -> Result<(), DriverError> {
    if requested.media_type() != MediaWord::ETHER {
        return Err(DriverError::InvalidArgument);
    }

    media.set_requested(requested);
    Ok(())
}

/// 填充介质状态
///
/// `link_up` 来自数据通路；当前的空实现总是报告链路已连接。
pub fn media_status(link_up: bool, req: &mut IfMediaReq) {
    req.status = MediaStatus::AVALID;
    req.active = MediaWord::ETHER;

    if link_up {
        req.status |= MediaStatus::ACTIVE;
        req.active = req.active | MediaWord::ETHER_10G_T | MediaWord::FDX;
    } else {
        req.active = req.active | MediaWord::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_init_selects_default() {
        let media = media_init().unwrap();
        assert_eq!(media.entries(), &[PTNET_MEDIA]);
        assert_eq!(media.current(), Some(PTNET_MEDIA));
    }

    #[test]
    fn test_media_status_link_down() {
        let mut req = IfMediaReq::default();
        media_status(false, &mut req);
        assert_eq!(req.status, MediaStatus::AVALID);
        assert_eq!(req.active, MediaWord::ETHER | MediaWord::NONE);
    }
}
