//! 网络接口框架
//!
//! 提供接口对象、网络栈接口和链路介质注册表

mod ether;
mod ifnet;
mod media;

pub use ether::{NetStack, ether_ifattach, ether_ifdetach};
pub use ifnet::{
    ETHER_ADDR_LEN, ETHER_HDR_LEN, ETHER_VLAN_ENCAP_LEN, ETHER_VLAN_HDR_LEN, ETHERMTU, IFNAMSIZ,
    IfCapabilities, IfFlags, IfNet, IfType, IfnetOps, SendQueue, if_gbps,
};
pub use media::{IfMedia, IfMediaReq, MediaStatus, MediaWord};

/// 格式化MAC地址为可读字符串
pub fn format_mac_address(mac: [u8; 6]) -> alloc::string::String {
    use alloc::format;
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}
