use alloc::string::String;
use alloc::vec;

use device::net::{ETHERMTU, ETHER_VLAN_HDR_LEN};
use device::{BusDevice, DeviceMethods, DriverError, IfCapabilities, IfFlags, IfType};
use test_support::mock::net::NetEvent;

use super::*;
use crate::PtnetState;

#[test]
fn test_attach_creates_interface() {
    let fx = fixture();
    let sc = attach(&fx, 0);

    assert_eq!(sc.state(), PtnetState::Attached);
    let ifp = sc.ifnet().expect("no ifnet after attach");
    assert_eq!(ifp.name(), "ptnet0");
    assert_eq!(ifp.if_type(), IfType::Ether);
    assert_eq!(ifp.baudrate, 10_000_000_000);
    assert_eq!(
        ifp.flags,
        IfFlags::BROADCAST | IfFlags::MULTICAST | IfFlags::SIMPLEX
    );
    assert!(
        ifp.capabilities
            .contains(IfCapabilities::JUMBO_MTU | IfCapabilities::VLAN_MTU)
    );
    assert_eq!(ifp.capenable, ifp.capabilities);
    assert_eq!(ifp.hdrlen, ETHER_VLAN_HDR_LEN);
    assert_eq!(ifp.mtu, ETHERMTU);
    assert_eq!(ifp.lladdr(), [0; 6]);
    assert_eq!(sc.hwaddr(), [0; 6]);
    assert!(ifp.is_published());
    assert!(ifp.has_ops());
    assert_eq!(ifp.snd.maxlen, 255);
    assert_eq!(ifp.snd.drv_maxlen, 255);
    assert!(ifp.snd.ready);

    assert_eq!(fx.stack.registered(), vec![String::from("ptnet0")]);
}

#[test]
fn test_attach_names_lock_after_device() {
    let fx = fixture();
    let sc = attach(&fx, 3);

    assert_eq!(sc.ifnet().unwrap().name(), "ptnet3");
    assert_eq!(sc.core().unwrap().lock_name(), "ptnet3");
    assert_eq!(sc.dev().unwrap().nameunit(), "ptnet3");
    assert!(sc.is_lock_initialized());
}

#[test]
fn test_attach_then_detach_leaves_nothing() {
    let fx = fixture();
    let mut sc = attach(&fx, 0);
    let core = sc.core_weak();
    assert!(core.upgrade().is_some());

    assert_eq!(fx.driver.detach(&mut sc), Ok(()));

    assert_eq!(sc.state(), PtnetState::Detached);
    assert!(sc.ifnet().is_none());
    assert!(sc.dev().is_none());
    assert!(!sc.is_lock_initialized());
    assert!(core.upgrade().is_none());
    assert_eq!(fx.stack.live_interfaces(), 0);
    assert!(fx.stack.registered().is_empty());
    assert_eq!(
        fx.stack.events(),
        vec![
            NetEvent::Alloc,
            NetEvent::Attach(String::from("ptnet0")),
            NetEvent::Detach(String::from("ptnet0")),
            NetEvent::Free(String::from("ptnet0")),
        ]
    );
}

#[test]
fn test_attach_allocation_failure() {
    let fx = fixture();
    fx.stack.fail_next_alloc();

    let mut sc = PtnetSoftc::default();
    assert_eq!(
        fx.driver.attach(&mut sc, ptnet_device(0)),
        Err(DriverError::ResourceExhausted)
    );
    assert_eq!(DriverError::ResourceExhausted.to_errno(), -12);

    // 失败路径不遗留接口和核心锁
    assert_eq!(sc.state(), PtnetState::Uninitialized);
    assert!(sc.ifnet().is_none());
    assert!(!sc.is_lock_initialized());

    assert_eq!(fx.driver.detach(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Detached);
    assert_eq!(fx.stack.live_interfaces(), 0);
    assert!(fx.stack.events().is_empty());
}

#[test]
fn test_detach_without_attach() {
    let fx = fixture();
    let mut sc = PtnetSoftc::default();

    assert_eq!(fx.driver.detach(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Detached);
    assert!(fx.stack.events().is_empty());
}

#[test]
fn test_detach_twice_frees_once() {
    let fx = fixture();
    let mut sc = attach(&fx, 0);

    fx.driver.detach(&mut sc).unwrap();
    fx.driver.detach(&mut sc).unwrap();

    let frees = fx
        .stack
        .events()
        .iter()
        .filter(|e| matches!(e, NetEvent::Free(_)))
        .count();
    assert_eq!(frees, 1);
    assert_eq!(fx.stack.live_interfaces(), 0);
}

#[test]
fn test_attach_twice_is_ignored() {
    let fx = fixture();
    let mut sc = attach(&fx, 0);

    assert_eq!(fx.driver.attach(&mut sc, ptnet_device(0)), Ok(()));
    assert_eq!(fx.stack.live_interfaces(), 1);
    assert_eq!(fx.stack.registered().len(), 1);
}

#[test]
fn test_attach_after_detach_is_ignored() {
    let fx = fixture();
    let mut sc = attach(&fx, 0);
    fx.driver.detach(&mut sc).unwrap();

    assert_eq!(fx.driver.attach(&mut sc, ptnet_device(0)), Ok(()));
    assert_eq!(sc.state(), PtnetState::Detached);
    assert!(sc.ifnet().is_none());
    assert_eq!(fx.stack.live_interfaces(), 0);
}

#[test]
fn test_suspend_resume_keeps_interface() {
    let fx = fixture();
    let mut sc = attach(&fx, 0);
    let before = sc.media_status();

    assert_eq!(fx.driver.suspend(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Suspended);
    assert!(sc.ifnet().unwrap().is_published());
    assert_eq!(sc.media_status(), before);

    assert_eq!(fx.driver.resume(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Attached);
    assert!(sc.ifnet().unwrap().is_published());
    assert_eq!(sc.media_status(), before);
    assert_eq!(sc.current_media(), Some(crate::PTNET_MEDIA));
}

#[test]
fn test_shutdown_behaves_like_suspend() {
    let fx = fixture();
    let mut sc = attach(&fx, 0);
    let before = sc.media_status();

    assert_eq!(fx.driver.shutdown(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Suspended);
    assert!(sc.ifnet().is_some());
    assert!(sc.is_lock_initialized());
    assert_eq!(sc.media_status(), before);
}

#[test]
fn test_detach_from_suspended() {
    let fx = fixture();
    let mut sc = attach(&fx, 0);
    fx.driver.suspend(&mut sc).unwrap();

    assert_eq!(fx.driver.detach(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Detached);
    assert_eq!(fx.stack.live_interfaces(), 0);
}

#[test]
fn test_out_of_order_transitions_are_ignored() {
    let fx = fixture();
    let mut sc = PtnetSoftc::default();

    assert_eq!(fx.driver.suspend(&mut sc), Ok(()));
    assert_eq!(fx.driver.resume(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Uninitialized);

    let fx = fixture();
    let mut sc = attach(&fx, 0);
    assert_eq!(fx.driver.resume(&mut sc), Ok(()));
    assert_eq!(sc.state(), PtnetState::Attached);
}

#[test]
fn test_configured_hwaddr_is_published() {
    let lla = [0x02, 0x00, 0x5e, 0x10, 0x00, 0x01];
    let fx = fixture_with_config(PtnetConfig::default().with_hwaddr(lla));
    let sc = attach(&fx, 0);

    assert_eq!(sc.hwaddr(), lla);
    assert_eq!(sc.ifnet().unwrap().lladdr(), lla);
}

#[test]
fn test_configured_capenable() {
    let fx = fixture_with_config(PtnetConfig::default().with_capenable(IfCapabilities::VLAN_MTU));
    let sc = attach(&fx, 0);
    let ifp = sc.ifnet().unwrap();

    assert!(ifp.capabilities.contains(IfCapabilities::JUMBO_MTU));
    assert_eq!(ifp.capenable, IfCapabilities::VLAN_MTU);
}

#[test]
fn test_independent_instances() {
    let fx = fixture();
    let mut sc0 = attach(&fx, 0);
    let sc1 = attach(&fx, 1);

    assert_eq!(
        fx.stack.registered(),
        vec![String::from("ptnet0"), String::from("ptnet1")]
    );

    fx.driver.detach(&mut sc0).unwrap();
    assert_eq!(fx.stack.registered(), vec![String::from("ptnet1")]);
    assert_eq!(sc1.state(), PtnetState::Attached);
    assert_eq!(fx.stack.live_interfaces(), 1);
}
