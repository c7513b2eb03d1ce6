// Host-side scenario tests for the ptnet driver.
//
// The bus and network stack are replaced by the mocks in `test-support`,
// which record every call so the tests can check ordering and leaks.

use alloc::sync::Arc;

use device::DeviceMethods;
use test_support::mock::bus::MockPciDevice;
use test_support::mock::net::MockNetStack;

use crate::{PTNETMAP_PCI_NETIF_ID, PTNETMAP_PCI_VENDOR_ID, PtnetConfig, PtnetDriver, PtnetSoftc};

mod lifecycle;

fn ptnet_device(unit: u32) -> Arc<MockPciDevice> {
    Arc::new(MockPciDevice::new(
        PTNETMAP_PCI_VENDOR_ID,
        PTNETMAP_PCI_NETIF_ID,
        "ptnet",
        unit,
    ))
}

struct Fixture {
    stack: Arc<MockNetStack>,
    driver: PtnetDriver,
}

fn fixture() -> Fixture {
    fixture_with_config(PtnetConfig::default())
}

fn fixture_with_config(config: PtnetConfig) -> Fixture {
    let stack = Arc::new(MockNetStack::new());
    let driver = PtnetDriver::with_config(stack.clone(), config);
    Fixture { stack, driver }
}

fn attach(fx: &Fixture, unit: u32) -> PtnetSoftc {
    let mut sc = PtnetSoftc::default();
    fx.driver
        .attach(&mut sc, ptnet_device(unit))
        .expect("attach failed");
    sc
}
