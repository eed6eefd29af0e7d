mod common;

use common::harness;
use exynos_eint::{
    DeviceNode, EintError, PinBankDesc, PinCtrlDesc,
    bank::{BANK_TYPE_0, BANK_TYPE_1},
    controller::EintFeatures,
    get_eint_wake_mask,
};

static BANKS: [PinBankDesc; 3] = [
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x000, "gpa0", 0x00),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc00, "gpx0", 0x00),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc20, "gpx1", 0x04),
];

static CTRL: PinCtrlDesc = PinCtrlDesc {
    label: "test-wake",
    banks: &BANKS,
    features: EintFeatures::all(),
};

fn setup() -> common::Harness {
    let node = DeviceNode::new("pinctrl").with_child(
        DeviceNode::new("wakeup-interrupt-controller")
            .with_compatible("samsung,exynos4210-wakeup-eint")
            .with_interrupts(&[40]),
    );
    harness(&CTRL).node(node).probe().unwrap()
}

#[test]
fn wake_bit_follows_eint_offset() {
    let h = setup();
    let virq = h.ctrl.gpio_to_irq("gpx1", 2).unwrap();
    let bit = 1 << (2 * 4 + 2);
    assert_ne!(get_eint_wake_mask() & bit, 0);

    h.core.set_irq_wake(virq, true).unwrap();
    assert_eq!(get_eint_wake_mask() & bit, 0);
    assert!(h.core.irq_desc(virq).unwrap().wake_enabled());

    h.core.set_irq_wake(virq, false).unwrap();
    assert_ne!(get_eint_wake_mask() & bit, 0);
    assert!(!h.core.irq_desc(virq).unwrap().wake_enabled());
}

#[test]
fn wake_enable_is_idempotent() {
    let h = setup();
    let virq = h.ctrl.gpio_to_irq("gpx0", 5).unwrap();

    h.core.set_irq_wake(virq, true).unwrap();
    h.core.set_irq_wake(virq, true).unwrap();
    assert_eq!(get_eint_wake_mask() & (1 << 5), 0);
    h.core.set_irq_wake(virq, false).unwrap();
    assert_ne!(get_eint_wake_mask() & (1 << 5), 0);
}

#[test]
fn gpio_bank_cannot_wake() {
    let h = setup();
    let virq = h.ctrl.gpio_to_irq("gpa0", 2).unwrap();
    assert_eq!(
        h.core.set_irq_wake(virq, true),
        Err(EintError::WakeUnsupported)
    );
}
