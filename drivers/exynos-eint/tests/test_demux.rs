mod common;

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use common::{FakeParent, GPIO_LINE, Harness, ParentCall, harness};
use exynos_eint::{
    DeviceNode, IrqReturn, IrqType, ParentIrq, PinBankDesc, PinCtrlDesc,
    bank::{BANK_TYPE_0, BANK_TYPE_1},
    controller::EintFeatures,
};

static GPIO_BANKS: [PinBankDesc; 3] = [
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x000, "gpa0", 0x00),
    PinBankDesc::eintg(&BANK_TYPE_0, 6, 0x020, "gpa1", 0x04),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x040, "gpb", 0x08),
];

static GPIO_CTRL: PinCtrlDesc = PinCtrlDesc {
    label: "test-gpio",
    banks: &GPIO_BANKS,
    features: EintFeatures::GPIO_INIT,
};

static WKUP_BANKS: [PinBankDesc; 4] = [
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc00, "gpx0", 0x00),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc20, "gpx1", 0x04),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc40, "gpx2", 0x08),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc60, "gpx3", 0x0c),
];

static WKUP_CTRL: PinCtrlDesc = PinCtrlDesc {
    label: "test-wkup",
    banks: &WKUP_BANKS,
    features: EintFeatures::WKUP_INIT,
};

const SVC: usize = 0xb08;
const MUXED_LINE: u32 = 40;
const GPX2_PEND: usize = 0xa08;
const GPX2_MASK: usize = 0x908;
const GPX3_PEND: usize = 0xa0c;

fn gpio_setup() -> Harness {
    let h = harness(&GPIO_CTRL).build();
    h.ctrl.eint_gpio_init().unwrap();
    h
}

fn wkup_node() -> DeviceNode {
    DeviceNode::new("pinctrl")
        .with_child(
            DeviceNode::new("wakeup-interrupt-controller")
                .with_compatible("samsung,exynos4210-wakeup-eint")
                .with_interrupts(&[MUXED_LINE]),
        )
        .with_child(DeviceNode::new("gpx0").with_interrupts(&[32, 33, 34, 35, 36, 37, 38, 39]))
        .with_child(DeviceNode::new("gpx1").with_interrupts(&[48, 49, 50, 51, 52, 53, 54, 55]))
}

fn wkup_setup(parent: Arc<FakeParent>) -> Harness {
    let h = harness(&WKUP_CTRL).node(wkup_node()).parent(parent).build();
    h.ctrl.eint_wkup_init().unwrap();
    h
}

fn counter(h: &Harness, bank: &str, pin: u32) -> Arc<AtomicUsize> {
    let virq = h.ctrl.gpio_to_irq(bank, pin).unwrap();
    h.core.set_irq_type(virq, IrqType::EDGE_RISING).unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits2 = hits.clone();
    h.core
        .request_irq(virq, move |_| {
            hits2.fetch_add(1, Ordering::SeqCst);
            IrqReturn::Handled
        })
        .unwrap();
    hits
}

fn recorder(h: &Harness, bank: &str, pins: &[u32]) -> Arc<Mutex<Vec<u32>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for &pin in pins {
        let virq = h.ctrl.gpio_to_irq(bank, pin).unwrap();
        h.core.set_irq_type(virq, IrqType::EDGE_RISING).unwrap();
        let log = log.clone();
        h.core
            .request_irq(virq, move |_| {
                log.lock().unwrap().push(pin);
                IrqReturn::Handled
            })
            .unwrap();
    }
    log
}

#[test]
fn gpio_demux_decodes_group_and_pin() {
    let h = gpio_setup();
    let hits = counter(&h, "gpb", 5);
    let other = counter(&h, "gpa1", 5);

    // group 3 is the third bank
    h.regs.set_raw(SVC, (3 << 3) | 5);
    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(GPIO_LINE)), IrqReturn::Handled);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(other.load(Ordering::SeqCst), 0);
}

#[test]
fn gpio_demux_group_zero_is_handled() {
    let h = gpio_setup();
    let hits = counter(&h, "gpa0", 0);

    h.regs.set_raw(SVC, 0);
    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(GPIO_LINE)), IrqReturn::Handled);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn gpio_demux_unmapped_or_out_of_range() {
    let h = gpio_setup();
    h.regs.set_raw(SVC, (1 << 3) | 2);
    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(GPIO_LINE)), IrqReturn::None);

    h.regs.set_raw(SVC, (10 << 3) | 2);
    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(GPIO_LINE)), IrqReturn::None);
}

#[test]
fn unrouted_line_is_not_handled() {
    let h = gpio_setup();
    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(99)), IrqReturn::None);
}

#[test]
fn muxed_demux_skips_masked_bits() {
    let parent = FakeParent::new(true, false);
    let h = wkup_setup(parent.clone());
    let log = recorder(&h, "gpx2", &[1, 3]);

    h.regs.set_raw(GPX2_MASK, 0b0010);
    h.regs.set_raw(GPX2_PEND, 0b1010);
    parent.clear();

    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(MUXED_LINE)), IrqReturn::Handled);
    assert_eq!(*log.lock().unwrap(), [3]);
    assert_eq!(
        parent.calls(),
        [
            ParentCall::Mask(MUXED_LINE),
            ParentCall::Ack(MUXED_LINE),
            ParentCall::Unmask(MUXED_LINE),
        ]
    );
}

#[test]
fn muxed_demux_skips_unmapped_bits() {
    let h = wkup_setup(FakeParent::new(false, true));
    h.regs.set_raw(GPX3_PEND, 0b0100_0000);
    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(MUXED_LINE)), IrqReturn::None);
}

#[test]
fn muxed_demux_highest_bit_first() {
    let h = wkup_setup(FakeParent::new(false, true));
    let log = recorder(&h, "gpx2", &[0, 1, 2, 3, 4, 5, 6, 7]);

    for _ in 0..32 {
        let pend = fastrand::u32(..) & 0xff;
        let mask = fastrand::u32(..) & 0xff;
        h.regs.set_raw(GPX2_MASK, mask);
        h.regs.set_raw(GPX2_PEND, pend);
        log.lock().unwrap().clear();

        h.ctrl.handle_parent_irq(ParentIrq(MUXED_LINE));

        let expected: Vec<u32> = (0..8).rev().filter(|b| (pend & !mask) & (1 << b) != 0).collect();
        assert_eq!(*log.lock().unwrap(), expected, "pend {pend:#x} mask {mask:#x}");
        assert_eq!(h.regs.get(GPX2_PEND), pend & mask);
    }
}

#[test]
fn dedicated_line_chained_flow_order() {
    let parent = FakeParent::new(true, false);
    let h = wkup_setup(parent.clone());
    let hits = counter(&h, "gpx0", 1);
    parent.clear();

    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(33)), IrqReturn::Handled);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        parent.calls(),
        [
            ParentCall::Mask(33),
            ParentCall::Ack(33),
            ParentCall::Mask(33),
            ParentCall::Ack(33),
            ParentCall::Unmask(33),
            ParentCall::Unmask(33),
        ]
    );
}

#[test]
fn dedicated_line_chained_flow_with_eoi() {
    let parent = FakeParent::new(true, true);
    let h = wkup_setup(parent.clone());
    let hits = counter(&h, "gpx1", 7);
    parent.clear();

    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(55)), IrqReturn::Handled);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        parent.calls(),
        [
            ParentCall::Mask(55),
            ParentCall::Ack(55),
            ParentCall::Unmask(55),
            ParentCall::Eoi(55),
        ]
    );
}

#[test]
fn dedicated_line_without_mapping() {
    let parent = FakeParent::new(false, true);
    let h = wkup_setup(parent.clone());

    assert_eq!(h.ctrl.handle_parent_irq(ParentIrq(34)), IrqReturn::None);
    assert_eq!(
        parent.calls(),
        [
            ParentCall::Mask(34),
            ParentCall::Unmask(34),
            ParentCall::Eoi(34),
        ]
    );
}
