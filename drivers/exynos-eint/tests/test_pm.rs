mod common;

use common::harness;
use exynos_eint::{
    DeviceNode, PinBankDesc, PinCtrlDesc,
    bank::{BANK_TYPE_0, BANK_TYPE_1, EintGpioSave},
    controller::EintFeatures,
};

static BANKS: [PinBankDesc; 4] = [
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x000, "gpa0", 0x00),
    PinBankDesc::eintg(&BANK_TYPE_0, 6, 0x020, "gpa1", 0x04),
    PinBankDesc::eintn(&BANK_TYPE_0, 4, 0x040, "gpy0"),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc00, "gpx0", 0x10),
];

static CTRL: PinCtrlDesc = PinCtrlDesc {
    label: "test-pm",
    banks: &BANKS,
    features: EintFeatures::all(),
};

static CTRL_NO_PM: PinCtrlDesc = PinCtrlDesc {
    label: "test-no-pm",
    banks: &BANKS,
    features: EintFeatures::GPIO_INIT.union(EintFeatures::WKUP_INIT),
};

const GPA1_CON: usize = 0x704;
const GPA1_FLT0: usize = 0x808;
const GPA1_FLT1: usize = 0x80c;
const GPX0_FLT0: usize = 0x820;
const GPX0_FLT1: usize = 0x824;

fn node() -> DeviceNode {
    DeviceNode::new("pinctrl").with_child(
        DeviceNode::new("wakeup-interrupt-controller")
            .with_compatible("samsung,exynos4210-wakeup-eint")
            .with_interrupts(&[40]),
    )
}

#[test]
fn suspend_resume_restores_gpio_banks() {
    let h = harness(&CTRL).node(node()).probe().unwrap();
    h.regs.set_raw(GPA1_CON, 0x0012_0321);
    h.regs.set_raw(GPA1_FLT0, 0x8181_8181);
    h.regs.set_raw(GPA1_FLT1, 0x00c0_00c0);
    let gpa0 = [h.regs.get(0x700), h.regs.get(0x800), h.regs.get(0x804)];

    h.ctrl.suspend();
    let gpa1 = h.ctrl.bank("gpa1").unwrap();
    assert_eq!(
        gpa1.saved_state(),
        Some(EintGpioSave {
            eint_con: 0x0012_0321,
            eint_fltcon0: 0x8181_8181,
            eint_fltcon1: 0x00c0_00c0,
        })
    );

    // register contents are lost while the domain is powered down
    for reg in [0x700, 0x800, 0x804, GPA1_CON, GPA1_FLT0, GPA1_FLT1] {
        h.regs.set_raw(reg, 0);
    }
    h.regs.clear_journal();
    h.ctrl.resume();

    assert_eq!(h.regs.get(GPA1_CON), 0x0012_0321);
    assert_eq!(h.regs.get(GPA1_FLT0), 0x8181_8181);
    assert_eq!(h.regs.get(GPA1_FLT1), 0x00c0_00c0);
    assert_eq!(
        [h.regs.get(0x700), h.regs.get(0x800), h.regs.get(0x804)],
        gpa0
    );
    assert_eq!(h.regs.writes_to(GPA1_CON), [0x0012_0321]);
    assert_eq!(gpa1.saved_state(), None);
}

#[test]
fn wakeup_banks_switch_filters() {
    let h = harness(&CTRL).node(node()).probe().unwrap();
    assert_eq!(h.regs.get(GPX0_FLT0), 0xc0c0_c0c0);

    h.ctrl.suspend();
    assert_eq!(h.regs.get(GPX0_FLT0), 0x8080_8080);
    assert_eq!(h.regs.get(GPX0_FLT1), 0x8080_8080);

    h.ctrl.resume();
    assert_eq!(h.regs.get(GPX0_FLT0), 0xc0c0_c0c0);
    assert_eq!(h.regs.get(GPX0_FLT1), 0xc0c0_c0c0);
}

#[test]
fn resume_without_suspend_keeps_gpio_registers() {
    let h = harness(&CTRL).node(node()).probe().unwrap();
    h.regs.clear_journal();

    h.ctrl.resume();
    assert!(h.regs.writes_to(GPA1_CON).is_empty());
    assert!(h.regs.writes_to(0x700).is_empty());
    assert!(!h.regs.writes_to(GPX0_FLT0).is_empty());
}

#[test]
fn suspend_before_init_saves_nothing() {
    let h = harness(&CTRL).build();
    h.ctrl.suspend();
    assert!(h.ctrl.banks().iter().all(|b| b.saved_state().is_none()));
}

#[test]
fn suspend_resume_disabled() {
    let h = harness(&CTRL_NO_PM).node(node()).probe().unwrap();
    h.regs.clear_journal();

    h.ctrl.suspend();
    h.ctrl.resume();
    assert!(h.regs.journal().is_empty());
    assert!(h.ctrl.banks().iter().all(|b| b.saved_state().is_none()));
}
