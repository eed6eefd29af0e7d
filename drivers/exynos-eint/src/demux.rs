// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Handlers chained to the parent interrupt lines.

use crate::{
    bank::PinBank,
    controller::{PinController, WeintData},
    irq::{IrqCore, IrqReturn},
    parent::{ParentIrq, chained_flow, chained_irq_enter, chained_irq_exit},
    regs::{EXYNOS_GPIO_EMASK_OFFSET, EXYNOS_GPIO_EPEND_OFFSET, EXYNOS_SVC_OFFSET, svc_group, svc_num},
};

/// Set bits of a pending word, highest first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingBits(pub u32);

impl Iterator for PendingBits {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.0 == 0 {
            return None;
        }
        let bit = u32::BITS - 1 - self.0.leading_zeros();
        self.0 &= !(1 << bit);
        Some(bit)
    }
}

/// Handler of the shared GPIO interrupt line. The service register names
/// the group (1-based bank index) and the pin that fired.
pub(crate) fn eint_gpio_irq(ctrl: &PinController) -> IrqReturn {
    let svc = ctrl.regs().read32(EXYNOS_SVC_OFFSET);
    let group = svc_group(svc);
    let pin = svc_num(svc);

    if group == 0 {
        return IrqReturn::Handled;
    }
    let Some(bank) = ctrl.banks().get(group as usize - 1) else {
        warn!("{}: svc group {group} out of range", ctrl.label());
        return IrqReturn::None;
    };
    let Some(virq) = bank.irq_domain().and_then(|d| d.find_mapping(pin)) else {
        return IrqReturn::None;
    };
    ctrl.irq_core().generic_handle_irq(virq);
    IrqReturn::Handled
}

/// Handler of a dedicated wakeup line serving one pin.
pub(crate) fn irq_eint0_15(ctrl: &PinController, irq: ParentIrq, eintd: &WeintData) -> IrqReturn {
    chained_flow(ctrl.parent(), irq, || {
        match eintd.bank.irq_domain().and_then(|d| d.find_mapping(eintd.irq)) {
            Some(virq) => {
                ctrl.irq_core().generic_handle_irq(virq);
                IrqReturn::Handled
            }
            None => {
                debug!("{}-{}: no mapping", eintd.bank.name(), eintd.irq);
                IrqReturn::None
            }
        }
    })
}

fn irq_demux_eint(core: &IrqCore, pend: u32, bank: &PinBank) -> bool {
    let Some(domain) = bank.irq_domain() else {
        return false;
    };
    let mut handled = false;
    for pin in PendingBits(pend) {
        if let Some(virq) = domain.find_mapping(pin) {
            core.generic_handle_irq(virq);
            handled = true;
        }
    }
    handled
}

/// Handler of the wakeup line shared by the muxed banks.
pub(crate) fn irq_demux_eint16_31(ctrl: &PinController, irq: ParentIrq) -> IrqReturn {
    let parent = ctrl.parent();
    chained_irq_enter(parent, irq);

    let mut ret = IrqReturn::None;
    if let Some(group) = ctrl.muxed_group() {
        for bank in &group.banks {
            let pend = bank.read32(EXYNOS_GPIO_EPEND_OFFSET + bank.eint_offset());
            let mask = bank.read32(EXYNOS_GPIO_EMASK_OFFSET + bank.eint_offset());
            if irq_demux_eint(ctrl.irq_core(), pend & !mask, bank) {
                ret = IrqReturn::Handled;
            }
        }
    }

    chained_irq_exit(parent, irq);
    ret
}
