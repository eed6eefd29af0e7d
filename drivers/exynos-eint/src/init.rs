// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Interrupt setup of a pin controller.

use alloc::{sync::Arc, vec::Vec};

use crate::{
    EintError, EintResult,
    bank::EintType,
    chip::{EXYNOS_GPIO_IRQ_CHIP, EXYNOS_WKUP_IRQ_CHIP},
    controller::{MuxedWeintData, ParentRoute, PinController, WeintData},
    domain::IrqDomain,
    of::{DeviceNode, EXYNOS_WKUP_IRQ_IDS},
    parent::ParentIrq,
    pm::eint_flt_config,
    regs::FilterFlags,
};

/// Undoes a partial GPIO interrupt setup when dropped armed.
struct DomainRollback<'a> {
    ctrl: &'a PinController,
    line: ParentIrq,
    /// Banks `..done` may own a domain created by this setup.
    done: usize,
    armed: bool,
}

impl<'a> DomainRollback<'a> {
    fn new(ctrl: &'a PinController, line: ParentIrq) -> Self {
        Self {
            ctrl,
            line,
            done: 0,
            armed: true,
        }
    }

    fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for DomainRollback<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        for bank in self.ctrl.banks()[..self.done].iter().rev() {
            if bank.eint_type() != EintType::Gpio {
                continue;
            }
            if let Some(domain) = bank.take_irq_domain() {
                domain.remove();
            }
        }
        self.ctrl.unroute(self.line);
    }
}

pub(crate) fn eint_gpio_init(ctrl: &PinController) -> EintResult {
    let Some(irq) = ctrl.irq() else {
        return Err(crate::eint_err!(
            MissingIrqResource,
            format_args!("{}: irq number not available", ctrl.label())
        ));
    };

    ctrl.route(irq, ParentRoute::Gpio).inspect_err(|_| {
        error!("{}: irq request failed", ctrl.label());
    })?;

    let mut rollback = DomainRollback::new(ctrl, irq);
    for (i, bank) in ctrl.banks().iter().enumerate() {
        if bank.eint_type() != EintType::Gpio {
            continue;
        }
        let domain = IrqDomain::add_linear(ctrl.irq_core(), bank, &EXYNOS_GPIO_IRQ_CHIP)
            .inspect_err(|_| error!("{}: gpio irq domain add failed", bank.name()))?;
        bank.set_irq_domain(Some(domain));
        rollback.done = i + 1;

        bank.alloc_save_slot();
        eint_flt_config(bank, FilterFlags::DIGITAL, 0);
    }
    rollback.commit();
    Ok(())
}

pub(crate) fn eint_wkup_init(ctrl: &PinController) -> EintResult {
    let wkup_np = ctrl
        .node()
        .find_compatible_child(EXYNOS_WKUP_IRQ_IDS)
        .ok_or(EintError::NotPresent)?;

    let mut muxed_banks = 0;
    for bank in ctrl.banks() {
        if bank.eint_type() != EintType::Wakeup {
            continue;
        }

        eint_flt_config(bank, FilterFlags::DIGITAL, 0);

        let domain = IrqDomain::add_linear(ctrl.irq_core(), bank, &EXYNOS_WKUP_IRQ_CHIP)
            .inspect_err(|_| error!("{}: wkup irq domain add failed", bank.name()))?;
        bank.set_irq_domain(Some(domain));

        let Some(node) = bank.of_node().filter(|n| n.has_interrupts()) else {
            bank.reclassify_muxed();
            muxed_banks += 1;
            continue;
        };

        let nr_pins = bank.nr_pins();
        let mut weint = Vec::new();
        if weint.try_reserve_exact(nr_pins as usize).is_err() {
            return Err(crate::eint_err!(
                OutOfMemory,
                format_args!("{}: could not allocate memory for weint_data", bank.name())
            ));
        }
        weint.extend((0..nr_pins).map(|irq| WeintData {
            bank: bank.clone(),
            irq,
        }));
        let weint = Arc::new(weint);

        for idx in 0..nr_pins {
            let Some(irq) = node.irq_of_parse_and_map(idx as usize) else {
                error!("irq number for eint-{}-{idx} not found", bank.name());
                continue;
            };
            ctrl.route_chained(
                irq,
                ParentRoute::Dedicated {
                    table: weint.clone(),
                    index: idx as usize,
                },
            );
        }
    }

    if muxed_banks == 0 {
        return Ok(());
    }
    setup_muxed(ctrl, wkup_np, muxed_banks)
}

fn setup_muxed(ctrl: &PinController, wkup_np: &DeviceNode, muxed_banks: usize) -> EintResult {
    let Some(irq) = wkup_np.irq_of_parse_and_map(0) else {
        error!("{}: irq number for muxed EINTs not found", ctrl.label());
        return Ok(());
    };

    let mut banks = Vec::new();
    if banks.try_reserve_exact(muxed_banks).is_err() {
        return Err(crate::eint_err!(
            OutOfMemory,
            format_args!("{}: could not allocate memory for muxed_data", ctrl.label())
        ));
    }

    ctrl.route_chained(irq, ParentRoute::Muxed);

    banks.extend(
        ctrl.banks()
            .iter()
            .filter(|b| b.eint_type() == EintType::WakeupMuxed)
            .cloned(),
    );
    ctrl.set_muxed(MuxedWeintData { banks });
    Ok(())
}
