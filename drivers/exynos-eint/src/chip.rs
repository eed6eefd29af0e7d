// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Interrupt chip operations on the per-bank EINT registers.

use crate::{
    EintError, EintResult,
    bank::PinCfgType,
    irq::{FlowHandler, IrqData, IrqType},
    regs::*,
    wake,
};

/// An external interrupt chip.
///
/// The register offsets are relative to the bank's `eint_offset`.
#[derive(Debug)]
pub struct EintChip {
    pub name: &'static str,
    pub eint_con: usize,
    pub eint_mask: usize,
    pub eint_pend: usize,
    wakeup: bool,
}

/// Chip of the banks served by the GPIO interrupt line.
pub static EXYNOS_GPIO_IRQ_CHIP: EintChip = EintChip {
    name: "exynos_gpio_irq_chip",
    eint_con: EXYNOS_GPIO_ECON_OFFSET,
    eint_mask: EXYNOS_GPIO_EMASK_OFFSET,
    eint_pend: EXYNOS_GPIO_EPEND_OFFSET,
    wakeup: false,
};

/// Chip of the wakeup banks. Same register block as the GPIO chip, plus the
/// wake operation.
pub static EXYNOS_WKUP_IRQ_CHIP: EintChip = EintChip {
    name: "exynos_wkup_irq_chip",
    eint_con: EXYNOS_GPIO_ECON_OFFSET,
    eint_mask: EXYNOS_GPIO_EMASK_OFFSET,
    eint_pend: EXYNOS_GPIO_EPEND_OFFSET,
    wakeup: true,
};

pub(crate) fn trigger_code(ty: IrqType) -> Option<u32> {
    let code = if ty == IrqType::EDGE_RISING {
        EXYNOS_EINT_EDGE_RISING
    } else if ty == IrqType::EDGE_FALLING {
        EXYNOS_EINT_EDGE_FALLING
    } else if ty == IrqType::EDGE_BOTH {
        EXYNOS_EINT_EDGE_BOTH
    } else if ty == IrqType::LEVEL_HIGH {
        EXYNOS_EINT_LEVEL_HIGH
    } else if ty == IrqType::LEVEL_LOW {
        EXYNOS_EINT_LEVEL_LOW
    } else {
        return None;
    };
    Some(code)
}

impl EintChip {
    /// Whether the chip provides the wake operation.
    pub const fn has_wake(&self) -> bool {
        self.wakeup
    }

    pub fn mask(&self, d: &IrqData) {
        let reg = self.eint_mask + d.bank.eint_offset();
        let bit = 1 << d.hwirq;
        d.bank.lock_regs().update_bits(reg, bit, bit);
    }

    /// Unmasks the pin. Level interrupts are acked first so that a level
    /// asserted only while masked does not fire.
    pub fn unmask(&self, d: &IrqData) {
        if d.trigger.is_level() {
            self.ack(d);
        }
        let reg = self.eint_mask + d.bank.eint_offset();
        d.bank.lock_regs().update_bits(reg, 1 << d.hwirq, 0);
    }

    pub fn ack(&self, d: &IrqData) {
        d.bank
            .write_single(self.eint_pend + d.bank.eint_offset(), 1 << d.hwirq);
    }

    /// Programs the trigger of the pin and returns the flow handler to use.
    pub fn set_type(&self, d: &IrqData, ty: IrqType) -> EintResult<FlowHandler> {
        let Some(trig) = trigger_code(ty) else {
            return Err(crate::eint_err!(
                UnsupportedTriggerType,
                format_args!("type {:#x}", ty.bits())
            ));
        };
        let flow = if ty.is_edge() {
            FlowHandler::Edge
        } else {
            FlowHandler::Level
        };

        let reg = self.eint_con + d.bank.eint_offset();
        let shift = EXYNOS_EINT_CON_LEN * d.hwirq;
        d.bank
            .lock_regs()
            .update_bits(reg, EXYNOS_EINT_CON_MASK << shift, trig << shift);
        Ok(flow)
    }

    /// Locks the pin as an interrupt source and switches it to the EINT
    /// function.
    pub fn request_resources(&self, d: &IrqData) -> EintResult {
        let bank = &d.bank;
        if let Err(e) = bank.gpio().lock_as_irq(bank.name(), d.hwirq) {
            return Err(crate::eint_err!(
                PinLockFailed,
                format_args!("unable to lock pin {}-{} IRQ: {e}", bank.name(), d.hwirq)
            ));
        }
        self.write_func(d, EXYNOS_EINT_FUNC);
        Ok(())
    }

    /// Returns the pin to the input function and drops the interrupt lock.
    pub fn release_resources(&self, d: &IrqData) {
        self.write_func(d, FUNC_INPUT);
        d.bank.gpio().unlock_as_irq(d.bank.name(), d.hwirq);
    }

    fn write_func(&self, d: &IrqData, func: u32) {
        let bank = &d.bank;
        let (reg, shift, mask) = bank.desc().bank_type.field(PinCfgType::Func, d.hwirq);
        let reg = bank.desc().pctl_offset as usize + reg;
        bank.lock_regs()
            .update_bits(reg, mask << shift, func << shift);
    }

    /// Enables (`on`) or disables the pin as a system wakeup source.
    pub fn set_wake(&self, d: &IrqData, on: bool) -> EintResult {
        if !self.wakeup {
            return Err(EintError::WakeUnsupported);
        }
        info!(
            "wake {} for irq {}",
            if on { "enabled" } else { "disabled" },
            d.virq
        );
        let bit = 2 * d.bank.eint_offset() as u32 + d.hwirq;
        wake::update_wake_mask(bit, on);
        Ok(())
    }
}
