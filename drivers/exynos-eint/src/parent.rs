// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Parent interrupt controller and the chained flow run on its lines.

use core::fmt;

/// A physical interrupt line of the parent controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParentIrq(pub u32);

impl fmt::Display for ParentIrq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The SoC's top-level interrupt controller, which owns the lines the EINT
/// demultiplexers are chained to.
pub trait ParentIrqChip: Send + Sync {
    fn mask(&self, irq: ParentIrq);

    fn unmask(&self, irq: ParentIrq);

    /// Whether [`ParentIrqChip::ack`] is implemented.
    fn has_ack(&self) -> bool {
        false
    }

    fn ack(&self, _irq: ParentIrq) {}

    /// Whether [`ParentIrqChip::eoi`] is implemented.
    fn has_eoi(&self) -> bool {
        false
    }

    fn eoi(&self, _irq: ParentIrq) {}
}

/// Entry of a chained handler. Controllers with an end-of-interrupt
/// operation need nothing here; the others get the line masked and acked.
pub fn chained_irq_enter(chip: &dyn ParentIrqChip, irq: ParentIrq) {
    if chip.has_eoi() {
        return;
    }
    chip.mask(irq);
    if chip.has_ack() {
        chip.ack(irq);
    }
}

/// Exit of a chained handler, pairing [`chained_irq_enter`].
pub fn chained_irq_exit(chip: &dyn ParentIrqChip, irq: ParentIrq) {
    if chip.has_eoi() {
        chip.eoi(irq);
    } else {
        chip.unmask(irq);
    }
}

/// Dispatches a child interrupt with the parent line masked and acked.
///
/// The sequence is enter, mask, ack, `dispatch`, unmask, exit.
pub fn chained_flow<R>(
    chip: &dyn ParentIrqChip,
    irq: ParentIrq,
    dispatch: impl FnOnce() -> R,
) -> R {
    chained_irq_enter(chip, irq);
    chip.mask(irq);
    if chip.has_ack() {
        chip.ack(irq);
    }
    let ret = dispatch();
    chip.unmask(irq);
    chained_irq_exit(chip, irq);
    ret
}
