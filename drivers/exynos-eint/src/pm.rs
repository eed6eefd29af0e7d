// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Noise filter programming and suspend/resume of the EINT state.

use crate::{
    bank::{EintGpioSave, EintType, PinBank},
    controller::PinController,
    regs::*,
};

/// Programs the noise filter of every pin pair of `bank`.
///
/// Lanes `0..nr_pins/2` of the first filter register are updated and the
/// result is mirrored into the second one. A word holds four lanes.
pub(crate) fn eint_flt_config(bank: &PinBank, flags: FilterFlags, width: u32) {
    let flt_con = flags.fltcon(width);
    let flt_reg = EXYNOS_GPIO_EFLTCON_OFFSET + 2 * bank.eint_offset();

    let lanes = bank.nr_pins().min(EXYNOS_EINT_MAX_PER_BANK) / 2;
    let regs = bank.lock_regs();
    for i in 0..lanes {
        let shift = i * EXYNOS_EINT_FLTCON_LEN;
        let mut val = regs.read(flt_reg);
        val &= !(EXYNOS_EINT_FLTCON_MASK << shift);
        val |= flt_con << shift;
        regs.write(flt_reg, val);
        regs.write(flt_reg + 4, val);
    }
}

fn fltcon_regs(bank: &PinBank) -> (usize, usize) {
    let reg = EXYNOS_GPIO_EFLTCON_OFFSET + 2 * bank.eint_offset();
    (reg, reg + 4)
}

fn suspend_bank(bank: &PinBank) {
    if !bank.has_save_slot() {
        return;
    }
    let (flt0, flt1) = fltcon_regs(bank);
    let save = EintGpioSave {
        eint_con: bank.read32(EXYNOS_GPIO_ECON_OFFSET + bank.eint_offset()),
        eint_fltcon0: bank.read32(flt0),
        eint_fltcon1: bank.read32(flt1),
    };
    debug!("{}: save     con {:#010x}", bank.name(), save.eint_con);
    debug!("{}: save fltcon0 {:#010x}", bank.name(), save.eint_fltcon0);
    debug!("{}: save fltcon1 {:#010x}", bank.name(), save.eint_fltcon1);
    bank.store_saved(save);
}

fn resume_bank(bank: &PinBank) {
    let Some(save) = bank.take_saved() else {
        return;
    };
    let con = EXYNOS_GPIO_ECON_OFFSET + bank.eint_offset();
    let (flt0, flt1) = fltcon_regs(bank);
    debug!(
        "{}:     con {:#010x} => {:#010x}",
        bank.name(),
        bank.read32(con),
        save.eint_con
    );
    debug!(
        "{}: fltcon0 {:#010x} => {:#010x}",
        bank.name(),
        bank.read32(flt0),
        save.eint_fltcon0
    );
    debug!(
        "{}: fltcon1 {:#010x} => {:#010x}",
        bank.name(),
        bank.read32(flt1),
        save.eint_fltcon1
    );
    bank.write_single(con, save.eint_con);
    bank.write_single(flt0, save.eint_fltcon0);
    bank.write_single(flt1, save.eint_fltcon1);
}

/// GPIO banks keep their trigger and filter configuration; wakeup banks
/// switch to the analog filter, which works without the EINT clock.
pub(crate) fn suspend(ctrl: &PinController) {
    for bank in ctrl.banks() {
        match bank.eint_type() {
            EintType::Gpio => suspend_bank(bank),
            EintType::Wakeup | EintType::WakeupMuxed => {
                eint_flt_config(bank, FilterFlags::ANALOG, 0)
            }
            EintType::None => {}
        }
    }
}

pub(crate) fn resume(ctrl: &PinController) {
    for bank in ctrl.banks() {
        match bank.eint_type() {
            EintType::Gpio => resume_bank(bank),
            EintType::Wakeup | EintType::WakeupMuxed => {
                eint_flt_config(bank, FilterFlags::DIGITAL, 0)
            }
            EintType::None => {}
        }
    }
}
