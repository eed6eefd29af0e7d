// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! GPIO ownership of interrupt pins.

use alloc::{collections::BTreeMap, string::String};

use kspin::SpinNoIrq;

use crate::{EintError, EintResult};

/// The GPIO side of a pin used as an interrupt source.
pub trait GpioIrqOwner: Send + Sync {
    /// Marks `bank`-`pin` as used by an interrupt. Fails if the GPIO layer
    /// cannot give the pin up, e.g. because it drives it as an output.
    fn lock_as_irq(&self, bank: &str, pin: u32) -> EintResult;

    /// Reverts [`GpioIrqOwner::lock_as_irq`]. Unlocking a pin that is not
    /// locked does nothing.
    fn unlock_as_irq(&self, bank: &str, pin: u32);
}

#[derive(Debug, Default, Clone, Copy)]
struct BankPins {
    output: u32,
    irq: u32,
}

/// Bookkeeping of output and interrupt-locked pins per bank.
pub struct GpioIrqLocks {
    banks: SpinNoIrq<BTreeMap<String, BankPins>>,
}

impl GpioIrqLocks {
    pub const fn new() -> Self {
        Self {
            banks: SpinNoIrq::new(BTreeMap::new()),
        }
    }

    /// Records whether `bank`-`pin` is configured as an output.
    pub fn set_output(&self, bank: &str, pin: u32, output: bool) {
        let bit = 1u32.checked_shl(pin).unwrap_or(0);
        let mut banks = self.banks.lock();
        let pins = banks.entry(bank.into()).or_default();
        if output {
            pins.output |= bit;
        } else {
            pins.output &= !bit;
        }
    }

    pub fn is_locked_as_irq(&self, bank: &str, pin: u32) -> bool {
        let bit = 1u32.checked_shl(pin).unwrap_or(0);
        self.banks
            .lock()
            .get(bank)
            .is_some_and(|pins| pins.irq & bit != 0)
    }
}

impl Default for GpioIrqLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioIrqOwner for GpioIrqLocks {
    fn lock_as_irq(&self, bank: &str, pin: u32) -> EintResult {
        if pin >= u32::BITS {
            return Err(EintError::InvalidPin);
        }
        let mut banks = self.banks.lock();
        let pins = banks.entry(bank.into()).or_default();
        if pins.output & (1 << pin) != 0 {
            warn!("{bank}-{pin} is an output, cannot be used as IRQ");
            return Err(EintError::PinLockFailed);
        }
        pins.irq |= 1 << pin;
        Ok(())
    }

    fn unlock_as_irq(&self, bank: &str, pin: u32) {
        if let Some(pins) = self.banks.lock().get_mut(bank) {
            pins.irq &= !(1u32.checked_shl(pin).unwrap_or(0));
        }
    }
}
