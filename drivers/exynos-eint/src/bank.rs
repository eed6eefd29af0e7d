// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Pin bank registry.
//!
//! A [`PinBankDesc`] is the static description of a bank as found in the SoC
//! tables. A [`PinBank`] is its runtime instance, bound to a controller's
//! register window, holding the bank lock, the IRQ domain and the suspend
//! save slot.

use alloc::sync::Arc;
use core::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

use kspin::{SpinNoIrq, SpinNoIrqGuard};
use strum::FromRepr;

use crate::{domain::IrqDomain, gpio::GpioIrqOwner, io::RegisterIo, of::DeviceNode};

/// Index of a pin configuration field in [`PinBankType`].
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCfgType {
    Func = 0,
    Dat,
    Pud,
    Drv,
    ConPdn,
    PudPdn,
}

const PINCFG_TYPE_NUM: usize = 6;

/// Field widths and register offsets of the configuration registers of a
/// bank, indexed by [`PinCfgType`]. A width of 0 means the bank lacks the
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBankType {
    pub fld_width: [u8; PINCFG_TYPE_NUM],
    pub reg_offset: [u32; PINCFG_TYPE_NUM],
}

impl PinBankType {
    /// Register offset, bit shift and field mask of `pin`'s `cfg` field,
    /// relative to the bank's `pctl_offset`.
    pub const fn field(&self, cfg: PinCfgType, pin: u32) -> (usize, u32, u32) {
        let width = self.fld_width[cfg as usize] as u32;
        let mask = (1u32 << width) - 1;
        (self.reg_offset[cfg as usize] as usize, pin * width, mask)
    }
}

pub static BANK_TYPE_0: PinBankType = PinBankType {
    fld_width: [4, 1, 2, 2, 2, 2],
    reg_offset: [0x00, 0x04, 0x08, 0x0c, 0x10, 0x14],
};

pub static BANK_TYPE_1: PinBankType = PinBankType {
    fld_width: [4, 1, 2, 2, 0, 0],
    reg_offset: [0x00, 0x04, 0x08, 0x0c, 0x00, 0x00],
};

pub static BANK_TYPE_4: PinBankType = PinBankType {
    fld_width: [4, 1, 2, 3, 2, 2],
    reg_offset: [0x00, 0x04, 0x08, 0x0c, 0x10, 0x14],
};

pub static BANK_TYPE_5: PinBankType = PinBankType {
    fld_width: [4, 1, 2, 3, 0, 0],
    reg_offset: [0x00, 0x04, 0x08, 0x0c, 0x00, 0x00],
};

/// Electrical-interrupt class of a bank.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
pub enum EintType {
    /// No interrupt capability.
    None = 0,
    /// Served by the shared GPIO interrupt line.
    Gpio,
    /// Wakeup capable, one parent line per pin.
    Wakeup,
    /// Wakeup capable, sharing one parent line with other banks.
    WakeupMuxed,
}

impl EintType {
    /// Whether the bank belongs to the wakeup interrupt controller.
    pub const fn is_wakeup(self) -> bool {
        matches!(self, Self::Wakeup | Self::WakeupMuxed)
    }
}

/// Static description of a pin bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBankDesc {
    pub bank_type: &'static PinBankType,
    pub pctl_offset: u32,
    pub nr_pins: u8,
    pub eint_type: EintType,
    pub eint_offset: u32,
    pub name: &'static str,
}

impl PinBankDesc {
    /// A bank whose pins are served by the GPIO interrupt line.
    pub const fn eintg(
        bank_type: &'static PinBankType,
        nr_pins: u8,
        pctl_offset: u32,
        name: &'static str,
        eint_offset: u32,
    ) -> Self {
        Self {
            bank_type,
            pctl_offset,
            nr_pins,
            eint_type: EintType::Gpio,
            eint_offset,
            name,
        }
    }

    /// A bank without interrupt support.
    pub const fn eintn(
        bank_type: &'static PinBankType,
        nr_pins: u8,
        pctl_offset: u32,
        name: &'static str,
    ) -> Self {
        Self {
            bank_type,
            pctl_offset,
            nr_pins,
            eint_type: EintType::None,
            eint_offset: 0,
            name,
        }
    }

    /// A bank served by the wakeup interrupt controller.
    pub const fn eintw(
        bank_type: &'static PinBankType,
        nr_pins: u8,
        pctl_offset: u32,
        name: &'static str,
        eint_offset: u32,
    ) -> Self {
        Self {
            bank_type,
            pctl_offset,
            nr_pins,
            eint_type: EintType::Wakeup,
            eint_offset,
            name,
        }
    }
}

/// Interrupt configuration of a GPIO bank kept across suspend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EintGpioSave {
    pub eint_con: u32,
    pub eint_fltcon0: u32,
    pub eint_fltcon1: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SaveSlot {
    Unallocated,
    Empty,
    Saved(EintGpioSave),
}

/// Runtime instance of a pin bank.
pub struct PinBank {
    desc: PinBankDesc,
    eint_type: AtomicU8,
    regs: Arc<dyn RegisterIo>,
    gpio: Arc<dyn GpioIrqOwner>,
    of_node: Option<DeviceNode>,
    slock: SpinNoIrq<()>,
    domain: SpinNoIrq<Option<Arc<IrqDomain>>>,
    save: SpinNoIrq<SaveSlot>,
}

impl PinBank {
    pub fn new(
        desc: PinBankDesc,
        regs: Arc<dyn RegisterIo>,
        gpio: Arc<dyn GpioIrqOwner>,
        of_node: Option<DeviceNode>,
    ) -> Self {
        Self {
            desc,
            eint_type: AtomicU8::new(desc.eint_type as u8),
            regs,
            gpio,
            of_node,
            slock: SpinNoIrq::new(()),
            domain: SpinNoIrq::new(None),
            save: SpinNoIrq::new(SaveSlot::Unallocated),
        }
    }

    pub fn desc(&self) -> &PinBankDesc {
        &self.desc
    }

    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    pub fn nr_pins(&self) -> u32 {
        self.desc.nr_pins as u32
    }

    pub fn eint_offset(&self) -> usize {
        self.desc.eint_offset as usize
    }

    pub fn of_node(&self) -> Option<&DeviceNode> {
        self.of_node.as_ref()
    }

    pub(crate) fn gpio(&self) -> &dyn GpioIrqOwner {
        self.gpio.as_ref()
    }

    /// Current electrical-interrupt class.
    pub fn eint_type(&self) -> EintType {
        EintType::from_repr(self.eint_type.load(Ordering::Acquire)).unwrap_or(EintType::None)
    }

    /// Moves a [`EintType::Wakeup`] bank to [`EintType::WakeupMuxed`].
    ///
    /// Returns `false` if the bank was not a dedicated-line wakeup bank.
    pub(crate) fn reclassify_muxed(&self) -> bool {
        self.eint_type
            .compare_exchange(
                EintType::Wakeup as u8,
                EintType::WakeupMuxed as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// The bank's IRQ domain, once created.
    pub fn irq_domain(&self) -> Option<Arc<IrqDomain>> {
        self.domain.lock().clone()
    }

    pub(crate) fn set_irq_domain(&self, domain: Option<Arc<IrqDomain>>) {
        *self.domain.lock() = domain;
    }

    pub(crate) fn take_irq_domain(&self) -> Option<Arc<IrqDomain>> {
        self.domain.lock().take()
    }

    /// Takes the bank lock for a read-modify-write sequence.
    pub fn lock_regs(&self) -> BankRegs<'_> {
        BankRegs {
            _guard: self.slock.lock(),
            regs: self.regs.as_ref(),
        }
    }

    /// Unlocked register read.
    #[inline]
    pub fn read32(&self, offset: usize) -> u32 {
        self.regs.read32(offset)
    }

    /// Unlocked single register write, for registers that need no
    /// read-modify-write.
    #[inline]
    pub fn write_single(&self, offset: usize, val: u32) {
        self.regs.write32(offset, val)
    }

    pub(crate) fn alloc_save_slot(&self) {
        let mut slot = self.save.lock();
        if *slot == SaveSlot::Unallocated {
            *slot = SaveSlot::Empty;
        }
    }

    pub(crate) fn has_save_slot(&self) -> bool {
        *self.save.lock() != SaveSlot::Unallocated
    }

    pub(crate) fn store_saved(&self, state: EintGpioSave) -> bool {
        let mut slot = self.save.lock();
        if *slot == SaveSlot::Unallocated {
            return false;
        }
        *slot = SaveSlot::Saved(state);
        true
    }

    pub(crate) fn take_saved(&self) -> Option<EintGpioSave> {
        let mut slot = self.save.lock();
        match *slot {
            SaveSlot::Saved(state) => {
                *slot = SaveSlot::Empty;
                Some(state)
            }
            _ => None,
        }
    }

    /// The saved interrupt configuration awaiting resume, if any.
    pub fn saved_state(&self) -> Option<EintGpioSave> {
        match *self.save.lock() {
            SaveSlot::Saved(state) => Some(state),
            _ => None,
        }
    }
}

impl fmt::Debug for PinBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinBank")
            .field("name", &self.desc.name)
            .field("nr_pins", &self.desc.nr_pins)
            .field("eint_type", &self.eint_type())
            .field("eint_offset", &format_args!("{:#x}", self.desc.eint_offset))
            .finish()
    }
}

/// Register access with the bank lock held.
pub struct BankRegs<'a> {
    _guard: SpinNoIrqGuard<'a, ()>,
    regs: &'a dyn RegisterIo,
}

impl BankRegs<'_> {
    #[inline]
    pub fn read(&self, offset: usize) -> u32 {
        self.regs.read32(offset)
    }

    #[inline]
    pub fn write(&self, offset: usize, val: u32) {
        self.regs.write32(offset, val)
    }

    /// Replaces the bits of `mask` in the register at `offset` with `val`.
    pub fn update_bits(&self, offset: usize, mask: u32, val: u32) {
        let old = self.read(offset);
        let new = (old & !mask) | (val & mask);
        trace!("reg {offset:#x}: {old:#010x} => {new:#010x}");
        self.write(offset, new);
    }
}
