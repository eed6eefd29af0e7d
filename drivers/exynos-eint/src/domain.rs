// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Linear IRQ domains, one per interrupt capable bank.

use alloc::{
    sync::{Arc, Weak},
    vec::Vec,
};
use core::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use kspin::SpinNoIrq;

use crate::{
    EintError, EintResult,
    bank::PinBank,
    chip::EintChip,
    irq::{IrqCore, IrqType, VirtIrq},
    regs::EXYNOS_EINT_MAX_PER_BANK,
};

/// Maps the hardware pins of one bank to virtual interrupts.
///
/// Mappings are created lazily by [`IrqDomain::map`] and live until
/// disposed or until the domain is removed.
pub struct IrqDomain {
    name: &'static str,
    chip: &'static EintChip,
    host: Weak<PinBank>,
    core: Arc<IrqCore>,
    slot: usize,
    removed: AtomicBool,
    revmap: SpinNoIrq<Vec<Option<VirtIrq>>>,
}

impl IrqDomain {
    /// Creates a domain of `bank.nr_pins()` entries whose mappings are driven
    /// by `chip`.
    pub fn add_linear(
        core: &Arc<IrqCore>,
        bank: &Arc<PinBank>,
        chip: &'static EintChip,
    ) -> EintResult<Arc<Self>> {
        if bank.nr_pins() > EXYNOS_EINT_MAX_PER_BANK {
            return Err(crate::eint_err!(
                DomainCreateFailed,
                format_args!("{}: {} pins exceed the EINT block", bank.name(), bank.nr_pins())
            ));
        }
        let size = bank.nr_pins() as usize;
        let slot = core.reserve_domain()?;
        let mut revmap = Vec::new();
        if revmap.try_reserve_exact(size).is_err() {
            core.release_domain(slot);
            return Err(EintError::OutOfMemory);
        }
        revmap.resize(size, None);
        trace!("{}: irq domain of {size} pins ({})", bank.name(), chip.name);
        Ok(Arc::new(Self {
            name: bank.name(),
            chip,
            host: Arc::downgrade(bank),
            core: core.clone(),
            slot,
            removed: AtomicBool::new(false),
            revmap: SpinNoIrq::new(revmap),
        }))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn chip(&self) -> &'static EintChip {
        self.chip
    }

    pub fn size(&self) -> u32 {
        self.revmap.lock().len() as u32
    }

    /// Returns the virtual interrupt of `hwirq`, creating it on first use.
    pub fn map(&self, hwirq: u32) -> EintResult<VirtIrq> {
        if self.is_removed() {
            return Err(EintError::InvalidPin);
        }
        let mut revmap = self.revmap.lock();
        let entry = revmap
            .get_mut(hwirq as usize)
            .ok_or(EintError::InvalidPin)?;
        if let Some(virq) = *entry {
            return Ok(virq);
        }
        let bank = self.host.upgrade().ok_or(EintError::InvalidPin)?;
        let virq = self.core.alloc_desc(hwirq, self.chip, &bank)?;
        *entry = Some(virq);
        debug!("{}: hwirq {hwirq} mapped to irq {virq}", self.name);
        Ok(virq)
    }

    /// Returns the virtual interrupt of `hwirq` if it is mapped.
    pub fn find_mapping(&self, hwirq: u32) -> Option<VirtIrq> {
        self.revmap.lock().get(hwirq as usize).copied().flatten()
    }

    /// Removes the mapping of `hwirq` and frees its descriptor.
    pub fn dispose_mapping(&self, hwirq: u32) {
        let virq = self
            .revmap
            .lock()
            .get_mut(hwirq as usize)
            .and_then(Option::take);
        if let Some(virq) = virq {
            self.core.free_desc(virq);
        }
    }

    /// Translates a two-cell interrupt specifier `<pin flags>`.
    pub fn xlate_twocell(&self, intspec: &[u32]) -> EintResult<(u32, IrqType)> {
        match intspec {
            [hwirq, flags, ..] => Ok((
                *hwirq,
                IrqType::from_bits_truncate(*flags) & (IrqType::EDGE_BOTH | IrqType::LEVEL_MASK),
            )),
            _ => Err(EintError::InvalidPin),
        }
    }

    /// Disposes all mappings and releases the domain slot.
    pub fn remove(&self) {
        if self.removed.swap(true, Ordering::AcqRel) {
            return;
        }
        let virqs: Vec<VirtIrq> = self
            .revmap
            .lock()
            .iter_mut()
            .filter_map(Option::take)
            .collect();
        for virq in virqs {
            self.core.free_desc(virq);
        }
        self.core.release_domain(self.slot);
        debug!("{}: irq domain removed", self.name);
    }

    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for IrqDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IrqDomain")
            .field("name", &self.name)
            .field("chip", &self.chip.name)
            .field("slot", &self.slot)
            .finish()
    }
}
