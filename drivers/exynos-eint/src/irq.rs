// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Generic interrupt core.
//!
//! [`IrqCore`] owns the virtual interrupt descriptor table. Each descriptor
//! binds a virtual interrupt to a hardware pin of a bank and to the
//! [`EintChip`] driving it, and carries the flow handler selected by the last
//! trigger type change.

use alloc::{
    sync::{Arc, Weak},
    vec::Vec,
};
use core::{fmt, num::NonZeroU32};

use bitflags::bitflags;
use kspin::SpinNoIrq;

use crate::{EintError, EintResult, bank::PinBank, chip::EintChip};

bitflags! {
    /// Interrupt trigger type, using the generic `IRQ_TYPE_*` encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IrqType: u32 {
        const EDGE_RISING = 0x1;
        const EDGE_FALLING = 0x2;
        const EDGE_BOTH = Self::EDGE_RISING.bits() | Self::EDGE_FALLING.bits();
        const LEVEL_HIGH = 0x4;
        const LEVEL_LOW = 0x8;
        const LEVEL_MASK = Self::LEVEL_HIGH.bits() | Self::LEVEL_LOW.bits();
    }
}

impl IrqType {
    /// No trigger configured.
    pub const NONE: Self = Self::empty();

    pub fn is_level(self) -> bool {
        self.intersects(Self::LEVEL_MASK)
    }

    pub fn is_edge(self) -> bool {
        self.intersects(Self::EDGE_BOTH)
    }
}

/// Flow handler run by [`IrqCore::generic_handle_irq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowHandler {
    /// Mask and ack before the action, unmask after it.
    #[default]
    Level,
    /// Ack before the action; the line stays unmasked.
    Edge,
}

/// Result of handling an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqReturn {
    /// The interrupt was not serviced.
    None,
    /// The interrupt was serviced.
    Handled,
}

/// A virtual interrupt number. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtIrq(NonZeroU32);

impl VirtIrq {
    pub const fn new(irq: u32) -> Option<Self> {
        match NonZeroU32::new(irq) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for VirtIrq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An interrupt action.
pub type IrqHandler = Arc<dyn Fn(VirtIrq) -> IrqReturn + Send + Sync>;

/// The per-call view a chip operation works on.
#[derive(Debug, Clone)]
pub struct IrqData {
    pub virq: VirtIrq,
    pub hwirq: u32,
    pub trigger: IrqType,
    pub bank: Arc<PinBank>,
}

struct DescState {
    flow: FlowHandler,
    trigger: IrqType,
    action: Option<IrqHandler>,
    wake: bool,
    count: u64,
}

/// Descriptor of one virtual interrupt.
pub struct IrqDesc {
    virq: VirtIrq,
    hwirq: u32,
    chip: &'static EintChip,
    bank: Weak<PinBank>,
    state: SpinNoIrq<DescState>,
}

impl IrqDesc {
    pub fn virq(&self) -> VirtIrq {
        self.virq
    }

    pub fn hwirq(&self) -> u32 {
        self.hwirq
    }

    pub fn chip(&self) -> &'static EintChip {
        self.chip
    }

    /// The bank of the pin, unless its controller is gone.
    pub fn bank(&self) -> Option<Arc<PinBank>> {
        self.bank.upgrade()
    }

    pub fn flow(&self) -> FlowHandler {
        self.state.lock().flow
    }

    pub fn trigger(&self) -> IrqType {
        self.state.lock().trigger
    }

    pub fn is_requested(&self) -> bool {
        self.state.lock().action.is_some()
    }

    pub fn wake_enabled(&self) -> bool {
        self.state.lock().wake
    }

    /// Number of times the flow handler ran for this interrupt.
    pub fn count(&self) -> u64 {
        self.state.lock().count
    }

    /// Chip operation view with the current trigger type.
    pub fn irq_data(&self) -> Option<IrqData> {
        self.data_with(self.trigger())
    }

    fn data_with(&self, trigger: IrqType) -> Option<IrqData> {
        Some(IrqData {
            virq: self.virq,
            hwirq: self.hwirq,
            trigger,
            bank: self.bank.upgrade()?,
        })
    }

    fn data_or_err(&self, trigger: IrqType) -> EintResult<IrqData> {
        self.data_with(trigger).ok_or(EintError::InvalidPin)
    }
}

impl fmt::Debug for IrqDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IrqDesc")
            .field("virq", &self.virq)
            .field("hwirq", &self.hwirq)
            .field("chip", &self.chip.name)
            .field("bank", &self.bank.upgrade().map(|b| b.name()))
            .finish()
    }
}

/// Virtual interrupt descriptor table and IRQ domain slots.
pub struct IrqCore {
    descs: SpinNoIrq<Vec<Option<Arc<IrqDesc>>>>,
    domains: SpinNoIrq<Vec<bool>>,
}

impl IrqCore {
    /// Creates a core with virtual interrupts `1..=nr_irqs` and at most
    /// `max_domains` live IRQ domains.
    pub fn new(nr_irqs: usize, max_domains: usize) -> Self {
        let mut descs = Vec::with_capacity(nr_irqs);
        descs.resize_with(nr_irqs, || None);
        let mut domains = Vec::with_capacity(max_domains);
        domains.resize(max_domains, false);
        Self {
            descs: SpinNoIrq::new(descs),
            domains: SpinNoIrq::new(domains),
        }
    }

    pub(crate) fn reserve_domain(&self) -> EintResult<usize> {
        let mut domains = self.domains.lock();
        let slot = domains
            .iter()
            .position(|used| !used)
            .ok_or(EintError::DomainCreateFailed)?;
        domains[slot] = true;
        Ok(slot)
    }

    pub(crate) fn release_domain(&self, slot: usize) {
        if let Some(used) = self.domains.lock().get_mut(slot) {
            *used = false;
        }
    }

    /// Number of live IRQ domains.
    pub fn nr_domains(&self) -> usize {
        self.domains.lock().iter().filter(|used| **used).count()
    }

    pub(crate) fn alloc_desc(
        &self,
        hwirq: u32,
        chip: &'static EintChip,
        bank: &Arc<PinBank>,
    ) -> EintResult<VirtIrq> {
        let mut descs = self.descs.lock();
        let idx = descs
            .iter()
            .position(Option::is_none)
            .ok_or(EintError::NoFreeIrq)?;
        let virq = u32::try_from(idx + 1)
            .ok()
            .and_then(VirtIrq::new)
            .ok_or(EintError::NoFreeIrq)?;
        descs[idx] = Some(Arc::new(IrqDesc {
            virq,
            hwirq,
            chip,
            bank: Arc::downgrade(bank),
            state: SpinNoIrq::new(DescState {
                flow: FlowHandler::Level,
                trigger: IrqType::NONE,
                action: None,
                wake: false,
                count: 0,
            }),
        }));
        Ok(virq)
    }

    pub(crate) fn free_desc(&self, virq: VirtIrq) {
        if let Some(slot) = self.descs.lock().get_mut(virq.get() as usize - 1) {
            *slot = None;
        }
    }

    /// Looks up the descriptor of `virq`.
    pub fn irq_desc(&self, virq: VirtIrq) -> Option<Arc<IrqDesc>> {
        self.descs
            .lock()
            .get(virq.get() as usize - 1)
            .and_then(Clone::clone)
    }

    fn desc_or_err(&self, virq: VirtIrq) -> EintResult<Arc<IrqDesc>> {
        self.irq_desc(virq).ok_or(EintError::InvalidPin)
    }

    /// Changes the trigger type of `virq` and installs the flow handler the
    /// chip selects for it.
    pub fn set_irq_type(&self, virq: VirtIrq, ty: IrqType) -> EintResult {
        let desc = self.desc_or_err(virq)?;
        let mut state = desc.state.lock();
        let flow = desc.chip.set_type(&desc.data_or_err(state.trigger)?, ty)?;
        state.flow = flow;
        state.trigger = ty;
        Ok(())
    }

    /// Enables or disables `virq` as a system wakeup source.
    pub fn set_irq_wake(&self, virq: VirtIrq, on: bool) -> EintResult {
        let desc = self.desc_or_err(virq)?;
        desc.chip.set_wake(&desc.data_or_err(desc.trigger())?, on)?;
        desc.state.lock().wake = on;
        Ok(())
    }

    /// Installs `handler` on `virq`, claims the pin and unmasks it.
    pub fn request_irq<F>(&self, virq: VirtIrq, handler: F) -> EintResult
    where
        F: Fn(VirtIrq) -> IrqReturn + Send + Sync + 'static,
    {
        let desc = self.desc_or_err(virq)?;
        let data = {
            let mut state = desc.state.lock();
            if state.action.is_some() {
                return Err(EintError::AlreadyRequested);
            }
            let data = desc.data_or_err(state.trigger)?;
            desc.chip.request_resources(&data)?;
            state.action = Some(Arc::new(handler));
            data
        };
        desc.chip.unmask(&data);
        debug!("irq {virq}: requested on {}-{}", data.bank.name(), desc.hwirq);
        Ok(())
    }

    /// Masks `virq`, releases the pin and returns the removed handler.
    ///
    /// Freeing an interrupt without a handler touches no register.
    pub fn free_irq(&self, virq: VirtIrq) -> EintResult<Option<IrqHandler>> {
        let desc = self.desc_or_err(virq)?;
        let (action, trigger) = {
            let mut state = desc.state.lock();
            (state.action.take(), state.trigger)
        };
        if let (Some(_), Some(data)) = (&action, desc.data_with(trigger)) {
            desc.chip.mask(&data);
            desc.chip.release_resources(&data);
            debug!("irq {virq}: freed");
        }
        Ok(action)
    }

    /// Runs the flow handler of `virq`.
    pub fn generic_handle_irq(&self, virq: VirtIrq) -> IrqReturn {
        let Some(desc) = self.irq_desc(virq) else {
            warn!("irq {virq}: no descriptor");
            return IrqReturn::None;
        };
        let (flow, trigger, action) = {
            let mut state = desc.state.lock();
            state.count += 1;
            (state.flow, state.trigger, state.action.clone())
        };
        let Some(data) = desc.data_with(trigger) else {
            warn!("irq {virq}: bank is gone");
            return IrqReturn::None;
        };
        let chip = desc.chip;
        match flow {
            FlowHandler::Level => {
                chip.mask(&data);
                chip.ack(&data);
                match action {
                    Some(action) => {
                        let ret = action(virq);
                        chip.unmask(&data);
                        ret
                    }
                    None => IrqReturn::None,
                }
            }
            FlowHandler::Edge => {
                chip.ack(&data);
                match action {
                    Some(action) => action(virq),
                    None => {
                        chip.mask(&data);
                        IrqReturn::None
                    }
                }
            }
        }
    }
}

impl fmt::Debug for IrqCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descs = self.descs.lock();
        f.debug_struct("IrqCore")
            .field("nr_irqs", &descs.len())
            .field("mapped", &descs.iter().filter(|d| d.is_some()).count())
            .finish()
    }
}
