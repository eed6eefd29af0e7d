// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Pin controller instances.
//!
//! A [`PinController`] ties a [`PinCtrlDesc`] to a register window, its
//! configuration node and the interrupt collaborators, and routes the lines
//! of the parent controller to the matching demultiplexer.

use alloc::{collections::BTreeMap, sync::Arc, vec::Vec};
use core::fmt;

use bitflags::bitflags;
use kspin::SpinNoIrq;
use lazyinit::LazyInit;

use crate::{
    EintError, EintResult,
    bank::{PinBank, PinBankDesc},
    demux,
    gpio::GpioIrqOwner,
    init,
    io::RegisterIo,
    irq::{IrqCore, IrqReturn, VirtIrq},
    of::DeviceNode,
    parent::{ParentIrq, ParentIrqChip},
    pm,
};

bitflags! {
    /// Interrupt related hooks a controller runs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EintFeatures: u32 {
        /// GPIO interrupts on the controller's own line.
        const GPIO_INIT = 1 << 0;
        /// Wakeup interrupts through the wakeup-eint child node.
        const WKUP_INIT = 1 << 1;
        /// Register save/restore and filter switching across suspend.
        const SUSPEND_RESUME = 1 << 2;
    }
}

/// Static description of one pin controller of a SoC.
#[derive(Debug)]
pub struct PinCtrlDesc {
    pub label: &'static str,
    pub banks: &'static [PinBankDesc],
    pub features: EintFeatures,
}

impl PinCtrlDesc {
    pub fn nr_pins(&self) -> u32 {
        self.banks.iter().map(|b| b.nr_pins as u32).sum()
    }
}

/// Runtime configuration of a controller instance.
pub struct ControllerConfig {
    /// Register window of the controller.
    pub regs: Arc<dyn RegisterIo>,
    /// Parent line of the GPIO interrupts, if the controller has one.
    pub irq: Option<ParentIrq>,
    /// Configuration node. Bank nodes are children named after the banks.
    pub node: DeviceNode,
    /// GPIO number of the first pin.
    pub gpio_base: u32,
    pub irq_core: Arc<IrqCore>,
    pub parent: Arc<dyn ParentIrqChip>,
    pub gpio: Arc<dyn GpioIrqOwner>,
}

/// A pin of a dedicated-line wakeup bank.
#[derive(Debug, Clone)]
pub struct WeintData {
    pub bank: Arc<PinBank>,
    pub irq: u32,
}

/// Banks sharing the muxed wakeup line, in bank order.
#[derive(Debug)]
pub struct MuxedWeintData {
    pub banks: Vec<Arc<PinBank>>,
}

/// Handler chained to a parent line.
#[derive(Debug)]
pub(crate) enum ParentRoute {
    Gpio,
    Dedicated {
        table: Arc<Vec<WeintData>>,
        index: usize,
    },
    Muxed,
}

/// A pin controller instance.
pub struct PinController {
    desc: &'static PinCtrlDesc,
    regs: Arc<dyn RegisterIo>,
    irq: Option<ParentIrq>,
    node: DeviceNode,
    gpio_base: u32,
    irq_core: Arc<IrqCore>,
    parent: Arc<dyn ParentIrqChip>,
    banks: Vec<Arc<PinBank>>,
    routes: SpinNoIrq<BTreeMap<ParentIrq, Arc<ParentRoute>>>,
    muxed: LazyInit<MuxedWeintData>,
}

impl PinController {
    /// Instantiates the banks of `desc`. No interrupt is set up yet.
    pub fn new(desc: &'static PinCtrlDesc, cfg: ControllerConfig) -> Self {
        let banks = desc
            .banks
            .iter()
            .map(|b| {
                Arc::new(PinBank::new(
                    *b,
                    cfg.regs.clone(),
                    cfg.gpio.clone(),
                    cfg.node.find_child(b.name).cloned(),
                ))
            })
            .collect();
        Self {
            desc,
            regs: cfg.regs,
            irq: cfg.irq,
            node: cfg.node,
            gpio_base: cfg.gpio_base,
            irq_core: cfg.irq_core,
            parent: cfg.parent,
            banks,
            routes: SpinNoIrq::new(BTreeMap::new()),
            muxed: LazyInit::new(),
        }
    }

    /// Instantiates the controller and runs the interrupt setup hooks its
    /// description enables.
    ///
    /// A missing wakeup interrupt controller is not an error.
    pub fn probe(desc: &'static PinCtrlDesc, cfg: ControllerConfig) -> EintResult<Self> {
        let ctrl = Self::new(desc, cfg);
        if desc.features.contains(EintFeatures::GPIO_INIT) {
            ctrl.eint_gpio_init()?;
        }
        if desc.features.contains(EintFeatures::WKUP_INIT) {
            match ctrl.eint_wkup_init() {
                Ok(()) => {}
                Err(EintError::NotPresent) => {
                    warn!("{}: no wakeup interrupt controller", desc.label)
                }
                Err(e) => return Err(e),
            }
        }
        info!("{}: {} banks, {} pins", desc.label, ctrl.banks.len(), desc.nr_pins());
        Ok(ctrl)
    }

    /// Sets up the GPIO interrupt line and the domains of the GPIO banks.
    pub fn eint_gpio_init(&self) -> EintResult {
        init::eint_gpio_init(self)
    }

    /// Sets up the wakeup interrupts described by the wakeup-eint child node.
    pub fn eint_wkup_init(&self) -> EintResult {
        init::eint_wkup_init(self)
    }

    pub fn suspend(&self) {
        if self.desc.features.contains(EintFeatures::SUSPEND_RESUME) {
            pm::suspend(self);
        }
    }

    pub fn resume(&self) {
        if self.desc.features.contains(EintFeatures::SUSPEND_RESUME) {
            pm::resume(self);
        }
    }

    /// Entry point for an interrupt on parent line `irq`.
    pub fn handle_parent_irq(&self, irq: ParentIrq) -> IrqReturn {
        let route = self.routes.lock().get(&irq).cloned();
        match route.as_deref() {
            Some(ParentRoute::Gpio) => demux::eint_gpio_irq(self),
            Some(ParentRoute::Dedicated { table, index }) => match table.get(*index) {
                Some(eintd) => demux::irq_eint0_15(self, irq, eintd),
                None => IrqReturn::None,
            },
            Some(ParentRoute::Muxed) => demux::irq_demux_eint16_31(self, irq),
            None => {
                warn!("{}: unexpected parent irq {irq}", self.desc.label);
                IrqReturn::None
            }
        }
    }

    pub(crate) fn route(&self, irq: ParentIrq, route: ParentRoute) -> EintResult {
        let mut routes = self.routes.lock();
        if routes.contains_key(&irq) {
            return Err(EintError::IrqRequestFailed);
        }
        routes.insert(irq, Arc::new(route));
        Ok(())
    }

    pub(crate) fn route_chained(&self, irq: ParentIrq, route: ParentRoute) {
        if self.routes.lock().insert(irq, Arc::new(route)).is_some() {
            warn!("{}: parent irq {irq} handler replaced", self.desc.label);
        }
    }

    pub(crate) fn unroute(&self, irq: ParentIrq) {
        self.routes.lock().remove(&irq);
    }

    /// Whether a demultiplexer is chained to `irq`.
    pub fn is_routed(&self, irq: ParentIrq) -> bool {
        self.routes.lock().contains_key(&irq)
    }

    pub(crate) fn set_muxed(&self, data: MuxedWeintData) {
        if self.muxed.call_once(|| data).is_none() {
            warn!("{}: muxed wakeup group already set", self.desc.label);
        }
    }

    /// The muxed wakeup group, once wakeup init has built it.
    pub fn muxed_group(&self) -> Option<&MuxedWeintData> {
        self.muxed.get()
    }

    /// Linux-style GPIO number of wakeup EINT `eint`.
    ///
    /// Banks listed before the first `gpa` bank are not counted as EINTs.
    pub fn eint_to_pin_num(&self, eint: u32) -> u32 {
        let etc_offset: u32 = self
            .desc
            .banks
            .iter()
            .take_while(|b| !b.name.starts_with("gpa"))
            .map(|b| b.nr_pins as u32)
            .sum();
        self.gpio_base + eint + etc_offset
    }

    /// Virtual interrupt of `bank`-`pin`, mapping it on first use.
    pub fn gpio_to_irq(&self, bank: &str, pin: u32) -> EintResult<VirtIrq> {
        let bank = self.bank(bank).ok_or(EintError::InvalidPin)?;
        let domain = bank.irq_domain().ok_or(EintError::InvalidPin)?;
        domain.map(pin)
    }

    pub fn desc(&self) -> &'static PinCtrlDesc {
        self.desc
    }

    pub fn label(&self) -> &'static str {
        self.desc.label
    }

    pub fn irq(&self) -> Option<ParentIrq> {
        self.irq
    }

    pub fn node(&self) -> &DeviceNode {
        &self.node
    }

    pub fn gpio_base(&self) -> u32 {
        self.gpio_base
    }

    pub fn regs(&self) -> &dyn RegisterIo {
        self.regs.as_ref()
    }

    pub fn irq_core(&self) -> &Arc<IrqCore> {
        &self.irq_core
    }

    pub fn parent(&self) -> &dyn ParentIrqChip {
        self.parent.as_ref()
    }

    pub fn banks(&self) -> &[Arc<PinBank>] {
        &self.banks
    }

    pub fn bank(&self, name: &str) -> Option<&Arc<PinBank>> {
        self.banks.iter().find(|b| b.name() == name)
    }
}

impl fmt::Debug for PinController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinController")
            .field("label", &self.desc.label)
            .field("irq", &self.irq)
            .field("gpio_base", &self.gpio_base)
            .field("banks", &self.banks)
            .finish()
    }
}
