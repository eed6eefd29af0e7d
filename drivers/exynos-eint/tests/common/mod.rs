#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    ops::Range,
    sync::{Arc, Mutex},
};

use exynos_eint::{
    ControllerConfig, DeviceNode, GpioIrqLocks, IrqCore, ParentIrq, ParentIrqChip,
    PinController, PinCtrlDesc, RegisterIo,
};

/// Write-1-to-clear pending registers.
const PEND_RANGE: Range<usize> = 0xa00..0xb00;

#[derive(Default)]
struct RegFile {
    regs: BTreeMap<usize, u32>,
    journal: Vec<(usize, u32)>,
}

/// A register file that records every write.
#[derive(Default)]
pub struct FakeRegs(Mutex<RegFile>);

impl FakeRegs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Sets a register as the hardware would, bypassing the journal.
    pub fn set_raw(&self, offset: usize, val: u32) {
        self.0.lock().unwrap().regs.insert(offset, val);
    }

    pub fn get(&self, offset: usize) -> u32 {
        self.0.lock().unwrap().regs.get(&offset).copied().unwrap_or(0)
    }

    pub fn journal(&self) -> Vec<(usize, u32)> {
        self.0.lock().unwrap().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.0.lock().unwrap().journal.clear();
    }

    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.journal()
            .into_iter()
            .filter(|(off, _)| *off == offset)
            .map(|(_, val)| val)
            .collect()
    }
}

impl RegisterIo for FakeRegs {
    fn read32(&self, offset: usize) -> u32 {
        self.get(offset)
    }

    fn write32(&self, offset: usize, val: u32) {
        let mut file = self.0.lock().unwrap();
        file.journal.push((offset, val));
        if PEND_RANGE.contains(&offset) {
            *file.regs.entry(offset).or_default() &= !val;
        } else {
            file.regs.insert(offset, val);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentCall {
    Mask(u32),
    Unmask(u32),
    Ack(u32),
    Eoi(u32),
}

/// A parent interrupt controller recording the calls it receives.
pub struct FakeParent {
    calls: Mutex<Vec<ParentCall>>,
    ack: bool,
    eoi: bool,
}

impl FakeParent {
    pub fn new(ack: bool, eoi: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            ack,
            eoi,
        })
    }

    pub fn calls(&self) -> Vec<ParentCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: ParentCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ParentIrqChip for FakeParent {
    fn mask(&self, irq: ParentIrq) {
        self.record(ParentCall::Mask(irq.0));
    }

    fn unmask(&self, irq: ParentIrq) {
        self.record(ParentCall::Unmask(irq.0));
    }

    fn has_ack(&self) -> bool {
        self.ack
    }

    fn ack(&self, irq: ParentIrq) {
        self.record(ParentCall::Ack(irq.0));
    }

    fn has_eoi(&self) -> bool {
        self.eoi
    }

    fn eoi(&self, irq: ParentIrq) {
        self.record(ParentCall::Eoi(irq.0));
    }
}

pub struct Harness {
    pub regs: Arc<FakeRegs>,
    pub parent: Arc<FakeParent>,
    pub gpio: Arc<GpioIrqLocks>,
    pub core: Arc<IrqCore>,
    pub ctrl: PinController,
}

pub struct HarnessBuilder {
    desc: &'static PinCtrlDesc,
    irq: Option<u32>,
    node: DeviceNode,
    gpio_base: u32,
    nr_irqs: usize,
    max_domains: usize,
    parent: Arc<FakeParent>,
}

impl HarnessBuilder {
    pub fn irq(mut self, irq: Option<u32>) -> Self {
        self.irq = irq;
        self
    }

    pub fn node(mut self, node: DeviceNode) -> Self {
        self.node = node;
        self
    }

    pub fn gpio_base(mut self, base: u32) -> Self {
        self.gpio_base = base;
        self
    }

    pub fn nr_irqs(mut self, nr: usize) -> Self {
        self.nr_irqs = nr;
        self
    }

    pub fn max_domains(mut self, nr: usize) -> Self {
        self.max_domains = nr;
        self
    }

    pub fn parent(mut self, parent: Arc<FakeParent>) -> Self {
        self.parent = parent;
        self
    }

    fn config(&self) -> (Arc<FakeRegs>, Arc<GpioIrqLocks>, Arc<IrqCore>, ControllerConfig) {
        let regs = FakeRegs::new();
        let gpio = Arc::new(GpioIrqLocks::new());
        let core = Arc::new(IrqCore::new(self.nr_irqs, self.max_domains));
        let cfg = ControllerConfig {
            regs: regs.clone(),
            irq: self.irq.map(ParentIrq),
            node: self.node.clone(),
            gpio_base: self.gpio_base,
            irq_core: core.clone(),
            parent: self.parent.clone(),
            gpio: gpio.clone(),
        };
        (regs, gpio, core, cfg)
    }

    /// Builds the controller without running any setup hook.
    pub fn build(self) -> Harness {
        let (regs, gpio, core, cfg) = self.config();
        Harness {
            regs,
            parent: self.parent,
            gpio,
            core,
            ctrl: PinController::new(self.desc, cfg),
        }
    }

    pub fn probe(self) -> exynos_eint::EintResult<Harness> {
        let (regs, gpio, core, cfg) = self.config();
        Ok(Harness {
            regs,
            parent: self.parent,
            gpio,
            core,
            ctrl: PinController::probe(self.desc, cfg)?,
        })
    }
}

pub const GPIO_LINE: u32 = 20;

pub fn harness(desc: &'static PinCtrlDesc) -> HarnessBuilder {
    init_logger();
    HarnessBuilder {
        desc,
        irq: Some(GPIO_LINE),
        node: DeviceNode::new("pinctrl"),
        gpio_base: 0,
        nr_irqs: 512,
        max_domains: 64,
        parent: FakeParent::new(true, false),
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
