// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Configuration nodes describing a pin controller and its wakeup block.

use alloc::{string::String, vec::Vec};

use crate::parent::ParentIrq;

/// Compatible strings of the supported wakeup interrupt controllers.
pub const EXYNOS_WKUP_IRQ_IDS: &[&str] = &["samsung,exynos4210-wakeup-eint"];

/// A device configuration node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceNode {
    pub name: String,
    pub compatible: Vec<String>,
    /// The `interrupts` property. `None` when the property is absent; an
    /// entry of `None` is a specifier that cannot be mapped.
    pub interrupts: Option<Vec<Option<ParentIrq>>>,
    pub children: Vec<DeviceNode>,
}

impl DeviceNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_compatible(mut self, compatible: &str) -> Self {
        self.compatible.push(compatible.into());
        self
    }

    /// Sets the `interrupts` property to lines that all resolve.
    pub fn with_interrupts(mut self, irqs: &[u32]) -> Self {
        self.interrupts = Some(irqs.iter().map(|&irq| Some(ParentIrq(irq))).collect());
        self
    }

    /// Sets the `interrupts` property, allowing unresolvable entries.
    pub fn with_raw_interrupts(mut self, irqs: Vec<Option<ParentIrq>>) -> Self {
        self.interrupts = Some(irqs);
        self
    }

    pub fn with_child(mut self, child: DeviceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_compatible(&self, ids: &[&str]) -> bool {
        self.compatible.iter().any(|c| ids.contains(&c.as_str()))
    }

    pub fn has_interrupts(&self) -> bool {
        self.interrupts.is_some()
    }

    /// Resolves the `index`-th entry of the `interrupts` property.
    pub fn irq_of_parse_and_map(&self, index: usize) -> Option<ParentIrq> {
        self.interrupts.as_ref()?.get(index).copied().flatten()
    }

    pub fn find_child(&self, name: &str) -> Option<&DeviceNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child matching one of `ids`.
    pub fn find_compatible_child(&self, ids: &[&str]) -> Option<&DeviceNode> {
        self.children.iter().find(|c| c.is_compatible(ids))
    }
}
