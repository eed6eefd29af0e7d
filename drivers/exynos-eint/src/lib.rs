// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! External interrupt (EINT) controller of Samsung Exynos pin banks.
//!
//! Pins of interrupt capable banks are exposed as virtual interrupts through
//! one [`IrqDomain`] per bank. Two kinds of banks exist:
//!
//! - GPIO interrupt banks share a single parent line. The service register
//!   names the bank group and pin that fired.
//! - Wakeup banks either own one parent line per pin, or share a muxed line
//!   whose handler scans the pending and mask registers of every muxed bank.
//!
//! Wakeup capable pins feed the wake mask returned by
//! [`get_eint_wake_mask`], which the sleep sequencer programs before the
//! system suspends.
//!
//! # Example
//!
//! ```ignore
//! use exynos_eint::{soc::EXYNOS4210_PIN_CTRL, ControllerConfig, IrqType, PinController};
//!
//! let ctrl = PinController::probe(&EXYNOS4210_PIN_CTRL[0], cfg)?;
//! let virq = ctrl.gpio_to_irq("gpa0", 3)?;
//! ctrl.irq_core().set_irq_type(virq, IrqType::EDGE_FALLING)?;
//! ctrl.irq_core().request_irq(virq, |_| IrqReturn::Handled)?;
//!
//! // from the parent controller's interrupt entry
//! ctrl.handle_parent_irq(line);
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;
extern crate alloc;

pub mod bank;
pub mod chip;
pub mod controller;
mod demux;
pub mod domain;
mod error;
pub mod gpio;
mod init;
pub mod io;
pub mod irq;
pub mod of;
pub mod parent;
mod pm;
pub mod regs;
#[cfg(feature = "soc-tables")]
pub mod soc;
mod wake;

pub use bank::{EintType, PinBank, PinBankDesc};
pub use chip::{EXYNOS_GPIO_IRQ_CHIP, EXYNOS_WKUP_IRQ_CHIP, EintChip};
pub use controller::{ControllerConfig, EintFeatures, PinController, PinCtrlDesc};
pub use domain::IrqDomain;
pub use error::{EintError, EintResult};
pub use gpio::{GpioIrqLocks, GpioIrqOwner};
pub use io::{MmioRegion, RegisterIo};
pub use irq::{FlowHandler, IrqCore, IrqReturn, IrqType, VirtIrq};
pub use of::DeviceNode;
pub use parent::{ParentIrq, ParentIrqChip};
pub use wake::get_eint_wake_mask;

#[doc(hidden)]
pub mod __priv {
    pub use log::warn;
}
