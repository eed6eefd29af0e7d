// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Register layout of the Exynos external interrupt blocks.
//!
//! Per-bank registers are addressed as `block offset + bank eint_offset`,
//! except the filter control registers, which are twice as wide per bank.

use bitflags::bitflags;

/// External interrupt trigger configuration (4 bits per pin).
pub const EXYNOS_GPIO_ECON_OFFSET: usize = 0x700;
/// External interrupt filter configuration (8 bits per pin, two words per bank).
pub const EXYNOS_GPIO_EFLTCON_OFFSET: usize = 0x800;
/// External interrupt mask (1 bit per pin, 1 = masked).
pub const EXYNOS_GPIO_EMASK_OFFSET: usize = 0x900;
/// External interrupt pending (1 bit per pin, write 1 to clear).
pub const EXYNOS_GPIO_EPEND_OFFSET: usize = 0xA00;
/// Interrupt service register shared by all GPIO interrupt banks.
pub const EXYNOS_SVC_OFFSET: usize = 0xB08;

const EXYNOS_SVC_GROUP_SHIFT: u32 = 3;
const EXYNOS_SVC_GROUP_MASK: u32 = 0x1f;
const EXYNOS_SVC_NUM_MASK: u32 = 0x7;

/// 1-based bank group encoded in the service register, 0 if none.
#[inline]
pub const fn svc_group(svc: u32) -> u32 {
    (svc >> EXYNOS_SVC_GROUP_SHIFT) & EXYNOS_SVC_GROUP_MASK
}

/// Pin number inside the group encoded in the service register.
#[inline]
pub const fn svc_num(svc: u32) -> u32 {
    svc & EXYNOS_SVC_NUM_MASK
}

/// Pin function code routing the pin to the external interrupt block.
pub const EXYNOS_EINT_FUNC: u32 = 0xf;
/// Pin function code of a plain input.
pub const FUNC_INPUT: u32 = 0x0;

pub const EXYNOS_EINT_LEVEL_LOW: u32 = 0;
pub const EXYNOS_EINT_LEVEL_HIGH: u32 = 1;
pub const EXYNOS_EINT_EDGE_FALLING: u32 = 2;
pub const EXYNOS_EINT_EDGE_RISING: u32 = 3;
pub const EXYNOS_EINT_EDGE_BOTH: u32 = 4;
pub const EXYNOS_EINT_CON_MASK: u32 = 0xf;
pub const EXYNOS_EINT_CON_LEN: u32 = 4;

/// Pins one bank can expose: eight 4-bit ECON fields fill a word.
pub const EXYNOS_EINT_MAX_PER_BANK: u32 = 8;

pub const EXYNOS_EINT_FLTCON_MASK: u32 = 0xff;
pub const EXYNOS_EINT_FLTCON_LEN: u32 = 8;
const EXYNOS_EINT_FLTCON_WIDTH_MASK: u32 = 0x3f;

bitflags! {
    /// Noise filter control of one pin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FilterFlags: u32 {
        /// Filter enable.
        const EN = 1 << 7;
        /// Digital filter select; cleared selects the analog (delay) filter.
        const SEL = 1 << 6;
    }
}

impl FilterFlags {
    /// Digital filter used while the system runs.
    pub const DIGITAL: Self = Self::EN.union(Self::SEL);
    /// Analog filter used while the system sleeps.
    pub const ANALOG: Self = Self::EN;

    /// Filter control byte for these flags and a digital filter `width`.
    #[inline]
    pub const fn fltcon(self, width: u32) -> u32 {
        self.bits() | (width & EXYNOS_EINT_FLTCON_WIDTH_MASK)
    }
}
