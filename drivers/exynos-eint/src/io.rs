// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Register window of a pin controller instance.

use core::ptr::NonNull;

/// 32-bit register access relative to a controller's register base.
///
/// Register accesses never fail: they are plain loads and stores to device
/// memory.
pub trait RegisterIo: Send + Sync {
    /// Reads the 32-bit register at `offset`.
    fn read32(&self, offset: usize) -> u32;

    /// Writes `val` to the 32-bit register at `offset`.
    fn write32(&self, offset: usize, val: u32);
}

/// A memory-mapped register region.
#[derive(Debug)]
pub struct MmioRegion {
    base: NonNull<u8>,
    size: usize,
}

// The region is device memory; every access is a single volatile load or store.
unsafe impl Send for MmioRegion {}
unsafe impl Sync for MmioRegion {}

impl MmioRegion {
    /// Creates a region over `size` bytes of mapped device memory at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point to a valid, mapped and 4-byte aligned MMIO region of
    /// at least `size` bytes that stays mapped for the lifetime of the returned
    /// value.
    pub const unsafe fn new(base: NonNull<u8>, size: usize) -> Self {
        Self { base, size }
    }

    /// Size of the region in bytes.
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn reg(&self, offset: usize) -> *mut u32 {
        debug_assert!(offset % 4 == 0 && offset + 4 <= self.size);
        // SAFETY: `offset` stays inside the region as required by `new`.
        unsafe { self.base.as_ptr().add(offset).cast::<u32>() }
    }
}

impl RegisterIo for MmioRegion {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: the register lies within the mapped region.
        unsafe { core::ptr::read_volatile(self.reg(offset)) }
    }

    #[inline]
    fn write32(&self, offset: usize, val: u32) {
        // SAFETY: the register lies within the mapped region.
        unsafe { core::ptr::write_volatile(self.reg(offset), val) }
    }
}
