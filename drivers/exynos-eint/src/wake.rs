// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use core::sync::atomic::{AtomicU32, Ordering};

/// Wakeup source mask handed to the sleep sequencer. A cleared bit enables
/// the corresponding EINT as a wakeup source.
static EINT_WAKE_MASK: AtomicU32 = AtomicU32::new(u32::MAX);

/// Returns the current EINT wakeup mask.
pub fn get_eint_wake_mask() -> u32 {
    EINT_WAKE_MASK.load(Ordering::Acquire)
}

pub(crate) fn update_wake_mask(bit: u32, on: bool) {
    if bit >= u32::BITS {
        warn!("wake bit {bit} out of mask range, ignored");
        return;
    }
    let bit = 1u32 << bit;
    if on {
        EINT_WAKE_MASK.fetch_and(!bit, Ordering::AcqRel);
    } else {
        EINT_WAKE_MASK.fetch_or(bit, Ordering::AcqRel);
    }
}
