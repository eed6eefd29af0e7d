// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Error codes of the external interrupt controller.

use core::fmt;

use linux_raw_sys::errno;
use strum::FromRepr;

/// The error kind returned by EINT controller operations.
///
/// Codes are positive and stable; [`EintError::errno`] gives the negated Linux
/// errno a caller at a syscall or driver-model boundary expects.
#[repr(i32)]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, FromRepr)]
pub enum EintError {
    /// The controller has no parent interrupt line for GPIO interrupts.
    MissingIrqResource = 1,
    /// The parent interrupt line is already claimed by another handler.
    IrqRequestFailed,
    /// An IRQ domain could not be created for a bank.
    DomainCreateFailed,
    /// Not enough memory for per-pin or per-group bookkeeping.
    OutOfMemory,
    /// The GPIO core refused to lock the pin as an interrupt source.
    PinLockFailed,
    /// The requested trigger type cannot be expressed by the hardware.
    UnsupportedTriggerType,
    /// The wakeup interrupt controller node is absent.
    NotPresent,
    /// The hardware pin number is outside the bank, or has no descriptor.
    InvalidPin,
    /// The virtual interrupt number space is exhausted.
    NoFreeIrq,
    /// The interrupt chip has no wake-enable operation.
    WakeUnsupported,
    /// An action is already installed on the virtual interrupt.
    AlreadyRequested,
}

impl EintError {
    /// Returns the error description.
    pub const fn as_str(&self) -> &'static str {
        use EintError::*;
        match *self {
            MissingIrqResource => "Interrupt resource not available",
            IrqRequestFailed => "Interrupt request failed",
            DomainCreateFailed => "IRQ domain creation failed",
            OutOfMemory => "Out of memory",
            PinLockFailed => "Unable to lock pin as IRQ",
            UnsupportedTriggerType => "Unsupported external interrupt type",
            NotPresent => "Wakeup interrupt controller not present",
            InvalidPin => "Invalid hardware pin",
            NoFreeIrq => "No free virtual interrupt",
            WakeUnsupported => "Wakeup not supported",
            AlreadyRequested => "Interrupt already requested",
        }
    }

    /// Returns the error code value in `i32`.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the negated Linux errno matching this error.
    pub const fn errno(self) -> i32 {
        use EintError::*;
        let e = match self {
            MissingIrqResource | UnsupportedTriggerType | InvalidPin => errno::EINVAL,
            IrqRequestFailed | DomainCreateFailed | WakeUnsupported => errno::ENXIO,
            OutOfMemory => errno::ENOMEM,
            PinLockFailed => errno::EIO,
            NotPresent => errno::ENODEV,
            NoFreeIrq => errno::ENOSPC,
            AlreadyRequested => errno::EBUSY,
        };
        -(e as i32)
    }
}

impl TryFrom<i32> for EintError {
    type Error = i32;

    #[inline]
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or(value)
    }
}

impl fmt::Display for EintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A specialized [`Result`] type with [`EintError`] as the error type.
pub type EintResult<T = ()> = Result<T, EintError>;

/// Constructs an [`EintError`] while printing a warning message.
///
/// # Examples
///
/// ```
/// # use exynos_eint::{eint_err, EintError};
/// assert_eq!(eint_err!(InvalidPin), EintError::InvalidPin);
/// assert_eq!(
///     eint_err!(PinLockFailed, "gpa0-3 is an output"),
///     EintError::PinLockFailed,
/// );
/// ```
#[macro_export]
macro_rules! eint_err {
    ($err:ident) => {{
        let err = $crate::EintError::$err;
        $crate::__priv::warn!("[{:?}]", err);
        err
    }};
    ($err:ident, $msg:expr) => {{
        let err = $crate::EintError::$err;
        $crate::__priv::warn!("[{:?}] {}", err, $msg);
        err
    }};
}
