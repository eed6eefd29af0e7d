// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Pin controller descriptions of the supported SoCs.

use crate::{
    bank::{BANK_TYPE_0, BANK_TYPE_1, PinBankDesc},
    controller::{EintFeatures, PinCtrlDesc},
};

/// All pin controllers of one SoC.
#[derive(Debug)]
pub struct SocDesc {
    pub name: &'static str,
    pub ctrls: &'static [PinCtrlDesc],
}

impl SocDesc {
    /// Total number of GPIO pins over all controllers.
    pub fn nr_gpio(&self) -> u32 {
        self.ctrls.iter().map(PinCtrlDesc::nr_pins).sum()
    }

    pub fn ctrl(&self, label: &str) -> Option<&'static PinCtrlDesc> {
        self.ctrls.iter().find(|c| c.label == label)
    }
}

const GPIO_SR: EintFeatures = EintFeatures::GPIO_INIT.union(EintFeatures::SUSPEND_RESUME);

static EXYNOS3250_PIN_BANKS0: [PinBankDesc; 7] = [
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x000, "gpa0", 0x00),
    PinBankDesc::eintg(&BANK_TYPE_0, 6, 0x020, "gpa1", 0x04),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x040, "gpb", 0x08),
    PinBankDesc::eintg(&BANK_TYPE_0, 5, 0x060, "gpc0", 0x0c),
    PinBankDesc::eintg(&BANK_TYPE_0, 5, 0x080, "gpc1", 0x10),
    PinBankDesc::eintg(&BANK_TYPE_0, 4, 0x0a0, "gpd0", 0x14),
    PinBankDesc::eintg(&BANK_TYPE_0, 4, 0x0c0, "gpd1", 0x18),
];

static EXYNOS3250_PIN_BANKS1: [PinBankDesc; 16] = [
    PinBankDesc::eintn(&BANK_TYPE_0, 8, 0x120, "gpe0"),
    PinBankDesc::eintn(&BANK_TYPE_0, 8, 0x140, "gpe1"),
    PinBankDesc::eintn(&BANK_TYPE_0, 3, 0x180, "gpe2"),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x040, "gpk0", 0x08),
    PinBankDesc::eintg(&BANK_TYPE_0, 7, 0x060, "gpk1", 0x0c),
    PinBankDesc::eintg(&BANK_TYPE_0, 7, 0x080, "gpk2", 0x10),
    PinBankDesc::eintg(&BANK_TYPE_0, 4, 0x0c0, "gpl0", 0x18),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x260, "gpm0", 0x24),
    PinBankDesc::eintg(&BANK_TYPE_0, 7, 0x280, "gpm1", 0x28),
    PinBankDesc::eintg(&BANK_TYPE_0, 5, 0x2a0, "gpm2", 0x2c),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x2c0, "gpm3", 0x30),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x2e0, "gpm4", 0x34),
    PinBankDesc::eintw(&BANK_TYPE_0, 8, 0xc00, "gpx0", 0x00),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc20, "gpx1", 0x04),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc40, "gpx2", 0x08),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc60, "gpx3", 0x0c),
];

pub static EXYNOS3250_PIN_CTRL: [PinCtrlDesc; 2] = [
    PinCtrlDesc {
        label: "exynos3250-gpio-ctrl0",
        banks: &EXYNOS3250_PIN_BANKS0,
        features: GPIO_SR,
    },
    PinCtrlDesc {
        label: "exynos3250-gpio-ctrl1",
        banks: &EXYNOS3250_PIN_BANKS1,
        features: EintFeatures::all(),
    },
];

pub static EXYNOS3250_SOC: SocDesc = SocDesc {
    name: "exynos3250",
    ctrls: &EXYNOS3250_PIN_CTRL,
};

static EXYNOS4210_PIN_BANKS0: [PinBankDesc; 16] = [
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x000, "gpa0", 0x00),
    PinBankDesc::eintg(&BANK_TYPE_0, 6, 0x020, "gpa1", 0x04),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x040, "gpb", 0x08),
    PinBankDesc::eintg(&BANK_TYPE_0, 5, 0x060, "gpc0", 0x0c),
    PinBankDesc::eintg(&BANK_TYPE_0, 5, 0x080, "gpc1", 0x10),
    PinBankDesc::eintg(&BANK_TYPE_0, 4, 0x0a0, "gpd0", 0x14),
    PinBankDesc::eintg(&BANK_TYPE_0, 4, 0x0c0, "gpd1", 0x18),
    PinBankDesc::eintg(&BANK_TYPE_0, 5, 0x0e0, "gpe0", 0x1c),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x100, "gpe1", 0x20),
    PinBankDesc::eintg(&BANK_TYPE_0, 6, 0x120, "gpe2", 0x24),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x140, "gpe3", 0x28),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x160, "gpe4", 0x2c),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x180, "gpf0", 0x30),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x1a0, "gpf1", 0x34),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x1c0, "gpf2", 0x38),
    PinBankDesc::eintg(&BANK_TYPE_0, 6, 0x1e0, "gpf3", 0x3c),
];

static EXYNOS4210_PIN_BANKS1: [PinBankDesc; 20] = [
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x000, "gpj0", 0x00),
    PinBankDesc::eintg(&BANK_TYPE_0, 5, 0x020, "gpj1", 0x04),
    PinBankDesc::eintg(&BANK_TYPE_0, 7, 0x040, "gpk0", 0x08),
    PinBankDesc::eintg(&BANK_TYPE_0, 7, 0x060, "gpk1", 0x0c),
    PinBankDesc::eintg(&BANK_TYPE_0, 7, 0x080, "gpk2", 0x10),
    PinBankDesc::eintg(&BANK_TYPE_0, 7, 0x0a0, "gpk3", 0x14),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x0c0, "gpl0", 0x18),
    PinBankDesc::eintg(&BANK_TYPE_0, 3, 0x0e0, "gpl1", 0x1c),
    PinBankDesc::eintg(&BANK_TYPE_0, 8, 0x100, "gpl2", 0x20),
    PinBankDesc::eintn(&BANK_TYPE_0, 6, 0x120, "gpy0"),
    PinBankDesc::eintn(&BANK_TYPE_0, 4, 0x140, "gpy1"),
    PinBankDesc::eintn(&BANK_TYPE_0, 6, 0x160, "gpy2"),
    PinBankDesc::eintn(&BANK_TYPE_0, 8, 0x180, "gpy3"),
    PinBankDesc::eintn(&BANK_TYPE_0, 8, 0x1a0, "gpy4"),
    PinBankDesc::eintn(&BANK_TYPE_0, 8, 0x1c0, "gpy5"),
    PinBankDesc::eintn(&BANK_TYPE_0, 8, 0x1e0, "gpy6"),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc00, "gpx0", 0x00),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc20, "gpx1", 0x04),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc40, "gpx2", 0x08),
    PinBankDesc::eintw(&BANK_TYPE_1, 8, 0xc60, "gpx3", 0x0c),
];

static EXYNOS4210_PIN_BANKS2: [PinBankDesc; 1] =
    [PinBankDesc::eintn(&BANK_TYPE_0, 7, 0x000, "gpz")];

pub static EXYNOS4210_PIN_CTRL: [PinCtrlDesc; 3] = [
    PinCtrlDesc {
        label: "exynos4210-gpio-ctrl0",
        banks: &EXYNOS4210_PIN_BANKS0,
        features: GPIO_SR,
    },
    PinCtrlDesc {
        label: "exynos4210-gpio-ctrl1",
        banks: &EXYNOS4210_PIN_BANKS1,
        features: EintFeatures::all(),
    },
    PinCtrlDesc {
        label: "exynos4210-gpio-ctrl2",
        banks: &EXYNOS4210_PIN_BANKS2,
        features: EintFeatures::empty(),
    },
];

pub static EXYNOS4210_SOC: SocDesc = SocDesc {
    name: "exynos4210",
    ctrls: &EXYNOS4210_PIN_CTRL,
};
