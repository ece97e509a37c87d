//! PIC32MZ EF configuration words: catalog, bit-field layout, directives.
//!
//! One table row per DEVCFG field, listed from DEVCFG3 down to DEVCFG0 the
//! way XC32 headers print them. Reserved ranges the datasheet marks as
//! "write 0" are [`FixedField`]s. DEVCFG1 bit 23 is reserved "write 1" and is
//! simply left erased.
//!
//! # Sources
//!
//! - PIC32MZ EF datasheet (DS60001320), Register 34-1..34-4 (DEVCFG0-3)
//! - XC32 `config_docs/32mz2048efh144.html` (`#pragma config` tokens)

use crate::directives::{DirectiveEncoding, DirectiveEntry};
use crate::fields::{BitFieldDescriptor, Encoding, FixedField};
use crate::register::RegisterId;
use crate::setting::{AllowedValues, Setting, SettingId, SettingValue};

use crate::setting::SettingValue::{Number, Symbol};

// ─── Value tables ────────────────────────────────────────────────────────────

const USERID_RANGE: AllowedValues = AllowedValues::Range {
    min: 0,
    max: 0xFFFF,
};

const ON_OFF_SYMBOLS: &[&str] = &["ON", "OFF"];
const ON_OFF_CODES: &[(SettingValue, u32)] = &[
    (Symbol("ON"), 1),
    (Symbol("OFF"), 0),
];
const ON_OFF_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("ON"), "ON"),
    (Symbol("OFF"), "OFF"),
];

const FPLLIDIV_RANGE: AllowedValues = AllowedValues::Range { min: 1, max: 8 };

const FPLLRNG_SYMBOLS: &[&str] = &[
    "RANGE_BYPASS",
    "RANGE_5_10_MHZ",
    "RANGE_8_16_MHZ",
    "RANGE_13_26_MHZ",
    "RANGE_21_42_MHZ",
    "RANGE_34_68_MHZ",
];
const FPLLRNG_CODES: &[(SettingValue, u32)] = &[
    (Symbol("RANGE_BYPASS"), 0),
    (Symbol("RANGE_5_10_MHZ"), 1),
    (Symbol("RANGE_8_16_MHZ"), 2),
    (Symbol("RANGE_13_26_MHZ"), 3),
    (Symbol("RANGE_21_42_MHZ"), 4),
    (Symbol("RANGE_34_68_MHZ"), 5),
];
const FPLLRNG_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("RANGE_BYPASS"), "RANGE_BYPASS"),
    (Symbol("RANGE_5_10_MHZ"), "RANGE_5_10_MHZ"),
    (Symbol("RANGE_8_16_MHZ"), "RANGE_8_16_MHZ"),
    (Symbol("RANGE_13_26_MHZ"), "RANGE_13_26_MHZ"),
    (Symbol("RANGE_21_42_MHZ"), "RANGE_21_42_MHZ"),
    (Symbol("RANGE_34_68_MHZ"), "RANGE_34_68_MHZ"),
];

const FPLLICLK_SYMBOLS: &[&str] = &["PLL_POSC", "PLL_FRC"];
const FPLLICLK_CODES: &[(SettingValue, u32)] = &[
    (Symbol("PLL_POSC"), 0),
    (Symbol("PLL_FRC"), 1),
];
const FPLLICLK_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("PLL_POSC"), "PLL_POSC"),
    (Symbol("PLL_FRC"), "PLL_FRC"),
];

const FPLLMULT_RANGE: AllowedValues = AllowedValues::Range { min: 1, max: 128 };

const FPLLODIV_NUMBERS: &[u32] = &[
    2, 4, 8, 16, 32,
];
const FPLLODIV_CODES: &[(SettingValue, u32)] = &[
    (Number(2), 1),
    (Number(4), 2),
    (Number(8), 3),
    (Number(16), 4),
    (Number(32), 5),
];

const UPLLFSEL_SYMBOLS: &[&str] = &["FREQ_12MHZ", "FREQ_24MHZ"];
const UPLLFSEL_CODES: &[(SettingValue, u32)] = &[
    (Symbol("FREQ_12MHZ"), 0),
    (Symbol("FREQ_24MHZ"), 1),
];
const UPLLFSEL_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("FREQ_12MHZ"), "FREQ_12MHZ"),
    (Symbol("FREQ_24MHZ"), "FREQ_24MHZ"),
];

const FNOSC_SYMBOLS: &[&str] = &["FRC", "SPLL", "POSC", "SOSC", "LPRC", "FRCDIV"];
const FNOSC_CODES: &[(SettingValue, u32)] = &[
    (Symbol("FRC"), 0),
    (Symbol("SPLL"), 1),
    (Symbol("POSC"), 2),
    (Symbol("SOSC"), 4),
    (Symbol("LPRC"), 5),
    (Symbol("FRCDIV"), 7),
];
const FNOSC_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("FRC"), "FRC"),
    (Symbol("SPLL"), "SPLL"),
    (Symbol("POSC"), "POSC"),
    (Symbol("SOSC"), "SOSC"),
    (Symbol("LPRC"), "LPRC"),
    (Symbol("FRCDIV"), "FRCDIV"),
];

const DMTINTV_SYMBOLS: &[&str] = &[
    "WIN_0",
    "WIN_1_2",
    "WIN_3_4",
    "WIN_7_8",
    "WIN_15_16",
    "WIN_31_32",
    "WIN_63_64",
    "WIN_127_128",
];
const DMTINTV_CODES: &[(SettingValue, u32)] = &[
    (Symbol("WIN_0"), 0),
    (Symbol("WIN_1_2"), 1),
    (Symbol("WIN_3_4"), 2),
    (Symbol("WIN_7_8"), 3),
    (Symbol("WIN_15_16"), 4),
    (Symbol("WIN_31_32"), 5),
    (Symbol("WIN_63_64"), 6),
    (Symbol("WIN_127_128"), 7),
];
const DMTINTV_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("WIN_0"), "WIN_0"),
    (Symbol("WIN_1_2"), "WIN_1_2"),
    (Symbol("WIN_3_4"), "WIN_3_4"),
    (Symbol("WIN_7_8"), "WIN_7_8"),
    (Symbol("WIN_15_16"), "WIN_15_16"),
    (Symbol("WIN_31_32"), "WIN_31_32"),
    (Symbol("WIN_63_64"), "WIN_63_64"),
    (Symbol("WIN_127_128"), "WIN_127_128"),
];

const POSCMOD_SYMBOLS: &[&str] = &["EC", "HS", "OFF"];
const POSCMOD_CODES: &[(SettingValue, u32)] = &[
    (Symbol("EC"), 0),
    (Symbol("HS"), 2),
    (Symbol("OFF"), 3),
];
const POSCMOD_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("EC"), "EC"),
    (Symbol("HS"), "HS"),
    (Symbol("OFF"), "OFF"),
];

const OSCIOFNC_SYMBOLS: &[&str] = &["ON", "OFF"];
const OSCIOFNC_CODES: &[(SettingValue, u32)] = &[
    (Symbol("ON"), 0),
    (Symbol("OFF"), 1),
];
const OSCIOFNC_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("ON"), "ON"),
    (Symbol("OFF"), "OFF"),
];

const FCKSM_SYMBOLS: &[&str] = &["CSDCMD", "CSECMD", "CSDCME", "CSECME"];
const FCKSM_CODES: &[(SettingValue, u32)] = &[
    (Symbol("CSDCMD"), 0),
    (Symbol("CSECMD"), 1),
    (Symbol("CSDCME"), 2),
    (Symbol("CSECME"), 3),
];
const FCKSM_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("CSDCMD"), "CSDCMD"),
    (Symbol("CSECMD"), "CSECMD"),
    (Symbol("CSDCME"), "CSDCME"),
    (Symbol("CSECME"), "CSECME"),
];

const WDTPS_NUMBERS: &[u32] = &[
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384,
    32768, 65536, 131072, 262144, 524288, 1048576,
];
const WDTPS_CODES: &[(SettingValue, u32)] = &[
    (Number(1), 0),
    (Number(2), 1),
    (Number(4), 2),
    (Number(8), 3),
    (Number(16), 4),
    (Number(32), 5),
    (Number(64), 6),
    (Number(128), 7),
    (Number(256), 8),
    (Number(512), 9),
    (Number(1024), 10),
    (Number(2048), 11),
    (Number(4096), 12),
    (Number(8192), 13),
    (Number(16384), 14),
    (Number(32768), 15),
    (Number(65536), 16),
    (Number(131072), 17),
    (Number(262144), 18),
    (Number(524288), 19),
    (Number(1048576), 20),
];

const WDTSPGM_SYMBOLS: &[&str] = &["RUN", "STOP"];
const WDTSPGM_CODES: &[(SettingValue, u32)] = &[
    (Symbol("RUN"), 0),
    (Symbol("STOP"), 1),
];
const WDTSPGM_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("RUN"), "RUN"),
    (Symbol("STOP"), "STOP"),
];

const WINDIS_SYMBOLS: &[&str] = &["WINDOW", "NORMAL"];
const WINDIS_CODES: &[(SettingValue, u32)] = &[
    (Symbol("WINDOW"), 0),
    (Symbol("NORMAL"), 1),
];
const WINDIS_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("WINDOW"), "WINDOW"),
    (Symbol("NORMAL"), "NORMAL"),
];

const FWDTWINSZ_SYMBOLS: &[&str] = &["WINSZ_75", "WINSZ_50", "WINSZ_37", "WINSZ_25"];
const FWDTWINSZ_CODES: &[(SettingValue, u32)] = &[
    (Symbol("WINSZ_75"), 0),
    (Symbol("WINSZ_50"), 1),
    (Symbol("WINSZ_37"), 2),
    (Symbol("WINSZ_25"), 3),
];
const FWDTWINSZ_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("WINSZ_75"), "WINSZ_75"),
    (Symbol("WINSZ_50"), "WINSZ_50"),
    (Symbol("WINSZ_37"), "WINSZ_37"),
    (Symbol("WINSZ_25"), "WINSZ_25"),
];

const DMTCNT_RANGE: AllowedValues = AllowedValues::Range { min: 8, max: 31 };

const DEBUG_SYMBOLS: &[&str] = &["ON", "OFF"];
const DEBUG_CODES: &[(SettingValue, u32)] = &[
    (Symbol("ON"), 2),
    (Symbol("OFF"), 3),
];
const DEBUG_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("ON"), "ON"),
    (Symbol("OFF"), "OFF"),
];

const ICESEL_SYMBOLS: &[&str] = &["ICS_PGx1", "ICS_PGx2"];
const ICESEL_CODES: &[(SettingValue, u32)] = &[
    (Symbol("ICS_PGx1"), 3),
    (Symbol("ICS_PGx2"), 2),
];
const ICESEL_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("ICS_PGx1"), "ICS_PGx1"),
    (Symbol("ICS_PGx2"), "ICS_PGx2"),
];

const BOOTISA_SYMBOLS: &[&str] = &["MICROMIPS", "MIPS32"];
const BOOTISA_CODES: &[(SettingValue, u32)] = &[
    (Symbol("MICROMIPS"), 0),
    (Symbol("MIPS32"), 1),
];
const BOOTISA_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("MICROMIPS"), "MICROMIPS"),
    (Symbol("MIPS32"), "MIPS32"),
];

const FECCCON_SYMBOLS: &[&str] = &["ON", "DYNAMIC", "OFF_LOCKED", "OFF_UNLOCKED"];
const FECCCON_CODES: &[(SettingValue, u32)] = &[
    (Symbol("ON"), 0),
    (Symbol("DYNAMIC"), 1),
    (Symbol("OFF_LOCKED"), 2),
    (Symbol("OFF_UNLOCKED"), 3),
];
const FECCCON_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("ON"), "ON"),
    (Symbol("DYNAMIC"), "DYNAMIC"),
    (Symbol("OFF_LOCKED"), "OFF_LOCKED"),
    (Symbol("OFF_UNLOCKED"), "OFF_UNLOCKED"),
];

const FSLEEP_SYMBOLS: &[&str] = &["VREGS", "OFF"];
const FSLEEP_CODES: &[(SettingValue, u32)] = &[
    (Symbol("VREGS"), 0),
    (Symbol("OFF"), 1),
];
const FSLEEP_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("VREGS"), "VREGS"),
    (Symbol("OFF"), "OFF"),
];

const DBGPER_SYMBOLS: &[&str] = &["PG_NONE", "ALLOW_PG0", "ALLOW_PG1", "ALLOW_PG2", "PG_ALL"];
const DBGPER_CODES: &[(SettingValue, u32)] = &[
    (Symbol("PG_NONE"), 0),
    (Symbol("ALLOW_PG0"), 1),
    (Symbol("ALLOW_PG1"), 2),
    (Symbol("ALLOW_PG2"), 4),
    (Symbol("PG_ALL"), 7),
];
const DBGPER_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("PG_NONE"), "PG_NONE"),
    (Symbol("ALLOW_PG0"), "ALLOW_PG0"),
    (Symbol("ALLOW_PG1"), "ALLOW_PG1"),
    (Symbol("ALLOW_PG2"), "ALLOW_PG2"),
    (Symbol("PG_ALL"), "PG_ALL"),
];

const SMCLR_SYMBOLS: &[&str] = &["MCLR_POR", "MCLR_NORM"];
const SMCLR_CODES: &[(SettingValue, u32)] = &[
    (Symbol("MCLR_POR"), 0),
    (Symbol("MCLR_NORM"), 1),
];
const SMCLR_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("MCLR_POR"), "MCLR_POR"),
    (Symbol("MCLR_NORM"), "MCLR_NORM"),
];

const GAIN_SYMBOLS: &[&str] = &["GAIN_LEVEL_0", "GAIN_LEVEL_1", "GAIN_LEVEL_2", "GAIN_LEVEL_3"];
const GAIN_CODES: &[(SettingValue, u32)] = &[
    (Symbol("GAIN_LEVEL_0"), 0),
    (Symbol("GAIN_LEVEL_1"), 1),
    (Symbol("GAIN_LEVEL_2"), 2),
    (Symbol("GAIN_LEVEL_3"), 3),
];
const GAIN_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("GAIN_LEVEL_0"), "GAIN_LEVEL_0"),
    (Symbol("GAIN_LEVEL_1"), "GAIN_LEVEL_1"),
    (Symbol("GAIN_LEVEL_2"), "GAIN_LEVEL_2"),
    (Symbol("GAIN_LEVEL_3"), "GAIN_LEVEL_3"),
];

const EJTAGBEN_SYMBOLS: &[&str] = &["REDUCED", "NORMAL"];
const EJTAGBEN_CODES: &[(SettingValue, u32)] = &[
    (Symbol("REDUCED"), 0),
    (Symbol("NORMAL"), 1),
];
const EJTAGBEN_TOKENS: &[(SettingValue, &str)] = &[
    (Symbol("REDUCED"), "REDUCED"),
    (Symbol("NORMAL"), "NORMAL"),
];

// ─── Setting Catalog ─────────────────────────────────────────────────────────

pub(super) static SETTINGS: [Setting; 40] = [
    Setting {
        id: SettingId::Userid,
        allowed: USERID_RANGE,
        default: Number(0),
        description: "User-defined 16-bit ID",
    },
    Setting {
        id: SettingId::Fmiien,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "Ethernet RMII/MII enable (ON = MII)",
    },
    Setting {
        id: SettingId::Fethio,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "Ethernet I/O pin select (ON = default pins)",
    },
    Setting {
        id: SettingId::Pgl1way,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("OFF"),
        description: "Permission group lock one-way configuration",
    },
    Setting {
        id: SettingId::Pmdl1way,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("OFF"),
        description: "Peripheral module disable one-way configuration",
    },
    Setting {
        id: SettingId::Iol1way,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("OFF"),
        description: "Peripheral pin select one-way configuration",
    },
    Setting {
        id: SettingId::Fusbidio,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "USB USBID pin controlled by the USB module",
    },
    Setting {
        id: SettingId::Fpllidiv,
        allowed: FPLLIDIV_RANGE,
        default: Number(1),
        description: "System PLL input divider",
    },
    Setting {
        id: SettingId::Fpllrng,
        allowed: AllowedValues::Symbols(FPLLRNG_SYMBOLS),
        default: Symbol("RANGE_5_10_MHZ"),
        description: "System PLL input range",
    },
    Setting {
        id: SettingId::FpllIclk,
        allowed: AllowedValues::Symbols(FPLLICLK_SYMBOLS),
        default: Symbol("PLL_FRC"),
        description: "System PLL input clock",
    },
    Setting {
        id: SettingId::Fpllmult,
        allowed: FPLLMULT_RANGE,
        default: Number(50),
        description: "System PLL multiplier",
    },
    Setting {
        id: SettingId::Fpllodiv,
        allowed: AllowedValues::Numbers(FPLLODIV_NUMBERS),
        default: Number(2),
        description: "System PLL output divider",
    },
    Setting {
        id: SettingId::Upllfsel,
        allowed: AllowedValues::Symbols(UPLLFSEL_SYMBOLS),
        default: Symbol("FREQ_24MHZ"),
        description: "USB PLL input frequency",
    },
    Setting {
        id: SettingId::Fnosc,
        allowed: AllowedValues::Symbols(FNOSC_SYMBOLS),
        default: Symbol("SPLL"),
        description: "Oscillator selection",
    },
    Setting {
        id: SettingId::Dmtintv,
        allowed: AllowedValues::Symbols(DMTINTV_SYMBOLS),
        default: Symbol("WIN_127_128"),
        description: "Deadman timer count window interval",
    },
    Setting {
        id: SettingId::Fsoscen,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "Secondary oscillator enable",
    },
    Setting {
        id: SettingId::Ieso,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "Internal/external switch-over",
    },
    Setting {
        id: SettingId::Poscmod,
        allowed: AllowedValues::Symbols(POSCMOD_SYMBOLS),
        default: Symbol("OFF"),
        description: "Primary oscillator configuration",
    },
    Setting {
        id: SettingId::Osciofnc,
        allowed: AllowedValues::Symbols(OSCIOFNC_SYMBOLS),
        default: Symbol("OFF"),
        description: "CLKO output signal on OSC2",
    },
    Setting {
        id: SettingId::Fcksm,
        allowed: AllowedValues::Symbols(FCKSM_SYMBOLS),
        default: Symbol("CSECME"),
        description: "Clock switching and fail-safe clock monitor",
    },
    Setting {
        id: SettingId::Wdtps,
        allowed: AllowedValues::Numbers(WDTPS_NUMBERS),
        default: Number(1024),
        description: "Watchdog timer postscaler",
    },
    Setting {
        id: SettingId::Wdtspgm,
        allowed: AllowedValues::Symbols(WDTSPGM_SYMBOLS),
        default: Symbol("STOP"),
        description: "Watchdog timer during flash programming",
    },
    Setting {
        id: SettingId::Windis,
        allowed: AllowedValues::Symbols(WINDIS_SYMBOLS),
        default: Symbol("NORMAL"),
        description: "Watchdog timer window mode",
    },
    Setting {
        id: SettingId::Fwdtwinsz,
        allowed: AllowedValues::Symbols(FWDTWINSZ_SYMBOLS),
        default: Symbol("WINSZ_25"),
        description: "Watchdog timer window size",
    },
    Setting {
        id: SettingId::Dmtcnt,
        allowed: DMTCNT_RANGE,
        default: Number(31),
        description: "Deadman timer count select (2^n)",
    },
    Setting {
        id: SettingId::Fdmten,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("OFF"),
        description: "Deadman timer enable",
    },
    Setting {
        id: SettingId::Debug,
        allowed: AllowedValues::Symbols(DEBUG_SYMBOLS),
        default: Symbol("OFF"),
        description: "Background debugger enable",
    },
    Setting {
        id: SettingId::Jtagen,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("OFF"),
        description: "JTAG enable",
    },
    Setting {
        id: SettingId::Icesel,
        allowed: AllowedValues::Symbols(ICESEL_SYMBOLS),
        default: Symbol("ICS_PGx2"),
        description: "ICE/ICD communication channel",
    },
    Setting {
        id: SettingId::Trcen,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "Trace enable",
    },
    Setting {
        id: SettingId::Bootisa,
        allowed: AllowedValues::Symbols(BOOTISA_SYMBOLS),
        default: Symbol("MIPS32"),
        description: "Boot ISA selection",
    },
    Setting {
        id: SettingId::Fecccon,
        allowed: AllowedValues::Symbols(FECCCON_SYMBOLS),
        default: Symbol("OFF_UNLOCKED"),
        description: "Dynamic flash ECC configuration",
    },
    Setting {
        id: SettingId::Fsleep,
        allowed: AllowedValues::Symbols(FSLEEP_SYMBOLS),
        default: Symbol("OFF"),
        description: "Flash sleep mode",
    },
    Setting {
        id: SettingId::Dbgper,
        allowed: AllowedValues::Symbols(DBGPER_SYMBOLS),
        default: Symbol("PG_ALL"),
        description: "Debug mode CPU access permission",
    },
    Setting {
        id: SettingId::Smclr,
        allowed: AllowedValues::Symbols(SMCLR_SYMBOLS),
        default: Symbol("MCLR_NORM"),
        description: "Soft master clear enable",
    },
    Setting {
        id: SettingId::Soscgain,
        allowed: AllowedValues::Symbols(GAIN_SYMBOLS),
        default: Symbol("GAIN_LEVEL_3"),
        description: "Secondary oscillator gain control",
    },
    Setting {
        id: SettingId::Soscboost,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "Secondary oscillator boost kick start",
    },
    Setting {
        id: SettingId::Poscgain,
        allowed: AllowedValues::Symbols(GAIN_SYMBOLS),
        default: Symbol("GAIN_LEVEL_3"),
        description: "Primary oscillator gain control",
    },
    Setting {
        id: SettingId::Poscboost,
        allowed: AllowedValues::Symbols(ON_OFF_SYMBOLS),
        default: Symbol("ON"),
        description: "Primary oscillator boost kick start",
    },
    Setting {
        id: SettingId::Ejtagben,
        allowed: AllowedValues::Symbols(EJTAGBEN_SYMBOLS),
        default: Symbol("NORMAL"),
        description: "EJTAG boot",
    },
];

// ─── Bit Field Map ───────────────────────────────────────────────────────────

pub(super) static FIELDS: [BitFieldDescriptor; 40] = [
    BitFieldDescriptor {
        setting: SettingId::Userid,
        register: RegisterId::Devcfg3,
        bit_start: 0,
        bit_width: 16,
        encoding: Encoding::Linear {
            min: 0,
            max: 0xFFFF,
            offset: 0,
        },
    },
    BitFieldDescriptor {
        setting: SettingId::Fmiien,
        register: RegisterId::Devcfg3,
        bit_start: 24,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fethio,
        register: RegisterId::Devcfg3,
        bit_start: 25,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Pgl1way,
        register: RegisterId::Devcfg3,
        bit_start: 27,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Pmdl1way,
        register: RegisterId::Devcfg3,
        bit_start: 28,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Iol1way,
        register: RegisterId::Devcfg3,
        bit_start: 29,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fusbidio,
        register: RegisterId::Devcfg3,
        bit_start: 30,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fpllidiv,
        register: RegisterId::Devcfg2,
        bit_start: 0,
        bit_width: 3,
        encoding: Encoding::Linear {
            min: 1,
            max: 8,
            offset: 1,
        },
    },
    BitFieldDescriptor {
        setting: SettingId::Fpllrng,
        register: RegisterId::Devcfg2,
        bit_start: 4,
        bit_width: 3,
        encoding: Encoding::Table(FPLLRNG_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::FpllIclk,
        register: RegisterId::Devcfg2,
        bit_start: 7,
        bit_width: 1,
        encoding: Encoding::Table(FPLLICLK_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fpllmult,
        register: RegisterId::Devcfg2,
        bit_start: 8,
        bit_width: 7,
        encoding: Encoding::Linear {
            min: 1,
            max: 128,
            offset: 1,
        },
    },
    BitFieldDescriptor {
        setting: SettingId::Fpllodiv,
        register: RegisterId::Devcfg2,
        bit_start: 16,
        bit_width: 3,
        encoding: Encoding::Table(FPLLODIV_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Upllfsel,
        register: RegisterId::Devcfg2,
        bit_start: 30,
        bit_width: 1,
        encoding: Encoding::Table(UPLLFSEL_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fnosc,
        register: RegisterId::Devcfg1,
        bit_start: 0,
        bit_width: 3,
        encoding: Encoding::Table(FNOSC_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Dmtintv,
        register: RegisterId::Devcfg1,
        bit_start: 3,
        bit_width: 3,
        encoding: Encoding::Table(DMTINTV_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fsoscen,
        register: RegisterId::Devcfg1,
        bit_start: 6,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Ieso,
        register: RegisterId::Devcfg1,
        bit_start: 7,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Poscmod,
        register: RegisterId::Devcfg1,
        bit_start: 8,
        bit_width: 2,
        encoding: Encoding::Table(POSCMOD_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Osciofnc,
        register: RegisterId::Devcfg1,
        bit_start: 10,
        bit_width: 1,
        encoding: Encoding::Table(OSCIOFNC_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fcksm,
        register: RegisterId::Devcfg1,
        bit_start: 14,
        bit_width: 2,
        encoding: Encoding::Table(FCKSM_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Wdtps,
        register: RegisterId::Devcfg1,
        bit_start: 16,
        bit_width: 5,
        encoding: Encoding::Table(WDTPS_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Wdtspgm,
        register: RegisterId::Devcfg1,
        bit_start: 21,
        bit_width: 1,
        encoding: Encoding::Table(WDTSPGM_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Windis,
        register: RegisterId::Devcfg1,
        bit_start: 22,
        bit_width: 1,
        encoding: Encoding::Table(WINDIS_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fwdtwinsz,
        register: RegisterId::Devcfg1,
        bit_start: 24,
        bit_width: 2,
        encoding: Encoding::Table(FWDTWINSZ_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Dmtcnt,
        register: RegisterId::Devcfg1,
        bit_start: 26,
        bit_width: 5,
        encoding: Encoding::Linear {
            min: 8,
            max: 31,
            offset: 8,
        },
    },
    BitFieldDescriptor {
        setting: SettingId::Fdmten,
        register: RegisterId::Devcfg1,
        bit_start: 31,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Debug,
        register: RegisterId::Devcfg0,
        bit_start: 0,
        bit_width: 2,
        encoding: Encoding::Table(DEBUG_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Jtagen,
        register: RegisterId::Devcfg0,
        bit_start: 2,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Icesel,
        register: RegisterId::Devcfg0,
        bit_start: 3,
        bit_width: 2,
        encoding: Encoding::Table(ICESEL_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Trcen,
        register: RegisterId::Devcfg0,
        bit_start: 5,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Bootisa,
        register: RegisterId::Devcfg0,
        bit_start: 6,
        bit_width: 1,
        encoding: Encoding::Table(BOOTISA_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fecccon,
        register: RegisterId::Devcfg0,
        bit_start: 8,
        bit_width: 2,
        encoding: Encoding::Table(FECCCON_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Fsleep,
        register: RegisterId::Devcfg0,
        bit_start: 10,
        bit_width: 1,
        encoding: Encoding::Table(FSLEEP_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Dbgper,
        register: RegisterId::Devcfg0,
        bit_start: 12,
        bit_width: 3,
        encoding: Encoding::Table(DBGPER_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Smclr,
        register: RegisterId::Devcfg0,
        bit_start: 15,
        bit_width: 1,
        encoding: Encoding::Table(SMCLR_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Soscgain,
        register: RegisterId::Devcfg0,
        bit_start: 16,
        bit_width: 2,
        encoding: Encoding::Table(GAIN_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Soscboost,
        register: RegisterId::Devcfg0,
        bit_start: 18,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Poscgain,
        register: RegisterId::Devcfg0,
        bit_start: 19,
        bit_width: 2,
        encoding: Encoding::Table(GAIN_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Poscboost,
        register: RegisterId::Devcfg0,
        bit_start: 21,
        bit_width: 1,
        encoding: Encoding::Table(ON_OFF_CODES),
    },
    BitFieldDescriptor {
        setting: SettingId::Ejtagben,
        register: RegisterId::Devcfg0,
        bit_start: 30,
        bit_width: 1,
        encoding: Encoding::Table(EJTAGBEN_CODES),
    },
];

pub(super) static FIXED: [FixedField; 12] = [
    FixedField { register: RegisterId::Devcfg3, bit_start: 16, bit_width: 8, value: 0 },
    FixedField { register: RegisterId::Devcfg3, bit_start: 26, bit_width: 1, value: 0 },
    FixedField { register: RegisterId::Devcfg3, bit_start: 31, bit_width: 1, value: 0 },
    FixedField { register: RegisterId::Devcfg2, bit_start: 3, bit_width: 1, value: 0 },
    FixedField { register: RegisterId::Devcfg2, bit_start: 15, bit_width: 1, value: 0 },
    FixedField { register: RegisterId::Devcfg2, bit_start: 19, bit_width: 11, value: 0 },
    FixedField { register: RegisterId::Devcfg2, bit_start: 31, bit_width: 1, value: 0 },
    FixedField { register: RegisterId::Devcfg1, bit_start: 11, bit_width: 3, value: 0 },
    FixedField { register: RegisterId::Devcfg0, bit_start: 7, bit_width: 1, value: 0 },
    FixedField { register: RegisterId::Devcfg0, bit_start: 11, bit_width: 1, value: 0 },
    FixedField { register: RegisterId::Devcfg0, bit_start: 22, bit_width: 8, value: 0 },
    FixedField { register: RegisterId::Devcfg0, bit_start: 31, bit_width: 1, value: 0 },
];

// ─── Directives ──────────────────────────────────────────────────────────────

pub(super) static DIRECTIVES: [DirectiveEntry; 40] = [
    DirectiveEntry {
        setting: SettingId::Userid,
        name: "USERID",
        encoding: DirectiveEncoding::Hex {
            digits: 4,
            domain: USERID_RANGE,
        },
    },
    DirectiveEntry {
        setting: SettingId::Fmiien,
        name: "FMIIEN",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fethio,
        name: "FETHIO",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Pgl1way,
        name: "PGL1WAY",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Pmdl1way,
        name: "PMDL1WAY",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Iol1way,
        name: "IOL1WAY",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fusbidio,
        name: "FUSBIDIO",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fpllidiv,
        name: "FPLLIDIV",
        encoding: DirectiveEncoding::Prefixed {
            prefix: "DIV_",
            domain: FPLLIDIV_RANGE,
        },
    },
    DirectiveEntry {
        setting: SettingId::Fpllrng,
        name: "FPLLRNG",
        encoding: DirectiveEncoding::Tokens(FPLLRNG_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::FpllIclk,
        name: "FPLLICLK",
        encoding: DirectiveEncoding::Tokens(FPLLICLK_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fpllmult,
        name: "FPLLMULT",
        encoding: DirectiveEncoding::Prefixed {
            prefix: "MUL_",
            domain: FPLLMULT_RANGE,
        },
    },
    DirectiveEntry {
        setting: SettingId::Fpllodiv,
        name: "FPLLODIV",
        encoding: DirectiveEncoding::Prefixed {
            prefix: "DIV_",
            domain: AllowedValues::Numbers(FPLLODIV_NUMBERS),
        },
    },
    DirectiveEntry {
        setting: SettingId::Upllfsel,
        name: "UPLLFSEL",
        encoding: DirectiveEncoding::Tokens(UPLLFSEL_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fnosc,
        name: "FNOSC",
        encoding: DirectiveEncoding::Tokens(FNOSC_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Dmtintv,
        name: "DMTINTV",
        encoding: DirectiveEncoding::Tokens(DMTINTV_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fsoscen,
        name: "FSOSCEN",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Ieso,
        name: "IESO",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Poscmod,
        name: "POSCMOD",
        encoding: DirectiveEncoding::Tokens(POSCMOD_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Osciofnc,
        name: "OSCIOFNC",
        encoding: DirectiveEncoding::Tokens(OSCIOFNC_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fcksm,
        name: "FCKSM",
        encoding: DirectiveEncoding::Tokens(FCKSM_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Wdtps,
        name: "WDTPS",
        encoding: DirectiveEncoding::Prefixed {
            prefix: "PS",
            domain: AllowedValues::Numbers(WDTPS_NUMBERS),
        },
    },
    DirectiveEntry {
        setting: SettingId::Wdtspgm,
        name: "WDTSPGM",
        encoding: DirectiveEncoding::Tokens(WDTSPGM_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Windis,
        name: "WINDIS",
        encoding: DirectiveEncoding::Tokens(WINDIS_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fwdtwinsz,
        name: "FWDTWINSZ",
        encoding: DirectiveEncoding::Tokens(FWDTWINSZ_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Dmtcnt,
        name: "DMTCNT",
        encoding: DirectiveEncoding::Prefixed {
            prefix: "DMT",
            domain: DMTCNT_RANGE,
        },
    },
    DirectiveEntry {
        setting: SettingId::Fdmten,
        name: "FDMTEN",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Debug,
        name: "DEBUG",
        encoding: DirectiveEncoding::Tokens(DEBUG_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Jtagen,
        name: "JTAGEN",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Icesel,
        name: "ICESEL",
        encoding: DirectiveEncoding::Tokens(ICESEL_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Trcen,
        name: "TRCEN",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Bootisa,
        name: "BOOTISA",
        encoding: DirectiveEncoding::Tokens(BOOTISA_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fecccon,
        name: "FECCCON",
        encoding: DirectiveEncoding::Tokens(FECCCON_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Fsleep,
        name: "FSLEEP",
        encoding: DirectiveEncoding::Tokens(FSLEEP_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Dbgper,
        name: "DBGPER",
        encoding: DirectiveEncoding::Tokens(DBGPER_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Smclr,
        name: "SMCLR",
        encoding: DirectiveEncoding::Tokens(SMCLR_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Soscgain,
        name: "SOSCGAIN",
        encoding: DirectiveEncoding::Tokens(GAIN_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Soscboost,
        name: "SOSCBOOST",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Poscgain,
        name: "POSCGAIN",
        encoding: DirectiveEncoding::Tokens(GAIN_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Poscboost,
        name: "POSCBOOST",
        encoding: DirectiveEncoding::Tokens(ON_OFF_TOKENS),
    },
    DirectiveEntry {
        setting: SettingId::Ejtagben,
        name: "EJTAGBEN",
        encoding: DirectiveEncoding::Tokens(EJTAGBEN_TOKENS),
    },
];
