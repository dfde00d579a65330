//! The banked register file: general-purpose registers, CPSR, and the five
//! per-mode SPSRs, addressed through small fixed-size banks selected by the
//! current processor mode.

use bitflags::bitflags;

bitflags! {
    /// The flag/control bits of CPSR and SPSR. Bits outside this set are
    /// reserved and simply preserved across writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpsrFlags: u32 {
        const N = 1 << 31;
        const Z = 1 << 30;
        const C = 1 << 29;
        const V = 1 << 28;
        const IRQ_DISABLE = 1 << 7;
        const FIQ_DISABLE = 1 << 6;
        const THUMB = 1 << 5;
    }
}

pub const MODE_MASK: u32 = 0x1F;
pub const STATUS_FLAGS_MASK: u32 = 0xF000_0000;
/// Control byte (bits 7..0) excluding bit 5 (T): MSR's control-byte write
/// must never flip THUMB state, which is only ever changed by BX or
/// exception entry/return.
pub const STATUS_CONTROL_MASK: u32 = 0x0000_00DF;

/// The seven ARMv4T processor modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    User,
    Fiq,
    Irq,
    Supervisor,
    Abort,
    Undefined,
    System,
}

impl Mode {
    pub fn from_bits(bits: u32) -> Option<Mode> {
        match bits & MODE_MASK {
            0b10000 => Some(Mode::User),
            0b10001 => Some(Mode::Fiq),
            0b10010 => Some(Mode::Irq),
            0b10011 => Some(Mode::Supervisor),
            0b10111 => Some(Mode::Abort),
            0b11011 => Some(Mode::Undefined),
            0b11111 => Some(Mode::System),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Mode::User => 0b10000,
            Mode::Fiq => 0b10001,
            Mode::Irq => 0b10010,
            Mode::Supervisor => 0b10011,
            Mode::Abort => 0b10111,
            Mode::Undefined => 0b11011,
            Mode::System => 0b11111,
        }
    }

    pub fn is_privileged(self) -> bool {
        !matches!(self, Mode::User)
    }

    /// Index into the 6-slot r13/r14 bank: user and system share a slot.
    fn sp_lr_bank_index(self) -> usize {
        match self {
            Mode::User | Mode::System => 0,
            Mode::Fiq => 1,
            Mode::Irq => 2,
            Mode::Supervisor => 3,
            Mode::Abort => 4,
            Mode::Undefined => 5,
        }
    }

    /// Index into the 5-slot SPSR bank, or `None` for User/System which have
    /// no SPSR of their own.
    fn spsr_bank_index(self) -> Option<usize> {
        match self {
            Mode::User | Mode::System => None,
            Mode::Fiq => Some(0),
            Mode::Irq => Some(1),
            Mode::Supervisor => Some(2),
            Mode::Abort => Some(3),
            Mode::Undefined => Some(4),
        }
    }
}

/// General-purpose registers, CPSR and SPSRs, with mode-dependent banking.
///
/// r0-r7 and r15 are never banked. r8-r12 are banked only for FIQ (a
/// dedicated shadow bank; every other mode shares the "base" bank). r13/r14
/// are banked per privileged mode plus one shared User/System slot.
#[derive(Debug, Clone)]
pub struct Registers {
    r: [u32; 16],
    fiq_high: [u32; 5],
    base_high: [u32; 5],
    sp_bank: [u32; 6],
    lr_bank: [u32; 6],
    spsr_bank: [u32; 5],
    cpsr: u32,
    mode: Mode,
}

impl Registers {
    pub fn new() -> Self {
        let mut regs = Self {
            r: [0; 16],
            fiq_high: [0; 5],
            base_high: [0; 5],
            sp_bank: [0; 6],
            lr_bank: [0; 6],
            spsr_bank: [0; 5],
            cpsr: 0,
            mode: Mode::System,
        };
        regs.set_cpsr(Mode::System.bits());
        regs
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cpsr(&self) -> u32 {
        self.cpsr
    }

    pub fn flags(&self) -> CpsrFlags {
        CpsrFlags::from_bits_truncate(self.cpsr)
    }

    pub fn set_flags(&mut self, flags: CpsrFlags, value: bool) {
        let mut f = self.flags();
        f.set(flags, value);
        self.cpsr = (self.cpsr & !CpsrFlags::all().bits()) | f.bits();
    }

    pub fn thumb(&self) -> bool {
        self.cpsr & CpsrFlags::THUMB.bits() != 0
    }

    /// Write the full CPSR, performing register-bank swaps if the mode
    /// field changed. Used by mode-changing writes (MSR, SPSR->CPSR copies,
    /// exception entry/return).
    pub fn set_cpsr(&mut self, value: u32) {
        let new_mode = Mode::from_bits(value).unwrap_or(self.mode);
        if new_mode.bits() != self.mode.bits() {
            self.swap_banks(new_mode);
        }
        self.mode = new_mode;
        self.cpsr = value;
    }

    /// Overwrite only the bits selected by `mask` (used by MSR's field
    /// masking); never swaps banks via the mode field unless the control
    /// byte (which carries the mode bits) is among the written bits.
    pub fn write_cpsr_masked(&mut self, value: u32, mask: u32) {
        let merged = (self.cpsr & !mask) | (value & mask);
        self.set_cpsr(merged);
    }

    fn swap_banks(&mut self, new_mode: Mode) {
        let was_fiq = self.mode == Mode::Fiq;
        let will_be_fiq = new_mode == Mode::Fiq;
        if was_fiq != will_be_fiq {
            if was_fiq {
                self.fiq_high.copy_from_slice(&self.r[8..13]);
                self.r[8..13].copy_from_slice(&self.base_high);
            } else {
                self.base_high.copy_from_slice(&self.r[8..13]);
                self.r[8..13].copy_from_slice(&self.fiq_high);
            }
        }
        self.sp_bank[self.mode.sp_lr_bank_index()] = self.r[13];
        self.lr_bank[self.mode.sp_lr_bank_index()] = self.r[14];
        self.r[13] = self.sp_bank[new_mode.sp_lr_bank_index()];
        self.r[14] = self.lr_bank[new_mode.sp_lr_bank_index()];
    }

    /// Read general register `i` as seen by the current mode.
    pub fn get(&self, i: usize) -> u32 {
        self.r[i]
    }

    pub fn set(&mut self, i: usize, value: u32) {
        self.r[i] = value;
    }

    /// Read a general register from the User-mode bank regardless of the
    /// current mode (used for S-bit user-bank block-transfer accesses).
    pub fn get_user_bank(&self, i: usize) -> u32 {
        match i {
            8..=12 if self.mode == Mode::Fiq => self.base_high[i - 8],
            13 => self.sp_bank[Mode::User.sp_lr_bank_index()],
            14 => self.lr_bank[Mode::User.sp_lr_bank_index()],
            _ => self.r[i],
        }
    }

    pub fn set_user_bank(&mut self, i: usize, value: u32) {
        match i {
            8..=12 if self.mode == Mode::Fiq => self.base_high[i - 8] = value,
            13 => self.sp_bank[Mode::User.sp_lr_bank_index()] = value,
            14 => self.lr_bank[Mode::User.sp_lr_bank_index()] = value,
            _ => self.r[i] = value,
        }
    }

    /// Read the SPSR of the current mode; for User/System (which have no
    /// SPSR) this transparently aliases CPSR, matching the source's
    /// documented fallback (see SPEC_FULL.md Design Notes).
    pub fn spsr(&self) -> u32 {
        match self.mode.spsr_bank_index() {
            Some(idx) => self.spsr_bank[idx],
            None => self.cpsr,
        }
    }

    pub fn set_spsr(&mut self, value: u32) {
        if let Some(idx) = self.mode.spsr_bank_index() {
            self.spsr_bank[idx] = value;
        }
    }

    pub fn has_spsr(&self) -> bool {
        self.mode.spsr_bank_index().is_some()
    }

    /// Write the SPSR belonging to `mode` directly, used by exception
    /// entry which must stash the old CPSR into the *new* mode's SPSR.
    pub fn set_spsr_for(&mut self, mode: Mode, value: u32) {
        if let Some(idx) = mode.spsr_bank_index() {
            self.spsr_bank[idx] = value;
        }
    }

    pub fn set_lr_for(&mut self, mode: Mode, value: u32) {
        if mode.sp_lr_bank_index() == self.mode.sp_lr_bank_index() {
            self.r[14] = value;
        } else {
            self.lr_bank[mode.sp_lr_bank_index()] = value;
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
