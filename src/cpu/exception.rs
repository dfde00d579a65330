//! Exception entry: the seven fixed vectors and the mode/mask transition
//! each one performs on entry (§4.7).

use super::registers::{CpsrFlags, Mode};
use super::Cpu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exception {
    Reset,
    Undefined,
    SoftwareInterrupt,
    PrefetchAbort,
    DataAbort,
    Irq,
    Fiq,
}

impl Exception {
    fn vector(self) -> u32 {
        match self {
            Exception::Reset => 0x00,
            Exception::Undefined => 0x04,
            Exception::SoftwareInterrupt => 0x08,
            Exception::PrefetchAbort => 0x0C,
            Exception::DataAbort => 0x10,
            Exception::Irq => 0x18,
            Exception::Fiq => 0x1C,
        }
    }

    fn new_mode(self) -> Mode {
        match self {
            Exception::Reset => Mode::Supervisor,
            Exception::Undefined => Mode::Undefined,
            Exception::SoftwareInterrupt => Mode::Supervisor,
            Exception::PrefetchAbort => Mode::Abort,
            Exception::DataAbort => Mode::Abort,
            Exception::Irq => Mode::Irq,
            Exception::Fiq => Mode::Fiq,
        }
    }

    fn sets_fiq_mask(self) -> bool {
        matches!(self, Exception::Reset | Exception::Fiq)
    }
}

impl Cpu {
    /// Raise `exception`, bypassing the IRQ/FIQ mask checks a caller (e.g.
    /// `interrupt`/`fast_interrupt`) already performed.
    pub(super) fn enter_exception(&mut self, exception: Exception) {
        let old_cpsr = self.regs.cpsr();
        let return_pc = self.regs.get(15);
        let new_mode = exception.new_mode();

        self.regs.set_cpsr(new_mode.bits() | (old_cpsr & !super::registers::MODE_MASK));
        self.regs.set_lr_for(new_mode, return_pc);
        self.regs.set_spsr_for(new_mode, old_cpsr);
        self.regs.set_flags(CpsrFlags::THUMB, false);
        self.regs.set_flags(CpsrFlags::IRQ_DISABLE, true);
        if exception.sets_fiq_mask() {
            self.regs.set_flags(CpsrFlags::FIQ_DISABLE, true);
        }
        self.regs.set(15, exception.vector());
    }

    /// Raise IRQ unless currently masked.
    pub fn interrupt(&mut self) {
        if !self.regs.flags().contains(CpsrFlags::IRQ_DISABLE) {
            self.enter_exception(Exception::Irq);
        }
    }

    /// Raise FIQ unless currently masked.
    pub fn fast_interrupt(&mut self) {
        if !self.regs.flags().contains(CpsrFlags::FIQ_DISABLE) {
            self.enter_exception(Exception::Fiq);
        }
    }
}
