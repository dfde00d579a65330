//! The 4-bit condition-code evaluator shared by every ARM opcode (and by
//! re-encoded THUMB opcodes, which carry their own condition in the same
//! field position once re-synthesized).

use super::registers::CpsrFlags;

/// Evaluate condition field `code` (bits 31..28 of an ARM opcode) against
/// the flags in `flags`. Code 15 is reserved on ARMv4T but always passes,
/// matching the source's treatment of AL and the reserved slot alike.
pub fn check(code: u32, flags: CpsrFlags) -> bool {
    let n = flags.contains(CpsrFlags::N);
    let z = flags.contains(CpsrFlags::Z);
    let c = flags.contains(CpsrFlags::C);
    let v = flags.contains(CpsrFlags::V);
    match code & 0xF {
        0x0 => z,
        0x1 => !z,
        0x2 => c,
        0x3 => !c,
        0x4 => n,
        0x5 => !n,
        0x6 => v,
        0x7 => !v,
        0x8 => c && !z,
        0x9 => !c || z,
        0xA => n == v,
        0xB => n != v,
        0xC => !z && (n == v),
        0xD => z || (n != v),
        0xE => true,
        0xF => true,
        _ => unreachable!(),
    }
}
