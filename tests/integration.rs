//! Integration tests exercising `Bus` and `Cpu` together through their
//! public API, the way a driver would: load opcodes and data into the bus,
//! then drive execution one `cycle()` at a time.

use rgba::{Bus, CpsrFlags, Cpu, Mode};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn unmatched_opcode_logs_and_raises_the_undefined_exception() {
    init_logging();
    let mut cpu = Cpu::new();
    let mut bus = Bus::new();
    bus.write32(0, 0xEC00_0000); // coprocessor space (bits27..24=1100): no ARM table entry matches

    cpu.cycle(&mut bus);

    assert_eq!(cpu.mode(), Mode::Undefined);
    assert_eq!(cpu.read_register(15), 0x04);
}

#[test]
fn bus_round_trips_bytes_halfwords_and_words() {
    let mut bus = Bus::new();
    bus.write32(0x0200_0000, 0xDEAD_BEEF);
    assert_eq!(bus.read32(0x0200_0000), 0xDEAD_BEEF);
    assert_eq!(bus.read16(0x0200_0002), 0xDEAD);
}

#[test]
fn branch_targets_instruction_address_plus_prefetch_and_offset() {
    let mut cpu = Cpu::new();
    let mut bus = Bus::new();
    bus.write32(0, 0xEA00_0002); // B +8 (word offset 2)

    cpu.cycle(&mut bus);

    assert_eq!(cpu.read_register(15), 0x10);
}

#[test]
fn bx_with_bit0_set_enters_thumb_state_and_clears_the_low_bit() {
    let mut cpu = Cpu::new();
    let mut bus = Bus::new();
    bus.write32(0, 0xE3A0_0408); // MOV r0, #0x08000000
    bus.write32(4, 0xE380_0001); // ORR r0, r0, #1
    bus.write32(8, 0xE12F_FF10); // BX r0

    for _ in 0..3 {
        cpu.cycle(&mut bus);
    }

    assert_ne!(cpu.cpsr() & CpsrFlags::THUMB.bits(), 0);
    assert_eq!(cpu.read_register(15), 0x0800_0000);
}

#[test]
fn thumb_opcode_executes_through_the_arm_reencoder_after_a_mode_switch() {
    let mut cpu = Cpu::new();
    let mut bus = Bus::new();
    bus.write32(0, 0xE3A0_0408); // MOV r0, #0x08000000
    bus.write32(4, 0xE380_0001); // ORR r0, r0, #1
    bus.write32(8, 0xE12F_FF10); // BX r0 -> Thumb state, pc = 0x08000000
    bus.write16(0x0800_0000, 0x2205); // MOV r2, #5 (Thumb format 3)

    for _ in 0..4 {
        cpu.cycle(&mut bus);
    }

    assert_eq!(cpu.read_register(2), 5);
    assert_ne!(cpu.cpsr() & CpsrFlags::THUMB.bits(), 0);
}

#[test]
fn swi_during_thumb_execution_returns_to_arm_supervisor_mode() {
    let mut cpu = Cpu::new();
    let mut bus = Bus::new();
    bus.write32(0, 0xE3A0_0408); // MOV r0, #0x08000000
    bus.write32(4, 0xE380_0001); // ORR r0, r0, #1
    bus.write32(8, 0xE12F_FF10); // BX r0 -> Thumb state
    bus.write16(0x0800_0000, 0xDF00); // SWI #0 (Thumb)

    for _ in 0..4 {
        cpu.cycle(&mut bus);
    }

    assert_eq!(cpu.mode(), Mode::Supervisor);
    assert_eq!(cpu.read_register(15), 0x08);
    assert_eq!(cpu.cpsr() & CpsrFlags::THUMB.bits(), 0);
}
