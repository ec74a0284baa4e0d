use std::path::PathBuf;

use retrace_6502::{Bus, Cpu, TraceEmitter};

/// Flat 64 KiB RAM image. Real targets hang peripherals off the bus;
/// for trace diffing a plain byte array is enough.
struct FlatBus {
    memory: [u8; 0x10000],
}

impl Bus for FlatBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let image_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Usage: trace_dump <memory_image> [steps]");
        std::process::exit(2);
    });
    let steps: u64 = args
        .next()
        .unwrap_or_else(|| "100".to_string())
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("Invalid step count; expected an integer.");
            std::process::exit(2);
        });

    let image = std::fs::read(&image_path).unwrap_or_else(|err| {
        eprintln!("Failed to read '{}': {err}", image_path.display());
        std::process::exit(1);
    });
    if image.len() > 0x10000 {
        eprintln!(
            "Memory image is {} bytes; at most 65536 fit the address space.",
            image.len()
        );
        std::process::exit(1);
    }

    let mut bus = FlatBus {
        memory: [0; 0x10000],
    };
    bus.memory[..image.len()].copy_from_slice(&image);

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    let emitter = TraceEmitter::new();
    for _ in 0..steps {
        let record = cpu.step(&mut bus);
        println!("{}", emitter.line(&record));
        if cpu.is_jammed() {
            eprintln!("Core jammed at ${:04X}; stopping.", cpu.regs.pc);
            break;
        }
    }
}
