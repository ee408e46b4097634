// CLASSIFICATION: COMMUNITY
// Filename: ttymux_demo.rs v0.2
// Author: Lukas Bower
// Date Modified: 2027-09-04

//! Demonstration harness for the ttymux driver.
//!
//! Installs the global driver over simulated hardware, plays the display
//! from a pump thread, types a scripted line while a writer thread sends
//! a banner, reads the line back and dumps the statistics snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::info;

use ttymux::{api, SimulatedHardware, TtyError};

#[derive(Debug, Parser)]
struct DemoArgs {
    /// Terminal to exercise.
    #[arg(long, default_value_t = 0)]
    term: usize,

    /// Line "typed" on the simulated keyboard.
    #[arg(long, default_value = "hello, terminal")]
    type_line: String,

    /// Banner written to the display while the line is being typed.
    #[arg(long, default_value = "ttymux online\n")]
    banner: String,

    /// Dump the statistics snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = DemoArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("ttymux_demo: {e}");
        std::process::exit(1);
    }
}

fn run(args: &DemoArgs) -> Result<(), TtyError> {
    let term = args.term;
    let hw = Arc::new(SimulatedHardware::new());
    api::init_terminal_driver(hw.clone())?;
    api::init_terminal(term)?;

    // Display side: acknowledge each transmitted byte so the channel
    // keeps moving while user threads block.
    let done = Arc::new(AtomicBool::new(false));
    let pump_hw = hw.clone();
    let pump_done = done.clone();
    let pump = thread::spawn(move || {
        while !pump_done.load(Ordering::Relaxed) {
            if pump_hw.take_transmit_complete(term) {
                api::transmit_interrupt(term);
            } else {
                thread::sleep(Duration::from_micros(50));
            }
        }
    });

    // Keyboard side: type the scripted line, one interrupt per byte.
    let typed = args.type_line.clone();
    let type_hw = hw.clone();
    let typist = thread::spawn(move || {
        for &b in typed.as_bytes() {
            type_hw.latch_input(term, b);
            api::receive_interrupt(term);
        }
        type_hw.latch_input(term, b'\n');
        api::receive_interrupt(term);
    });

    let banner = args.banner.clone().into_bytes();
    let writer = thread::spawn(move || api::write_terminal(term, &banner));

    let mut line = [0u8; 256];
    let n = api::read_terminal(term, &mut line)?;
    info!("read {n} bytes back from terminal {term}");
    println!("line: {}", String::from_utf8_lossy(&line[..n]).trim_end());

    typist.join().expect("typist thread");
    let written = writer.join().expect("writer thread")?;
    info!("banner write accepted {written} bytes");

    // Let the tail of the output drain before stopping the display.
    thread::sleep(Duration::from_millis(50));
    done.store(true, Ordering::Relaxed);
    pump.join().expect("pump thread");

    let stats = api::terminal_driver_statistics()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats).expect("stats serialize"));
    } else {
        for (i, s) in stats.iter().enumerate() {
            println!(
                "term {i}: tty_in={} tty_out={} user_in={} user_out={}",
                s.tty_in, s.tty_out, s.user_in, s.user_out
            );
        }
    }
    println!("display: {:?}", String::from_utf8_lossy(&hw.output(term)));
    Ok(())
}
