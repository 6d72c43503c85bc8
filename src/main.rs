use std::path::PathBuf;

use midir::MidiOutput;
use structopt::StructOpt;
use strum::IntoEnumIterator;

use launchforce::device::launchpad_mini_mk3::{DawClear, Layout, DEFAULT_SCROLL_SPEED};
use launchforce::device::{self, DeviceType, LaunchpadMiniMk3};
use launchforce::midi::{self, MidiSink};
use launchforce::script::{self, Scroll, Step};
use launchforce::{Error, Result};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "launchforce",
    about = "LaunchForce builds and sends Launchpad SysEx messages"
)]
struct LaunchForce {
    /// Also send the messages to the device
    #[structopt(long)]
    send: bool,

    /// Name of the device as listed
    #[structopt(long, default_value = "launchpad-mini-mk3")]
    device: String,

    #[structopt(subcommand)]
    subcmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// List ports, devices, commands or layouts
    List {
        #[structopt(subcommand)]
        subcmd: Option<List>,
    },
    /// Select the active layout
    Layout {
        #[structopt(parse(try_from_str = parse_layout))]
        layout: Layout,
    },
    /// Scroll text across the grid
    Scroll {
        /// Palette color index
        color: u8,
        text: String,
        #[structopt(long = "loop")]
        should_loop: bool,
        /// Scroll speed, 7 when not given
        #[structopt(long)]
        speed: Option<u8>,
    },
    /// Enter or leave Programmer mode
    Programmer {
        #[structopt(parse(try_from_str = parse_switch))]
        enable: bool,
    },
    /// Enter or leave DAW mode
    Daw {
        #[structopt(parse(try_from_str = parse_switch))]
        enable: bool,
    },
    /// Clear DAW layouts, all of them unless told otherwise
    DawClear {
        #[structopt(long)]
        keep_session: bool,
        #[structopt(long)]
        keep_drumrack: bool,
        #[structopt(long)]
        keep_control_change: bool,
    },
    /// Raw pad color bytes, as in the Programmer's Reference
    Lights { colors: Vec<u8> },
    /// LED brightness, 0 to 127
    Brightness { brightness: u8 },
    /// Turn all LEDs off
    Sleep,
    /// Turn LEDs back on
    Wake,
    /// Run a YAML command script
    Script {
        #[structopt(parse(from_os_str))]
        file: PathBuf,
    },
    /// Show the command carried by a hex encoded message
    Decode { message: String },
}

#[derive(StructOpt, Debug)]
enum List {
    /// All active MIDI output ports
    Ports,
    /// All known devices
    Devices,
    /// A device's commands and opcodes
    Commands,
    /// Selectable layouts
    Layouts,
}

fn parse_switch(value: &str) -> Result<bool> {
    match value {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(Error::BadSwitch {
            value: value.to_string(),
        }),
    }
}

fn parse_layout(value: &str) -> Result<Layout> {
    value.parse().map_err(|_| Error::UnknownLayout {
        name: value.to_string(),
    })
}

fn step(cmd: Command) -> Step {
    match cmd {
        Command::Layout { layout } => Step::Layout(layout),
        Command::Scroll {
            color,
            text,
            should_loop,
            speed,
        } => Step::Scroll(Scroll {
            color,
            text,
            should_loop,
            speed: speed.unwrap_or(DEFAULT_SCROLL_SPEED),
        }),
        Command::Programmer { enable } => Step::Programmer(enable),
        Command::Daw { enable } => Step::Daw(enable),
        Command::DawClear {
            keep_session,
            keep_drumrack,
            keep_control_change,
        } => Step::DawClear(DawClear {
            session: !keep_session,
            drumrack: !keep_drumrack,
            control_change: !keep_control_change,
        }),
        Command::Lights { colors } => Step::Lights(colors),
        Command::Brightness { brightness } => Step::Brightness(brightness),
        Command::Sleep => Step::Sleep(true),
        Command::Wake => Step::Sleep(false),
        Command::List { .. } | Command::Decode { .. } | Command::Script { .. } => {
            unreachable!("{:?} does not encode to a single step", cmd)
        }
    }
}

fn list(subcmd: List, device_name: &str) -> Result<()> {
    match subcmd {
        List::Ports => {
            let midi_out = MidiOutput::new(midi::CLIENT_NAME)
                .map_err(|source| Error::MidiInit { source })?;
            for port in midi::output_ports(&midi_out)? {
                println!("{}", port.name)
            }
        }
        List::Devices => DeviceType::iter().for_each(|dev| println!("{}", dev)),
        List::Commands => {
            let device_type = device::device_type(device_name)?;
            for (name, opcode) in device_type.driver().dictionary().commands.iter() {
                println!("{:>3} {}", opcode, name)
            }
        }
        List::Layouts => Layout::iter().for_each(|layout| println!("{}", layout)),
    }
    Ok(())
}

fn decode(message: &str, device_type: DeviceType) -> Result<()> {
    let bytes = hex::decode(message.replace(' ', ""))
        .map_err(|source| Error::BadHex { source })?;
    let driver = device_type.driver();
    let dict = driver.dictionary();
    let (opcode, params) = dict.sysex.split(&bytes).ok_or_else(|| Error::NotSysex {
        device: driver.name().to_string(),
    })?;
    let name = dict.command_name(opcode).unwrap_or("unknown");
    println!("{} ({}) {:?}", name, opcode, params);
    Ok(())
}

fn run(app: LaunchForce) -> Result<()> {
    let (device_type, messages) = match app.subcmd {
        Command::List { subcmd } => return list(subcmd.unwrap_or(List::Ports), &app.device),
        Command::Decode { message } => {
            return decode(&message, device::device_type(&app.device)?)
        }
        Command::Script { file } => {
            let script = script::load(&file)?;
            (script.device_type()?, script.encode()?)
        }
        cmd => {
            let device_type = device::device_type(&app.device)?;
            let lp = match device_type {
                DeviceType::LaunchpadMiniMk3 => LaunchpadMiniMk3::new(),
            };
            (device_type, vec![step(cmd).encode(&lp)])
        }
    };

    for msg in &messages {
        println!("{}", hex::encode(msg));
    }

    if app.send {
        let driver = device_type.driver();
        let mut sink = MidiSink::open(driver.as_ref())?;
        midi::transmit_all(&mut sink, &messages)?;
        sink.close();
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("LAUNCHFORCE_LOG", "warn"))
        .init();

    let app = LaunchForce::from_args();
    if let Err(err) = run(app) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
