use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unknown device '{}'. Use `launchforce list devices` for known device names", name))]
    UnknownDevice {
        name: String,
    },
    #[snafu(display("Unknown layout '{}'. Use `launchforce list layouts` for known layout names", name))]
    UnknownLayout {
        name: String,
    },
    #[snafu(display("Expected 'on' or 'off', got '{}'", value))]
    BadSwitch {
        value: String,
    },
    #[snafu(display("No MIDI output port matching '{}'", port_name))]
    NoOutputPort {
        port_name: String,
    },
    #[snafu(display("MIDI client initialization failed: {}", source))]
    MidiInit {
        source: midir::InitError,
    },
    #[snafu(display("Could not read MIDI port info: {}", source))]
    MidiPortInfo {
        source: midir::PortInfoError,
    },
    #[snafu(display("Could not connect to MIDI port '{}': {}", port_name, reason))]
    MidiConnect {
        port_name: String,
        reason: String,
    },
    #[snafu(display("Could not send to MIDI port '{}': {}", port_name, source))]
    MidiSend {
        port_name: String,
        source: midir::SendError,
    },
    #[snafu(display("Could not read script {}: {}", path.display(), source))]
    ScriptRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Malformed script: {}", source))]
    ScriptParse {
        source: serde_yaml::Error,
    },
    #[snafu(display("Bad hex message: {}", source))]
    BadHex {
        source: hex::FromHexError,
    },
    #[snafu(display("Not a {} SysEx message", device))]
    NotSysex {
        device: String,
    },
}
