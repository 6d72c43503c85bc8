use midir::{MidiOutput, MidiOutputConnection};
use snafu::{OptionExt, ResultExt};

use crate::device::Driver;
use crate::error::{self, Result};

pub const CLIENT_NAME: &str = "LaunchForce";

/// Where encoded messages go. Bytes are sent as given.
pub trait Transmit {
    fn transmit(&mut self, bytes: &[u8]) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct MidiPort {
    pub number: usize,
    pub name: String,
}

pub fn output_ports(midi_client: &MidiOutput) -> Result<Vec<MidiPort>> {
    let mut v = vec![];
    for number in 0..midi_client.port_count() {
        let name = midi_client.port_name(number).context(error::MidiPortInfo)?;
        v.push(MidiPort { name, number })
    }
    Ok(v)
}

fn output_port(midi_client: &MidiOutput, prefix: &str) -> Result<Option<MidiPort>> {
    Ok(output_ports(midi_client)?
        .into_iter()
        .find(|port| port.name.starts_with(prefix)))
}

pub struct MidiSink {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidiSink {
    /// Connect to the first output port named after the driver's MIDI out port.
    pub fn open(driver: &dyn Driver) -> Result<Self> {
        let midi_client = MidiOutput::new(CLIENT_NAME).context(error::MidiInit)?;
        let port = output_port(&midi_client, driver.midi_out())?.context(error::NoOutputPort {
            port_name: driver.midi_out(),
        })?;
        let connection = midi_client
            .connect(port.number, &port.name)
            .map_err(|err| error::Error::MidiConnect {
                port_name: port.name.clone(),
                reason: err.to_string(),
            })?;
        info!("Connected to {} on '{}'", driver.name(), port.name);
        Ok(MidiSink {
            connection,
            port_name: port.name,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn close(self) {
        self.connection.close();
    }
}

impl Transmit for MidiSink {
    fn transmit(&mut self, bytes: &[u8]) -> Result<()> {
        debug!("{} <- {}", self.port_name, hex::encode(bytes));
        self.connection.send(bytes).context(error::MidiSend {
            port_name: self.port_name.as_str(),
        })
    }
}

/// Keeps transmitted messages in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    pub messages: Vec<Vec<u8>>,
}

impl Transmit for Recorder {
    fn transmit(&mut self, bytes: &[u8]) -> Result<()> {
        trace!("recorded {}", hex::encode(bytes));
        self.messages.push(bytes.to_vec());
        Ok(())
    }
}

/// Send every message in order, stopping at the first failure.
pub fn transmit_all<T: Transmit + ?Sized>(sink: &mut T, messages: &[Vec<u8>]) -> Result<()> {
    for msg in messages {
        sink.transmit(msg)?;
    }
    Ok(())
}
