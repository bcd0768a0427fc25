// Configuration structures for the sishc admin panel

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar value from the configuration file.
///
/// The file schema allows both representations for the same key: the
/// global editor writes ports as integers while tunnel forms submit
/// text, and hand-edited files may contain either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i64),
    Text(String),
}

impl ConfigValue {
    /// The empty string is the transient "unset" marker coming from form
    /// submissions; it is never a stored value.
    pub fn is_empty(&self) -> bool {
        matches!(self, ConfigValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Int(value) => write!(f, "{}", value),
            ConfigValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(text: &str) -> Self {
        ConfigValue::Text(text.to_string())
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

/// The six tunnel fields that fall back to the global configuration when
/// a tunnel leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelField {
    SshKey,
    LocalProtocol,
    LocalHost,
    LocalPort,
    RemotePort,
    RemoteServer,
}

impl TunnelField {
    pub const ALL: [TunnelField; 6] = [
        TunnelField::SshKey,
        TunnelField::LocalProtocol,
        TunnelField::LocalHost,
        TunnelField::LocalPort,
        TunnelField::RemotePort,
        TunnelField::RemoteServer,
    ];

    /// The YAML key (and form field name) for this field.
    pub fn key(&self) -> &'static str {
        match self {
            TunnelField::SshKey => "ssh_key",
            TunnelField::LocalProtocol => "local_protocol",
            TunnelField::LocalHost => "local_host",
            TunnelField::LocalPort => "local_port",
            TunnelField::RemotePort => "remote_port",
            TunnelField::RemoteServer => "remote_server",
        }
    }
}

/// Top-level configuration document: global defaults, the tunnel list,
/// and whatever other keys the file happens to carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_protocol: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_host: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_port: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_port: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_server: Option<ConfigValue>,
    /// Tunnel records in file order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tunnels: Vec<Tunnel>,
    /// Unrecognized top-level keys, preserved across rewrites.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl GlobalConfig {
    pub fn get(&self, field: TunnelField) -> Option<&ConfigValue> {
        self.slot(field).as_ref()
    }

    /// Display text for a global default, empty when unset.
    pub fn field_text(&self, field: TunnelField) -> String {
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }

    fn slot(&self, field: TunnelField) -> &Option<ConfigValue> {
        match field {
            TunnelField::SshKey => &self.ssh_key,
            TunnelField::LocalProtocol => &self.local_protocol,
            TunnelField::LocalHost => &self.local_host,
            TunnelField::LocalPort => &self.local_port,
            TunnelField::RemotePort => &self.remote_port,
            TunnelField::RemoteServer => &self.remote_server,
        }
    }

    pub fn slot_mut(&mut self, field: TunnelField) -> &mut Option<ConfigValue> {
        match field {
            TunnelField::SshKey => &mut self.ssh_key,
            TunnelField::LocalProtocol => &mut self.local_protocol,
            TunnelField::LocalHost => &mut self.local_host,
            TunnelField::LocalPort => &mut self.local_port,
            TunnelField::RemotePort => &mut self.remote_port,
            TunnelField::RemoteServer => &mut self.remote_server,
        }
    }

    /// Drop top-level keys holding the empty string. Tunnel records are
    /// pruned separately on tunnel-list saves.
    pub fn prune_empty(&mut self) {
        for field in TunnelField::ALL {
            let slot = self.slot_mut(field);
            if slot.as_ref().is_some_and(ConfigValue::is_empty) {
                *slot = None;
            }
        }
        self.extra.retain(|_, value| value.as_str() != Some(""));
    }
}

/// A named tunnel record. A field left unset (or holding the empty
/// string) inherits the global value at display time; the inherited
/// value is never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tunnel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_protocol: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_host: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_port: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_port: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_server: Option<ConfigValue>,
    /// Unrecognized keys, preserved across rewrites.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Tunnel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, field: TunnelField) -> Option<&ConfigValue> {
        match field {
            TunnelField::SshKey => self.ssh_key.as_ref(),
            TunnelField::LocalProtocol => self.local_protocol.as_ref(),
            TunnelField::LocalHost => self.local_host.as_ref(),
            TunnelField::LocalPort => self.local_port.as_ref(),
            TunnelField::RemotePort => self.remote_port.as_ref(),
            TunnelField::RemoteServer => self.remote_server.as_ref(),
        }
    }

    /// Display text for a stored field, empty when unset.
    pub fn field_text(&self, field: TunnelField) -> String {
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }

    pub fn slot_mut(&mut self, field: TunnelField) -> &mut Option<ConfigValue> {
        match field {
            TunnelField::SshKey => &mut self.ssh_key,
            TunnelField::LocalProtocol => &mut self.local_protocol,
            TunnelField::LocalHost => &mut self.local_host,
            TunnelField::LocalPort => &mut self.local_port,
            TunnelField::RemotePort => &mut self.remote_port,
            TunnelField::RemoteServer => &mut self.remote_server,
        }
    }

    /// True when the field should show the global value instead.
    pub fn inherits(&self, field: TunnelField) -> bool {
        self.get(field).map_or(true, ConfigValue::is_empty)
    }

    /// Drop keys holding the empty string.
    pub fn prune_empty(&mut self) {
        for field in TunnelField::ALL {
            let slot = self.slot_mut(field);
            if slot.as_ref().is_some_and(ConfigValue::is_empty) {
                *slot = None;
            }
        }
        self.extra.retain(|_, value| value.as_str() != Some(""));
    }
}
