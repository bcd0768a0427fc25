// Default inheritance between tunnel records and the global configuration
//
// Two pure functions independent of the web layer: `resolve_defaults`
// fills a record for display, `collapse_to_defaults` blanks submitted
// values that match the current global default so the stored record
// keeps inheriting.

use serde::Deserialize;

use crate::config::{ConfigValue, GlobalConfig, Tunnel, TunnelField};

/// A tunnel create/edit submission.
///
/// Fields are optional so a partial submission leaves the missing fields
/// of an existing record untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TunnelForm {
    pub name: String,
    #[serde(default)]
    pub ssh_key: Option<String>,
    #[serde(default)]
    pub local_protocol: Option<String>,
    #[serde(default)]
    pub local_host: Option<String>,
    #[serde(default)]
    pub local_port: Option<String>,
    #[serde(default)]
    pub remote_port: Option<String>,
    #[serde(default)]
    pub remote_server: Option<String>,
}

impl TunnelForm {
    pub fn slot_mut(&mut self, field: TunnelField) -> &mut Option<String> {
        match field {
            TunnelField::SshKey => &mut self.ssh_key,
            TunnelField::LocalProtocol => &mut self.local_protocol,
            TunnelField::LocalHost => &mut self.local_host,
            TunnelField::LocalPort => &mut self.local_port,
            TunnelField::RemotePort => &mut self.remote_port,
            TunnelField::RemoteServer => &mut self.remote_server,
        }
    }

    /// Merge the submission into an existing record. Submitted values
    /// replace stored ones (including the name); fields absent from the
    /// submission keep their stored value.
    pub fn apply_to(self, tunnel: &mut Tunnel) {
        tunnel.name = self.name;
        let submitted = [
            (TunnelField::SshKey, self.ssh_key),
            (TunnelField::LocalProtocol, self.local_protocol),
            (TunnelField::LocalHost, self.local_host),
            (TunnelField::LocalPort, self.local_port),
            (TunnelField::RemotePort, self.remote_port),
            (TunnelField::RemoteServer, self.remote_server),
        ];
        for (field, value) in submitted {
            if let Some(value) = value {
                *tunnel.slot_mut(field) = Some(ConfigValue::Text(value));
            }
        }
    }

    /// Build a brand-new record from the submission.
    pub fn into_tunnel(self) -> Tunnel {
        let mut tunnel = Tunnel::default();
        self.apply_to(&mut tunnel);
        tunnel
    }
}

/// Fill unset (missing or empty) fields with the global default, for
/// display only. The result is never written back.
pub fn resolve_defaults(mut tunnel: Tunnel, global: &GlobalConfig) -> Tunnel {
    for field in TunnelField::ALL {
        if tunnel.inherits(field) {
            *tunnel.slot_mut(field) = global.get(field).cloned();
        }
    }
    tunnel
}

/// Blank out submitted values that textually equal the current global
/// default, so the record stores "inherits" instead of freezing a copy.
/// A missing global value compares as the empty string; `name` is never
/// collapsed.
pub fn collapse_to_defaults(form: &mut TunnelForm, global: &GlobalConfig) {
    for field in TunnelField::ALL {
        let default = global.field_text(field);
        if let Some(value) = form.slot_mut(field) {
            if *value == default {
                value.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> GlobalConfig {
        GlobalConfig {
            ssh_key: Some(ConfigValue::from("~/.ssh/id_ed25519")),
            local_protocol: Some(ConfigValue::from("http")),
            local_host: Some(ConfigValue::from("localhost")),
            local_port: Some(ConfigValue::Int(8080)),
            remote_server: Some(ConfigValue::from("tunnel.example.com")),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_fills_missing_and_empty_fields() {
        let mut tunnel = Tunnel::new("web");
        tunnel.local_host = Some(ConfigValue::from(""));
        tunnel.local_port = Some(ConfigValue::from("9000"));

        let resolved = resolve_defaults(tunnel, &global());
        assert_eq!(resolved.ssh_key, Some(ConfigValue::from("~/.ssh/id_ed25519")));
        assert_eq!(resolved.local_host, Some(ConfigValue::from("localhost")));
        // A set field is left alone.
        assert_eq!(resolved.local_port, Some(ConfigValue::from("9000")));
        // No global default either: stays unset.
        assert_eq!(resolved.remote_port, None);
    }

    #[test]
    fn test_collapse_blanks_values_equal_to_global() {
        let mut form = TunnelForm {
            name: "web".to_string(),
            local_host: Some("localhost".to_string()),
            remote_server: Some("other.example.com".to_string()),
            ..Default::default()
        };
        collapse_to_defaults(&mut form, &global());
        assert_eq!(form.local_host.as_deref(), Some(""));
        assert_eq!(form.remote_server.as_deref(), Some("other.example.com"));
        assert_eq!(form.name, "web");
    }

    #[test]
    fn test_collapse_compares_integer_globals_textually() {
        let mut form = TunnelForm {
            name: "web".to_string(),
            local_port: Some("8080".to_string()),
            ..Default::default()
        };
        collapse_to_defaults(&mut form, &global());
        assert_eq!(form.local_port.as_deref(), Some(""));
    }

    #[test]
    fn test_collapse_with_unset_global_leaves_value() {
        // remote_port has no global default; a real value must survive.
        let mut form = TunnelForm {
            name: "web".to_string(),
            remote_port: Some("2222".to_string()),
            ..Default::default()
        };
        collapse_to_defaults(&mut form, &global());
        assert_eq!(form.remote_port.as_deref(), Some("2222"));
    }

    #[test]
    fn test_apply_to_preserves_unsubmitted_fields() {
        let mut tunnel = Tunnel::new("db");
        tunnel.ssh_key = Some(ConfigValue::from("~/.ssh/db_key"));
        tunnel.extra.insert(
            "comment".to_string(),
            serde_yaml::Value::from("production"),
        );

        let form = TunnelForm {
            name: "db".to_string(),
            local_port: Some("5432".to_string()),
            ..Default::default()
        };
        form.apply_to(&mut tunnel);

        assert_eq!(tunnel.ssh_key, Some(ConfigValue::from("~/.ssh/db_key")));
        assert_eq!(tunnel.local_port, Some(ConfigValue::from("5432")));
        assert_eq!(
            tunnel.extra.get("comment"),
            Some(&serde_yaml::Value::from("production"))
        );
    }
}
