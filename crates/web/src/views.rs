// sishc admin panel - HTML views
// Hand-rendered pages; the panel carries no templating layer.

use sishc_admin_common::{GlobalConfig, Tunnel, TunnelField};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:.3em .6em;text-align:left}\
label{display:block;margin-top:.6em}\
input{width:20em}\
nav a{margin-right:1em}\
form.inline{display:inline}";

/// Escape text for interpolation into HTML bodies and attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Percent-encode a path segment so tunnel names survive URL embedding.
pub fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Shared page shell with navigation.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{} - sishc admin</title><style>{}</style></head>\n<body>\n<nav><a href=\"/\">Tunnels</a><a href=\"/add\">Add tunnel</a><a href=\"/config\">Global config</a><a href=\"/edit_raw\">Raw config</a></nav>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        STYLE,
        escape(title),
        body
    )
}

/// Tunnel list with inherited values already resolved for display.
pub fn index_page(tunnels: &[Tunnel]) -> String {
    let mut rows = String::new();
    for tunnel in tunnels {
        rows.push_str("<tr>");
        rows.push_str(&format!("<td>{}</td>", escape(&tunnel.name)));
        for field in TunnelField::ALL {
            rows.push_str(&format!("<td>{}</td>", escape(&tunnel.field_text(field))));
        }
        let segment = encode_segment(&tunnel.name);
        rows.push_str(&format!(
            "<td><a href=\"/edit/{0}\">edit</a> <a href=\"/logs/{0}\">logs</a> \
             <form class=\"inline\" method=\"post\" action=\"/delete/{0}\"><button>delete</button></form></td>",
            segment
        ));
        rows.push_str("</tr>\n");
    }

    let mut header = String::from("<tr><th>name</th>");
    for field in TunnelField::ALL {
        header.push_str(&format!("<th>{}</th>", field.key()));
    }
    header.push_str("<th></th></tr>\n");

    let body = if tunnels.is_empty() {
        "<p>No tunnels configured. <a href=\"/add\">Add one.</a></p>".to_string()
    } else {
        format!("<table>\n{}{}</table>", header, rows)
    };
    page("Tunnels", &body)
}

fn tunnel_inputs(name: &str, tunnel: Option<&Tunnel>, global: &GlobalConfig) -> String {
    let mut inputs = format!(
        "<label>name<input name=\"name\" value=\"{}\" required></label>",
        escape(name)
    );
    for field in TunnelField::ALL {
        // Raw stored value; the global default shows as placeholder so
        // an empty input keeps inheriting.
        let value = tunnel.map(|t| t.field_text(field)).unwrap_or_default();
        inputs.push_str(&format!(
            "<label>{0}<input name=\"{0}\" value=\"{1}\" placeholder=\"{2}\"></label>",
            field.key(),
            escape(&value),
            escape(&global.field_text(field))
        ));
    }
    inputs
}

pub fn edit_page(name: &str, tunnel: Option<&Tunnel>, global: &GlobalConfig) -> String {
    let body = match tunnel {
        Some(tunnel) => format!(
            "<form method=\"post\" action=\"/edit/{}\">{}<p><button>Save</button></p></form>",
            encode_segment(name),
            tunnel_inputs(&tunnel.name, Some(tunnel), global)
        ),
        None => format!("<p>No such tunnel: {}</p>", escape(name)),
    };
    page(&format!("Edit {}", name), &body)
}

pub fn add_page(global: &GlobalConfig) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/add\">{}<p><button>Add</button></p></form>",
        tunnel_inputs("", None, global)
    );
    page("Add tunnel", &body)
}

pub fn logs_page(name: &str, lines: &[String]) -> String {
    let body = if lines.is_empty() {
        format!("<p>No log lines mention {}.</p>", escape(name))
    } else {
        let mut pre = String::from("<pre>");
        for line in lines {
            pre.push_str(&escape(line));
            pre.push('\n');
        }
        pre.push_str("</pre>");
        pre
    };
    page(&format!("Logs for {}", name), &body)
}

pub fn config_page(global: &GlobalConfig) -> String {
    let mut inputs = String::new();
    for field in TunnelField::ALL {
        inputs.push_str(&format!(
            "<label>{0}<input name=\"{0}\" value=\"{1}\"></label>",
            field.key(),
            escape(&global.field_text(field))
        ));
    }
    let body = format!(
        "<form method=\"post\" action=\"/config\">{}<p><button>Save</button></p></form>",
        inputs
    );
    page("Global config", &body)
}

pub fn edit_raw_page(raw: &str) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/edit_raw\"><textarea name=\"raw_content\" rows=\"30\" cols=\"100\">{}</textarea><p><button>Save</button></p></form>",
        escape(raw)
    );
    page("Raw config", &body)
}
