use crate::dom::escape_html;
use crate::host::Host;
use crate::models::{Network, NetworkType};

/// Icon name for a network type; unknown types get the "slash" fallback.
pub fn network_icon(kind: &NetworkType) -> &'static str {
    match kind {
        NetworkType::Public => "globe",
        NetworkType::Private => "lock",
        NetworkType::Unknown | NetworkType::Other(_) => "slash",
    }
}

fn network_tooltip(kind: &NetworkType) -> Option<&'static str> {
    match kind {
        NetworkType::Public => Some("service:vm:network-public"),
        NetworkType::Private => Some("service:vm:network-private"),
        _ => None,
    }
}

/// `<icon> ip [dns]` per entry, joined with `, `.
pub fn render_networks<H: Host + ?Sized>(host: &H, networks: &[Network]) -> String {
    networks
        .iter()
        .map(|n| {
            let mut entry = host.icon(network_icon(&n.kind), network_tooltip(&n.kind));
            entry.push_str(&escape_html(&n.ip));
            if let Some(dns) = n.dns.as_deref().filter(|d| !d.is_empty()) {
                entry.push_str(&format!(" [{}]", escape_html(dns)));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join(", ")
}
