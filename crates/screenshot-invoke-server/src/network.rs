//! Access URLs printed at startup

use std::net::Ipv4Addr;

use sysinfo::Networks;

/// Non-loopback IPv4 addresses of every network interface, sorted.
pub fn external_ipv4_addresses() -> Vec<Ipv4Addr> {
    let networks = Networks::new_with_refreshed_list();

    let mut addrs: Vec<Ipv4Addr> = networks
        .list()
        .values()
        .flat_map(|data| data.ip_networks())
        .filter_map(|net| match net.addr {
            std::net::IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_unspecified() => Some(v4),
            _ => None,
        })
        .collect();
    addrs.sort();
    addrs.dedup();
    addrs
}

/// URLs the server is reachable at: localhost first, then each address.
pub fn access_urls(port: u16, addrs: &[Ipv4Addr]) -> Vec<String> {
    std::iter::once(format!("http://localhost:{port}"))
        .chain(addrs.iter().map(|addr| format!("http://{addr}:{port}")))
        .collect()
}

/// A ready-to-paste request against the local server
pub fn curl_example(port: u16) -> String {
    format!(
        r#"curl -X POST http://localhost:{port}/invoke -H "Content-Type: application/json" -d '{{"method": "callTool", "params": {{"name": "capture", "arguments": {{"region": "full", "windowName": "Calendar", "switchToWindow": true}}}}}}'"#
    )
}
