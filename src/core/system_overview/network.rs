//! Interface counters, connection counts and the busiest network processes.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::types::{ConnectionCounts, InterfaceStats, NetworkSnapshot};
use crate::core::process_monitor::{list_processes, Category};
use crate::error::{ResmonError, Result};
use crate::platform::command::CommandRunner;

/// Name Mtu Network Address Ipkts Ierrs Idrop Opkts Oerrs Coll
///
/// Link rows have no Address, so the counters are read from the right.
const NETSTAT_COUNTER_COLUMNS: usize = 6;
const NETSTAT_MIN_COLUMNS: usize = 3 + NETSTAT_COUNTER_COLUMNS;

/// Parse `netstat -i`. Later rows for the same interface replace earlier ones.
pub fn parse_interfaces(output: &str) -> BTreeMap<String, InterfaceStats> {
    let mut interfaces = BTreeMap::new();

    for line in output.lines().skip(1) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < NETSTAT_MIN_COLUMNS || parts[0].starts_with("Name") {
            debug!("Skipping netstat row {:?}", line);
            continue;
        }

        let counters = &parts[parts.len() - NETSTAT_COUNTER_COLUMNS..];
        interfaces.insert(
            parts[0].to_string(),
            InterfaceStats {
                packets_in: counters[0].to_string(),
                errors_in: counters[1].to_string(),
                packets_out: counters[3].to_string(),
                errors_out: counters[4].to_string(),
                collisions: counters[5].to_string(),
            },
        );
    }

    interfaces
}

/// Count TCP and UDP sockets in `netstat -an` output.
///
/// This counts occurrences of the literal tags `tcp4`, `tcp6`, `udp4` and
/// `udp6` anywhere in the text rather than classifying each row, so a tag
/// that shows up inside some other column is counted too.
pub fn count_connections(output: &str) -> ConnectionCounts {
    let occurrences = |tag: &str| output.matches(tag).count();

    let tcp_connections = occurrences("tcp4") + occurrences("tcp6");
    let udp_connections = occurrences("udp4") + occurrences("udp6");

    ConnectionCounts {
        tcp_connections,
        udp_connections,
        total_connections: tcp_connections + udp_connections,
    }
}

/// Collect the network snapshot.
///
/// Interfaces, connection counts and top processes are gathered
/// independently; a part that fails is left out. The snapshot only fails when
/// every part failed.
pub fn collect<R: CommandRunner + ?Sized>(runner: &R, top_processes: usize) -> Result<NetworkSnapshot> {
    let mut snapshot = NetworkSnapshot::default();
    let mut answered = false;

    match runner.run("netstat", &["-i"]) {
        Ok(output) => {
            answered = true;
            snapshot.interfaces = parse_interfaces(&output);
        }
        Err(e) => warn!("Network interface statistics unavailable: {}", e),
    }

    match runner.run("netstat", &["-an"]) {
        Ok(output) => {
            answered = true;
            snapshot.connections = Some(count_connections(&output));
        }
        Err(e) => warn!("Network connection counts unavailable: {}", e),
    }

    match list_processes(runner, Category::Network, Some(top_processes)) {
        Ok(processes) => {
            answered = true;
            snapshot.top_network_processes = Some(processes);
        }
        Err(e) => warn!("Top network processes unavailable: {}", e),
    }

    if !answered {
        return Err(ResmonError::metric_collection(
            "no network statistics source responded",
        ));
    }

    Ok(snapshot)
}
