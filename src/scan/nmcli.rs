//! Adapter that scans visible access points by invoking
//! `nmcli -t -f SSID,BSSID,SIGNAL device wifi list` and parsing the terse
//! output. Works on any Linux machine running NetworkManager, limited to
//! whatever scan results the daemon has cached.

use std::process::Command;

use anyhow::{bail, Context, Result};

use super::{NetworkReading, ScanSource};

/// Synchronous scanner that shells out to `nmcli`. Each poll spawns a new
/// subprocess and parses its stdout.
pub struct NmcliScanner;

impl NmcliScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NmcliScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSource for NmcliScanner {
    fn poll(&self) -> Result<Vec<NetworkReading>> {
        let output = Command::new("nmcli")
            .args(["-t", "-f", "SSID,BSSID,SIGNAL", "device", "wifi", "list"])
            .output()
            .context("failed to run nmcli")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("nmcli exited with {}: {}", output.status, stderr.trim());
        }

        Ok(parse_nmcli_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse terse nmcli output, one `SSID:BSSID:SIGNAL` triple per line, with
/// colons inside the BSSID escaped by a backslash:
///
/// ```text
/// HomeNet:AA\:BB\:CC\:DD\:EE\:FF:87
/// ```
///
/// Malformed lines are skipped, not fatal, so localized warnings or hidden
/// networks never poison a poll.
pub fn parse_nmcli_output(output: &str) -> Vec<NetworkReading> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<NetworkReading> {
    let fields = split_unescaped(line);
    if fields.len() != 3 {
        return None;
    }
    let signal_pct: i32 = fields[2].parse().ok()?;

    Some(NetworkReading {
        ssid: fields[0].clone(),
        bssid: fields[1].clone(),
        rssi: pct_to_dbm(signal_pct),
    })
}

/// Split on `:` while honoring nmcli's backslash escaping.
fn split_unescaped(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for ch in line.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == ':' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);

    fields
}

/// nmcli reports signal as a 0-100 quality percentage; map it back onto the
/// dBm scale the rest of the pipeline works in (100% -> -50 dBm, 0% -> -100).
fn pct_to_dbm(pct: i32) -> i32 {
    pct.clamp(0, 100) / 2 - 100
}
