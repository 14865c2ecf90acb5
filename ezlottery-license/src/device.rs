//! Machine identity for license binding.
//!
//! The application shows the user a *machine code* derived from hardware
//! identifiers; the user sends it to the vendor, who issues a license for
//! it. Both sides run the code through [`normalize`] before it enters a
//! payload or a comparison, so `1a2b-3c4d` and `1a2b3c4d` are the same
//! identity.

use sha2::{Digest, Sha256};
use std::process::Command;

/// Strips every character outside `[A-Za-z0-9]`.
///
/// Total: an empty or fully non-alphanumeric input yields an empty string.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Computes the machine code for the current device.
///
/// Stable across reboots; changes when the board, CPU or primary disk is
/// replaced.
#[must_use]
pub fn machine_code() -> String {
    machine_code_from_components(&collect_hardware_ids())
}

/// Derives a machine code from already-collected hardware identifiers.
///
/// The components are joined with `:`, hashed with SHA-256, and the
/// lowercase hex digest is grouped in blocks of four separated by `-`.
#[must_use]
pub fn machine_code_from_components(components: &[String]) -> String {
    let digest = Sha256::digest(components.join(":").as_bytes());
    let hex = format!("{digest:x}");

    let mut code = String::with_capacity(hex.len() + hex.len() / 4);
    for (i, c) in hex.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            code.push('-');
        }
        code.push(c);
    }
    code
}

/// Collects hardware identifiers for the machine code.
fn collect_hardware_ids() -> Vec<String> {
    let mut ids: Vec<String> = [board_serial(), cpu_id(), disk_serial(), os_machine_id()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

    // Containers and VMs often hide every hardware serial.
    if ids.is_empty() {
        ids.push(get_hostname());
    }
    ids
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
}

/// Value on the first line after the header of a `wmic ... get` query.
#[cfg(target_os = "windows")]
fn wmic_value(args: &[&str]) -> Option<String> {
    command_stdout("wmic", args)
        .and_then(|out| out.lines().nth(1).map(|l| l.trim().to_string()))
}

/// `Serial Number: XXX` lines from `system_profiler`.
#[cfg(target_os = "macos")]
fn profiler_serial(data_type: &str) -> Option<String> {
    command_stdout("system_profiler", &[data_type]).and_then(|out| {
        out.lines()
            .find(|l| l.trim_start().starts_with("Serial Number"))
            .and_then(|l| l.split(':').nth(1))
            .map(|s| s.trim().to_string())
    })
}

fn board_serial() -> Option<String> {
    #[cfg(target_os = "windows")]
    {
        wmic_value(&["baseboard", "get", "serialnumber"])
    }

    #[cfg(target_os = "macos")]
    {
        profiler_serial("SPHardwareDataType")
    }

    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/sys/class/dmi/id/board_serial")
            .ok()
            .map(|s| s.trim().to_string())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn cpu_id() -> Option<String> {
    #[cfg(target_os = "windows")]
    {
        wmic_value(&["cpu", "get", "ProcessorId"])
    }

    #[cfg(target_os = "macos")]
    {
        command_stdout("sysctl", &["-n", "machdep.cpu.brand_string"]).map(|s| s.trim().to_string())
    }

    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo").ok().map(|content| {
            content
                .lines()
                .filter(|l| l.starts_with("processor") || l.starts_with("model name"))
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("|")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn disk_serial() -> Option<String> {
    #[cfg(target_os = "windows")]
    {
        wmic_value(&["diskdrive", "get", "serialnumber"])
    }

    #[cfg(target_os = "macos")]
    {
        profiler_serial("SPSerialATADataType")
    }

    #[cfg(target_os = "linux")]
    {
        command_stdout("lsblk", &["-o", "NAME,SERIAL", "-n", "-d"])
            .and_then(|out| out.lines().next().map(|l| l.trim().to_string()))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn os_machine_id() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        // Try /etc/machine-id first, then /var/lib/dbus/machine-id
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Gets the machine hostname.
fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
