//! Run reports.

use gatesim_core::GateDescription;
use gatesim_simulation::{ProbeRecord, SimulationStats};
use std::io::{self, Write};

/// Outcome of a simulator run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Probe records in `(time, gate, value)` order.
    pub records: Vec<ProbeRecord>,
    /// Event loop counters.
    pub stats: SimulationStats,
    /// Number of generated workload flips scheduled.
    pub workload_flips: usize,
}

impl SimulationReport {
    /// The records rendered as `<time> <gate> <value>` lines.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    /// Write the record trace.
    pub fn write_trace(&self, writer: &mut impl Write) -> io::Result<()> {
        write_probe_report(&self.records, writer)
    }

    /// Write a human-readable summary of the run counters.
    pub fn write_summary(&self, writer: &mut impl Write) -> io::Result<()> {
        let stats = &self.stats;
        writeln!(writer, "=== Simulation Summary ===")?;
        writeln!(writer, "Final time:    {}", stats.final_time)?;
        writeln!(writer, "Steps:         {}", stats.steps)?;
        writeln!(writer, "Scheduled:     {}", stats.transitions_scheduled)?;
        writeln!(writer, "Popped:        {}", stats.transitions_popped)?;
        writeln!(
            writer,
            "Stale:         {} ({:.1}%)",
            stats.stale_discarded,
            stats.stale_ratio() * 100.0
        )?;
        writeln!(writer, "Applied:       {}", stats.transitions_applied)?;
        writeln!(writer, "Probe records: {}", stats.probe_records)?;
        if self.workload_flips > 0 {
            writeln!(writer, "Random flips:  {}", self.workload_flips)?;
        }
        Ok(())
    }
}

/// Write one `<time> <gate> <value>` line per record.
pub fn write_probe_report(records: &[ProbeRecord], writer: &mut impl Write) -> io::Result<()> {
    for record in records {
        writeln!(writer, "{record}")?;
    }
    Ok(())
}

/// Write one line per gate describing its wiring.
///
/// Unbound input terminals are shown as `_`.
pub fn write_topology(gates: &[GateDescription], writer: &mut impl Write) -> io::Result<()> {
    for gate in gates {
        let inputs: Vec<&str> = gate
            .inputs
            .iter()
            .map(|input| input.as_deref().unwrap_or("_"))
            .collect();
        writeln!(
            writer,
            "{} {} {} probed={} inputs=[{}] dependents=[{}]",
            gate.name,
            gate.gate_type,
            gate.truth_table,
            gate.probed,
            inputs.join(","),
            gate.dependents.join(",")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatesim_simulation::{Bit, SimTime};
    use gatesim_test_helpers::fixtures::and_gate_circuit;

    #[test]
    fn test_probe_report_format() {
        let records = vec![
            ProbeRecord::new(SimTime(3), "A", Bit::One),
            ProbeRecord::new(SimTime(8), "G", Bit::Zero),
        ];
        let mut out = Vec::new();
        write_probe_report(&records, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 A 1\n8 G 0\n");
    }

    #[test]
    fn test_topology_format() {
        let circuit = and_gate_circuit();
        let mut out = Vec::new();
        write_topology(&circuit.describe(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("A IN buf probed=false inputs=[_] dependents=[G]"));
        assert!(lines[2].starts_with("G AND2 and2 probed=true inputs=[A,B] dependents=[]"));
    }

    #[test]
    fn test_summary_mentions_counters() {
        let report = SimulationReport {
            records: Vec::new(),
            stats: SimulationStats {
                transitions_popped: 4,
                stale_discarded: 1,
                ..Default::default()
            },
            workload_flips: 0,
        };
        let mut out = Vec::new();
        report.write_summary(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Stale:         1 (25.0%)"));
        assert!(!text.contains("Random flips"));
    }
}
