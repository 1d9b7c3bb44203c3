//! Build, compile and submit one experiment batch.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qrelay_compile::{CompileOptions, CompiledCircuit, compile};
use qrelay_hal::{JobLedger, LedgerEntry};
use qrelay_protocol::{ExperimentConfig, ExperimentKind};

use super::common::{RunArgs, create_backend, load_device};

/// Run an experiment end to end.
pub async fn execute(config: ExperimentConfig, run: &RunArgs) -> Result<()> {
    let graph = load_device(&run.device)?;
    println!(
        "{} {} experiment '{}' on {} ({} qubits, {} couplings)",
        style("→").cyan().bold(),
        style(config.kind.as_str()).green(),
        config.display_name(),
        style(graph.name().unwrap_or("device")).yellow(),
        graph.num_qubits(),
        graph.num_edges()
    );

    let batch = config
        .assemble(&graph)
        .context("Failed to assemble experiment")?;

    if let Some(path) = &batch.path {
        println!("  Path ({} qubits): {}", path.len(), path);
    }
    if batch.short_path {
        let min_len = match &config.kind {
            ExperimentKind::Endurance(endurance) => endurance.min_path_len,
            _ => 0,
        };
        let len = batch.path.as_ref().map_or(0, |p| p.len());
        println!(
            "  {} path has {} qubits, fewer than {}; continuing",
            style("Warning:").yellow().bold(),
            len,
            min_len
        );
    }

    let options = CompileOptions::identity(config.optimization_level);
    let progress = ProgressBar::new(batch.circuits.len() as u64);
    progress.set_style(ProgressStyle::with_template(
        "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
    )?);
    progress.enable_steady_tick(Duration::from_millis(100));

    let mut compiled = Vec::with_capacity(batch.circuits.len());
    for circuit in &batch.circuits {
        progress.set_message(format!("compiling {}", circuit.name()));
        let result = compile(circuit, &graph, &options)
            .with_context(|| format!("Failed to compile {}", circuit.name()))?;
        compiled.push(result);
        progress.inc(1);
    }
    progress.finish_and_clear();

    print_summary(&batch.arms.iter().map(|a| a.label.as_str()).collect::<Vec<_>>(), &compiled);

    if let Some(dir) = &run.emit {
        let circuits: Vec<_> = compiled.iter().map(|c| &c.circuit).collect();
        let written = qrelay_qasm3::write_all(dir, &circuits)
            .with_context(|| format!("Failed to write QASM to {}", dir.display()))?;
        println!(
            "  Wrote {} QASM files to {}",
            written.len(),
            style(dir.display()).green()
        );
    }

    if run.dry_run {
        println!(
            "{} Dry run: {} circuits ready, nothing submitted",
            style("✓").green().bold(),
            compiled.len()
        );
        return Ok(());
    }

    let backend = create_backend(&run.backend, &graph)?;
    let job_id = backend
        .submit(&compiled, config.shots)
        .await
        .with_context(|| format!("Submission to '{}' failed", backend.name()))?;
    let status = backend.status(&job_id).await?;

    println!(
        "{} Submitted {} circuits x {} shots to {}",
        style("✓").green().bold(),
        compiled.len(),
        config.shots,
        style(backend.name()).yellow()
    );
    println!("  Job ID: {}", style(&job_id).cyan());
    println!("  Status: {status}");

    if run.record {
        let ledger = JobLedger::open_default()?;
        let arms = batch.arms.iter().map(|a| a.label.clone()).collect();
        ledger.append(&LedgerEntry::new(
            job_id,
            backend.name(),
            batch.name,
            arms,
            config.shots,
        ))?;
        println!("  Recorded in {}", ledger.path().display());
    }

    Ok(())
}

fn print_summary(labels: &[&str], compiled: &[CompiledCircuit]) {
    println!(
        "\n  {:<24} {:>6} {:>6} {:>6} {:>6}",
        style("arm").bold(),
        "ops",
        "depth",
        "2q",
        "swaps"
    );
    for (label, c) in labels.iter().zip(compiled) {
        println!(
            "  {:<24} {:>6} {:>6} {:>6} {:>6}",
            label,
            c.circuit.len(),
            c.circuit.depth(),
            c.circuit.num_two_qubit_gates(),
            c.swaps_inserted
        );
    }
    println!();
}
