//! Backends command implementation.

use anyhow::Result;
use console::style;

use super::common::{DeviceArgs, create_backend, load_device, registry};

/// Execute the backends command.
pub fn execute(device: &DeviceArgs) -> Result<()> {
    let graph = load_device(device)?;
    println!("{} Available backends:\n", style("qrelay").cyan().bold());

    for (name, description) in registry().list() {
        let backend = create_backend(name, &graph)?;
        let device = backend.device();
        println!(
            "  {} {} {}",
            style("●").green(),
            style(name).bold(),
            if device.is_simulated { "(local)" } else { "" }
        );
        println!("    {description}");
        println!(
            "    Device: {} ({} qubits, {} couplings)",
            graph.name().unwrap_or("custom"),
            device.num_qubits(),
            device.coupling_graph().num_edges()
        );
        println!("    Max shots: {}", device.max_shots);
        println!("    Max circuits per job: {}", device.max_circuits);
        println!();
    }

    Ok(())
}
