//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - phase relay experiments on coupled qubit devices",
        style("qrelay").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qrelay-ir        Gate-level circuit representation");
    println!("  qrelay-topology  Coupling graphs and path search");
    println!("  qrelay-protocol  Relay protocols and experiment assembly");
    println!("  qrelay-compile   Layout, routing and optimization passes");
    println!("  qrelay-qasm3     OpenQASM 3 emission");
    println!("  qrelay-hal       Backend abstraction and job ledger");
    println!("  qrelay-cli       Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
