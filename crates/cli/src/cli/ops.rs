use shim_core::OPERATION_TABLE;

use crate::args::{Args, CommandSpec};

pub const COMMAND: CommandSpec = CommandSpec {
    name: "ops",
    usage: "ops",
    summary: "list the operations forwarded to the host",
    handler: cmd,
};

pub fn cmd(_args: &Args) -> anyhow::Result<()> {
    for line in render() {
        println!("{}", line);
    }
    Ok(())
}

fn render() -> Vec<String> {
    OPERATION_TABLE
        .iter()
        .map(|entry| format!("{:<18} {}  {}", entry.name, entry.arity, entry.notes))
        .collect()
}
