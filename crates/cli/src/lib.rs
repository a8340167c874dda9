pub mod args;
pub mod cli;

pub fn run() -> i32 {
    let registry = cli::registry();
    cli::execute(&registry)
}
